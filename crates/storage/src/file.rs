//! File-backed substrate
//!
//! One file per key inside a directory. Writes land in a temp file first and
//! are renamed into place, so readers never observe a half-written value.
//! Keys are percent-encoded into a filesystem-safe alphabet; `keys()` decodes
//! the directory listing back.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use ledgerstore_core::{Error, Result};

use crate::substrate::Substrate;

const FILE_EXT: &str = "kv";

/// Durable substrate mapping each key to one file
#[derive(Debug)]
pub struct FileSubstrate {
    dir: PathBuf,
}

impl FileSubstrate {
    /// Open (creating if needed) a substrate rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileSubstrate { dir })
    }

    /// Directory this substrate persists into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{FILE_EXT}", encode_key(key)))
    }
}

impl Substrate for FileSubstrate {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        debug!(key, bytes = value.len(), "substrate write");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXT) {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| Error::Storage(format!("unreadable file name in {:?}", self.dir)))?;
            keys.push(decode_key(stem)?);
        }
        Ok(keys)
    }
}

/// Percent-encode a key into `[A-Za-z0-9_-]` plus `%XX` escapes
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02x}")),
        }
    }
    out
}

fn decode_key(encoded: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut chars = encoded.bytes();
    while let Some(b) = chars.next() {
        if b == b'%' {
            let hi = chars.next();
            let lo = chars.next();
            let pair = match (hi, lo) {
                (Some(h), Some(l)) => [h, l],
                _ => return Err(Error::Storage(format!("truncated escape in {encoded:?}"))),
            };
            let hex = std::str::from_utf8(&pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| Error::Storage(format!("bad escape in {encoded:?}")))?;
            bytes.push(hex);
        } else {
            bytes.push(b);
        }
    }
    String::from_utf8(bytes).map_err(|_| Error::Storage(format!("non-UTF-8 key in {encoded:?}")))
}
