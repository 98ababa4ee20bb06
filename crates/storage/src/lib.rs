//! Persistent key-value substrate for ledgerstore
//!
//! The engine persists each collection as one string value under one string
//! key. This crate defines that contract ([`Substrate`]) and ships two
//! implementations:
//!
//! - [`MemorySubstrate`]: HashMap behind a `parking_lot::RwLock`; fast,
//!   non-durable, the default for tests
//! - [`FileSubstrate`]: one file per key inside a directory, written via
//!   temp-file + rename so a value is never observed half-written
//!
//! Both offer synchronous visibility: a `get` issued after a `set` returns
//! the value just written.

pub mod file;
pub mod memory;
pub mod substrate;

pub use file::FileSubstrate;
pub use memory::MemorySubstrate;
pub use substrate::Substrate;
