//! Shared infrastructure utilities for pomo.
//!
//! Kept out of the domain-pure `pomo-types` crate because everything here
//! touches the filesystem.

pub mod atomic_write;

pub use atomic_write::{FileSyncPolicy, atomic_write, atomic_write_with_sync, recover_bak_file};
