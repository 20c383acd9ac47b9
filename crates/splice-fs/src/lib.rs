//! Filesystem collaborators for splice
//!
//! Reads documents and payloads without normalizing their line
//! terminators, writes results atomically, and loads edit plan files.

pub mod config;
pub mod error;
pub mod io;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{read_document, read_payload, write_document};
