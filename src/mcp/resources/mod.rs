//! MCP resources.
//!
//! Resources expose read-only content addressed by URI. The only scheme is
//! `file://`, which reads a file or aggregates a directory.

mod file;

pub use file::{read_directory_resource, read_file_resource};
