//! In-memory directory tree simulator with a small shell on top.

pub mod config;
pub mod filesystem;
pub mod shell;
