//! Startup configuration read from disk.

mod layout;

pub use layout::{Layout, LayoutEntry, LayoutError};
