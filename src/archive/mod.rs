//! Mod archive handling: zip I/O and resource directory discovery

pub mod jar;
pub mod locator;

pub use jar::{list_entries, pack, unpack};
pub use locator::{find_resource_directories, ResourceLocator};
