//! Shared fixtures for integration tests.

use std::io::Write;
use std::path::PathBuf;

use route_table::config::{load_routes, AppConfig};
use route_table::RouteTable;
use tempfile::NamedTempFile;

/// The route file shipped at the crate root.
pub fn shipped_routes_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("routes.conf")
}

/// Load the shipped route file with default settings.
pub fn shipped_table() -> RouteTable {
    load_routes(&shipped_routes_path(), &AppConfig::default()).unwrap()
}

/// Write `contents` to a temp file that is removed when dropped.
#[allow(dead_code)]
pub fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("route-table-")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
