//! Locating test files.

use std::fs;
use std::path::PathBuf;

/// Find a file relative to the crate being tested, via the crate root provided by `cargo test`.
pub fn get_path_from_crate_root(relative_path: &str) -> PathBuf {
    let mut d = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    d.push(relative_path);
    d
}

/// Read `tests/goldenfiles/<name>.json` of the crate being tested.
pub fn read_goldenfile(name: &str) -> anyhow::Result<String> {
    let path = get_path_from_crate_root(&format!("tests/goldenfiles/{name}.json"));
    Ok(fs::read_to_string(path)?)
}
