//! Round-robin position shared across runs through a small index file.

use std::{fs, path::Path};

use tracing::warn;

/// Returns the slot to use this run for a list of `len` items and stores the
/// following slot in `index_path`. A missing or garbled file starts at 0; a
/// failed write is logged and otherwise ignored.
pub fn next_index(len: usize, index_path: &Path) -> usize {
    if len == 0 {
        return 0;
    }
    let index = read_index(index_path) % len;
    let next = (index + 1) % len;
    if let Err(err) = fs::write(index_path, next.to_string()) {
        warn!(path = ?index_path, error = %err, "failed to store rotation index");
    }
    index
}

fn read_index(path: &Path) -> usize {
    fs::read_to_string(path)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0)
}
