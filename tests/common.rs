//! Common test utilities for the noughts test suite.
//!
//! Builds a throwaway site directory holding every manifest asset so the
//! worker can be installed from a real `DirectoryOrigin`.

#![allow(dead_code)]

use std::{fs, path::Path};

use noughts::worker::ASSETS;
use tempfile::TempDir;

pub const INDEX_BODY: &str = "<!doctype html><title>Tic-Tac-Toe</title>";

/// Write a site with one file per manifest asset.
pub fn site_with_assets() -> TempDir {
    let dir = TempDir::new().expect("create site dir");
    write_file(dir.path(), "index.html", INDEX_BODY);
    for asset in ASSETS {
        let relative = asset.trim_start_matches("./");
        if relative.is_empty() || relative == "index.html" {
            continue;
        }
        write_file(dir.path(), relative, &format!("contents of {asset}"));
    }
    dir
}

pub fn write_file(root: &Path, relative: &str, body: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, body).expect("write site file");
}

/// Apply 0-based moves in order, ignoring outcomes.
pub fn play(engine: &mut noughts::tictactoe::Engine, moves: &[usize]) {
    for &index in moves {
        engine.apply_move(index);
    }
}
