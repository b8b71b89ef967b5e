//! Path utilities for locating workspace files and scratch directories.

use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// This is determined by walking up from the test-utils manifest directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns the shipped station configuration directory (`config/stations`).
pub fn station_config_dir() -> PathBuf {
    workspace_root().join("config").join("stations")
}

/// Create an empty file at `root/relative`, creating parent directories.
pub fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture directory");
    }
    std::fs::write(&path, b"").expect("write fixture file");
    path
}

/// A scratch directory removed when dropped.
pub fn scratch_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }

    #[test]
    fn test_touch_creates_parents() {
        let dir = scratch_dir();
        let path = touch(dir.path(), "a/b/c.png");
        assert!(path.exists());
    }
}
