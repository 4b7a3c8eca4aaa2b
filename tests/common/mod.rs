//! Common test utilities for xapkit integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A bundle source directory for integration tests
#[allow(dead_code)]
pub struct TestBundle {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to the bundle directory
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestBundle {
    /// Create a new empty bundle directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file of `len` zero bytes into the bundle directory
    pub fn write_file(&self, name: &str, len: usize) -> PathBuf {
        let file_path = self.path.join(name);
        std::fs::write(&file_path, vec![0u8; len]).expect("Failed to write file");
        file_path
    }

    /// Check if a file exists in the bundle directory
    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).exists()
    }
}
