use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary data directory for page files
pub fn create_test_data_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Write a raw page file, bypassing the store
pub fn create_test_page(data_dir: &TempDir, title: &str, content: &[u8]) -> PathBuf {
    let file_path = data_dir.path().join(format!("{title}.txt"));
    fs::write(&file_path, content).unwrap();
    file_path
}
