/*!
 * Common test utilities for the echomark test suite
 */

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use tempfile::TempDir;


use echomark::app_config::Config;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small Markdown document for testing
pub fn create_test_document(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "# Release notes\n\nThe cache layer was rewritten for this release.\nCold starts are noticeably faster now.\n";
    create_test_file(dir, filename, content)
}

/// Creates a test configuration translating English into French
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.source_language = "English".to_string();
    config.target_language = "French".to_string();
    config
}

/// Creates a test configuration where every nonempty line lands in its own
/// segment (each line estimates to at least one token, over a budget of one)
pub fn line_per_segment_config() -> Config {
    let mut config = test_config();
    config.split_budget = 1;
    config
}
