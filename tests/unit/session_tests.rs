/*!
 * Tests for the file-backed document source and sink
 */

use anyhow::Result;
use std::fs;

use echomark::errors::{SinkError, SourceError};
use echomark::session::{DocumentSink, DocumentSource, FileSink, FileSource};

use crate::common;

/// Test loading a document from an existing file
#[test]
fn test_fileSource_withExistingFile_shouldLoadContentAndTitle() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(&temp_dir.path().to_path_buf(), "guide.md")?;

    let mut source = FileSource::new(&path);
    let document = source.pick_document()?.expect("a document should load");

    assert_eq!(document.title, "guide");
    assert!(document.content.starts_with("# Release notes"));
    assert!(!document.is_empty());
    Ok(())
}

/// Test the error for a path that does not exist
#[test]
fn test_fileSource_withMissingFile_shouldReportNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut source = FileSource::new(temp_dir.path().join("missing.md"));

    let result = source.pick_document();

    assert!(matches!(result, Err(SourceError::NotFound(_))));
    Ok(())
}

/// Test writing under the suggested default name
#[test]
fn test_fileSink_withDefaultName_shouldWriteIntoBaseDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut sink = FileSink::new(temp_dir.path());

    let saved = sink.save_document("fr_translated.md", "Bonjour\n")?;

    let path = saved.expect("save should land somewhere");
    assert_eq!(path, temp_dir.path().join("fr_translated.md"));
    assert_eq!(fs::read_to_string(&path)?, "Bonjour\n");
    Ok(())
}

/// Test that an explicit output path wins over the suggested name
#[test]
fn test_fileSink_withExplicitPath_shouldIgnoreDefaultName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let custom = temp_dir.path().join("custom.md");
    let mut sink = FileSink::new(temp_dir.path()).with_output_path(&custom);

    let saved = sink.save_document("fr_translated.md", "Bonjour\n")?;

    assert_eq!(saved, Some(custom.clone()));
    assert_eq!(fs::read_to_string(&custom)?, "Bonjour\n");
    assert!(!temp_dir.path().join("fr_translated.md").exists());
    Ok(())
}

/// Test that an existing destination declines the save by default
#[test]
fn test_fileSink_withExistingDestination_shouldDecline() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let existing = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "fr_translated.md",
        "previous run",
    )?;
    let mut sink = FileSink::new(temp_dir.path());

    let saved = sink.save_document("fr_translated.md", "new content")?;

    assert_eq!(saved, None);
    assert_eq!(fs::read_to_string(&existing)?, "previous run");
    Ok(())
}

/// Test that force overwrite replaces an existing destination
#[test]
fn test_fileSink_withForceOverwrite_shouldReplaceExistingFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let existing = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "fr_translated.md",
        "previous run",
    )?;
    let mut sink = FileSink::new(temp_dir.path()).with_force_overwrite(true);

    let saved = sink.save_document("fr_translated.md", "new content")?;

    assert_eq!(saved, Some(existing.clone()));
    assert_eq!(fs::read_to_string(&existing)?, "new content");
    Ok(())
}

/// Test that missing parent directories are created for an explicit path
#[test]
fn test_fileSink_withNestedOutputPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("out").join("deep").join("result.md");
    let mut sink = FileSink::new(temp_dir.path()).with_output_path(&nested);

    let saved = sink.save_document("fr_translated.md", "Bonjour\n")?;

    assert_eq!(saved, Some(nested.clone()));
    assert_eq!(fs::read_to_string(&nested)?, "Bonjour\n");
    Ok(())
}

/// Test the error when the destination cannot be written
#[test]
fn test_fileSink_withUnwritableDestination_shouldReportWriteFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    // Using a regular file as the base directory makes every write fail
    let blocking_file = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "not_a_dir",
        "plain file",
    )?;
    let mut sink = FileSink::new(&blocking_file);

    let result = sink.save_document("fr_translated.md", "Bonjour\n");

    assert!(matches!(result, Err(SinkError::WriteFailed { .. })));
    Ok(())
}
