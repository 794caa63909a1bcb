/*!
 * The interactive session: where the document comes from and where the
 * result goes.
 *
 * A run borrows one `Session`, a pair of capability objects standing in
 * for the operator-facing pick and save steps. `Ok(None)` from either
 * capability means the operator declined - a normal early end, not an
 * error. The CLI implementations work on plain file paths; tests use
 * in-memory stand-ins.
 */

use std::fs;
use std::path::PathBuf;

use log::{debug, warn};

use crate::document::Document;
use crate::errors::{SinkError, SourceError};

/// Where the document for a run comes from
pub trait DocumentSource {
    /// Pick and load the document for this run.
    ///
    /// `Ok(None)` means the operator declined to pick one - the run ends
    /// quietly. An error means the pick happened but the document could
    /// not be loaded.
    fn pick_document(&mut self) -> Result<Option<Document>, SourceError>;
}

/// Where the accumulated output of a run goes
pub trait DocumentSink {
    /// Choose a destination and persist the content, exactly once per run.
    ///
    /// `default_name` is the suggested filename. `Ok(None)` means the
    /// operator declined the save - reported by the caller, never retried.
    fn save_document(&mut self, default_name: &str, content: &str) -> Result<Option<PathBuf>, SinkError>;
}

/// The source/sink pair one run works against
#[derive(Debug)]
pub struct Session<S, K> {
    /// Document source capability
    pub source: S,

    /// Document sink capability
    pub sink: K,
}

impl<S: DocumentSource, K: DocumentSink> Session<S, K> {
    /// Bundle a source and a sink for one run
    pub fn new(source: S, sink: K) -> Self {
        Session { source, sink }
    }
}

/// Document source reading a fixed file path
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given document path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl DocumentSource for FileSource {
    fn pick_document(&mut self) -> Result<Option<Document>, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).map_err(|e| SourceError::Unreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        // Title from the file stem, falling back to the whole file name
        let title = self.path.file_stem()
            .or_else(|| self.path.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());

        debug!("Loaded document '{}' ({} bytes) from {}",
               title, content.len(), self.path.display());
        Ok(Some(Document::new(content, title)))
    }
}

/// Document sink writing next to the input, or to an explicit path
#[derive(Debug)]
pub struct FileSink {
    /// Explicit output path; the suggested name is used when absent
    output_path: Option<PathBuf>,

    /// Directory receiving the default-named file
    base_dir: PathBuf,

    /// Whether an existing file at the destination may be replaced
    force_overwrite: bool,
}

impl FileSink {
    /// Create a sink writing into `base_dir` under the suggested name
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        FileSink {
            output_path: None,
            base_dir: base_dir.into(),
            force_overwrite: false,
        }
    }

    /// Use an explicit output path instead of the suggested name
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Allow replacing an existing file at the destination
    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    fn resolve_target(&self, default_name: &str) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => self.base_dir.join(default_name),
        }
    }
}

impl DocumentSink for FileSink {
    fn save_document(&mut self, default_name: &str, content: &str) -> Result<Option<PathBuf>, SinkError> {
        let target = self.resolve_target(default_name);

        // An existing destination without the overwrite flag counts as a
        // declined save, like an operator hitting cancel in a dialog
        if target.exists() && !self.force_overwrite {
            warn!("Output file {} already exists, skipping save (use force overwrite to replace it)",
                  target.display());
            return Ok(None);
        }

        // Ensure the parent directory exists
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| SinkError::WriteFailed {
                    path: target.clone(),
                    reason: e.to_string(),
                })?;
            }
        }

        fs::write(&target, content).map_err(|e| SinkError::WriteFailed {
            path: target.clone(),
            reason: e.to_string(),
        })?;

        Ok(Some(target))
    }
}
