/*!
 * Pipeline runner driving a document through segmentation, per-segment
 * round-trip translation and a single final flush.
 *
 * The runner is infallible by contract: every failure mode is either a
 * reported terminal status (no document, empty document) or a degraded
 * per-segment contribution. The sink is invoked exactly once per run with
 * segments, after the last one, whatever the per-segment outcomes were.
 */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info, warn};

use crate::app_config::Config;
use crate::errors::ConfigError;
use crate::language_utils;
use crate::providers::GenerationProvider;
use crate::session::{DocumentSink, DocumentSource, Session};
use crate::translation::TranslationUnit;

/// Phases of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Splitting the document into segments
    Splitting,
    /// Translating segments one by one
    Translating,
    /// Flushing the accumulated output to the sink
    Flushing,
    /// The run reached its terminal state
    Done,
}

/// Progress information during a pipeline run.
#[derive(Debug, Clone)]
pub struct RunProgress {
    /// Current phase
    pub phase: RunPhase,

    /// Segments fully processed so far
    pub segments_processed: usize,

    /// Total segments in this run (0 until the document is split)
    pub segments_total: usize,
}

/// Terminal status of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// All segments were processed and the flush was attempted
    Completed,
    /// The operator declined to pick a document
    SourceCancelled,
    /// The source failed to deliver a document
    SourceUnavailable,
    /// The picked document had no content
    EmptyDocument,
}

/// One segment's share of the final output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentContribution {
    /// Cleaned forward translation
    pub translated: String,

    /// Difference report, when the analysis produced one
    pub diff_report: Option<String>,
}

impl SegmentContribution {
    /// Render this contribution: the translation on its own line, followed
    /// by the report on its own line when present
    fn render(&self) -> String {
        match &self.diff_report {
            Some(report) => format!("{}\n{}\n", self.translated, report),
            None => format!("{}\n", self.translated),
        }
    }
}

/// Join contributions in segment order into the final output text
fn assemble_output(contributions: &[SegmentContribution]) -> String {
    contributions.iter().map(|contribution| contribution.render()).collect()
}

/// Result of one complete pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Terminal status of the run
    pub status: RunStatus,

    /// Segments the splitter produced
    pub segments_total: usize,

    /// Segments driven through the translation unit
    pub segments_processed: usize,

    /// Segments that contributed output text
    pub segments_contributed: usize,

    /// The assembled output text
    pub output: String,

    /// Where the flush landed, when it did
    pub saved_to: Option<PathBuf>,

    /// Total duration of the run
    pub duration: Duration,
}

impl RunReport {
    /// Report for a run that ended before any segment existed
    fn no_op(status: RunStatus, duration: Duration) -> Self {
        RunReport {
            status,
            segments_total: 0,
            segments_processed: 0,
            segments_contributed: 0,
            output: String::new(),
            saved_to: None,
            duration,
        }
    }

    /// Get a summary of the run.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        parts.push(format!("Duration: {:.2}s", self.duration.as_secs_f32()));
        parts.push(format!(
            "Segments: {}/{} processed, {} contributed output",
            self.segments_processed, self.segments_total, self.segments_contributed
        ));

        match (&self.status, &self.saved_to) {
            (RunStatus::Completed, Some(path)) => parts.push(format!("Saved: {}", path.display())),
            (RunStatus::Completed, None) => parts.push("Not saved".to_string()),
            (status, _) => parts.push(format!("Ended early: {:?}", status)),
        }

        parts.join(" | ")
    }
}

/// The pipeline runner: one document in, at most one flush out.
pub struct PipelineRunner<P> {
    config: Config,
    unit: TranslationUnit<P>,
}

impl<P: GenerationProvider> PipelineRunner<P> {
    /// Create a runner after validating the configuration.
    pub fn new(config: Config, provider: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let provider = Arc::new(provider);
        let unit = TranslationUnit::new(provider, &config);

        Ok(PipelineRunner { config, unit })
    }

    /// Get the runner configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline against one session.
    ///
    /// Pulls the document from the session source, splits it, drives every
    /// segment through the translation unit in order, and flushes the
    /// accumulated output through the session sink exactly once after the
    /// last segment. Per-segment failures skip that segment's output and
    /// nothing else; a declined or failed save is reported, not retried.
    pub async fn run<S, K>(
        &self,
        session: &mut Session<S, K>,
        progress_callback: Option<Box<dyn Fn(RunProgress) + Send + Sync>>,
    ) -> RunReport
    where
        S: DocumentSource,
        K: DocumentSink,
    {
        let start_time = Instant::now();

        let report_progress = |phase: RunPhase, processed: usize, total: usize| {
            if let Some(ref callback) = progress_callback {
                callback(RunProgress {
                    phase,
                    segments_processed: processed,
                    segments_total: total,
                });
            }
        };

        // Pull the document out of the session
        let document = match session.source.pick_document() {
            Ok(Some(document)) => document,
            Ok(None) => {
                info!("No document picked, nothing to do");
                report_progress(RunPhase::Done, 0, 0);
                return RunReport::no_op(RunStatus::SourceCancelled, start_time.elapsed());
            },
            Err(e) => {
                error!("Could not load a document: {}", e);
                report_progress(RunPhase::Done, 0, 0);
                return RunReport::no_op(RunStatus::SourceUnavailable, start_time.elapsed());
            },
        };

        if document.is_empty() {
            warn!("Document '{}' is empty, nothing to translate", document.title);
            report_progress(RunPhase::Done, 0, 0);
            return RunReport::no_op(RunStatus::EmptyDocument, start_time.elapsed());
        }

        report_progress(RunPhase::Splitting, 0, 0);
        let segments = document.split_into_segments(self.config.split_budget);
        let segments_total = segments.len();
        report_progress(RunPhase::Translating, 0, segments_total);

        let mut contributions: Vec<SegmentContribution> = Vec::new();
        let mut segments_processed = 0usize;

        for (index, segment) in segments.iter().enumerate() {
            info!("Processing segment {}/{} (~{} tokens)",
                  index + 1, segments_total, segment.token_estimate);

            let outcome = self.unit
                .process(&segment.text, &self.config.source_language, &self.config.target_language)
                .await;

            // The processed count drives the flush, so it moves even when
            // the segment produced nothing
            segments_processed += 1;

            match outcome.translated {
                Some(translated) => contributions.push(SegmentContribution {
                    translated,
                    diff_report: outcome.diff_report,
                }),
                None => warn!("Segment {}/{} contributed no output", index + 1, segments_total),
            }

            info!("Progress: {}/{}", segments_processed, segments_total);
            report_progress(RunPhase::Translating, segments_processed, segments_total);
        }

        if segments_processed != segments_total {
            error!("CRITICAL ERROR: Segment accounting mismatch! Expected: {}, Processed: {}",
                   segments_total, segments_processed);
        }

        // Flush exactly once, after the last segment
        report_progress(RunPhase::Flushing, segments_processed, segments_total);

        let output = assemble_output(&contributions);
        let default_name = format!(
            "{}_translated.md",
            language_utils::short_code(&self.config.target_language)
        );

        let saved_to = match session.sink.save_document(&default_name, &output) {
            Ok(Some(path)) => {
                info!("Result saved to {}", path.display());
                Some(path)
            },
            Ok(None) => {
                info!("Save declined, translated output was not persisted");
                None
            },
            Err(e) => {
                error!("Save failed: {}", e);
                None
            },
        };

        report_progress(RunPhase::Done, segments_processed, segments_total);

        RunReport {
            status: RunStatus::Completed,
            segments_total,
            segments_processed,
            segments_contributed: contributions.len(),
            output,
            saved_to,
            duration: start_time.elapsed(),
        }
    }
}
