use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

// @module: Document model and token-budgeted segmentation

// @const: Word-like token regex used by the estimator
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\w+\b").unwrap()
});

/// Ratio of word count to estimated tokens, tuned for mixed prose
const TOKENS_PER_WORD: f64 = 0.7;

// @struct: A text document loaded for one translation run
#[derive(Debug, Clone)]
pub struct Document {
    // @field: Raw document text
    pub content: String,

    // @field: Display title, typically the source file stem
    pub title: String,
}

/// One token-budgeted slice of a document: a contiguous run of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Lines of this segment, joined with `\n`
    pub text: String,

    /// Accumulated token estimate of the lines in this segment. This is the
    /// sum the packing decision used, not a re-estimate of the joined text.
    pub token_estimate: usize,
}

/// Estimate the token cost of a text span.
///
/// Counts word-like runs and scales by a fixed ratio, truncating the product.
/// Deterministic; empty and whitespace-only text cost zero.
pub fn estimate_tokens(text: &str) -> usize {
    let words = WORD_REGEX.find_iter(text).count();
    (words as f64 * TOKENS_PER_WORD) as usize
}

impl Document {
    /// Creates a new document from raw text and a display title
    pub fn new(content: String, title: String) -> Self {
        Document { content, title }
    }

    /// True when the document carries no text at all
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Split the document into segments whose accumulated token estimate
    /// stays at or under `budget`.
    ///
    /// Greedy line-wise packing: a line that would push the running total
    /// over the budget closes the current segment first, then joins a fresh
    /// one. A single line whose own estimate exceeds the budget still forms
    /// a segment on its own - lines are never split. Joining all segment
    /// texts with `\n` reconstructs the document content exactly.
    pub fn split_into_segments(&self, budget: u32) -> Vec<Segment> {
        if self.is_empty() {
            warn!("No document content to split into segments");
            return Vec::new();
        }

        // Protect against accidental loss of lines - count at the beginning
        let total_lines = self.content.split('\n').count();
        let budget = budget as usize;

        let mut segments = Vec::new();
        let mut current_lines: Vec<&str> = Vec::new();
        let mut current_tokens = 0usize;

        for line in self.content.split('\n') {
            let line_tokens = estimate_tokens(line);

            // If adding this line would exceed the budget, finalize the
            // current segment first; the line itself is never split
            if current_tokens + line_tokens > budget && !current_lines.is_empty() {
                segments.push(Segment {
                    text: current_lines.join("\n"),
                    token_estimate: current_tokens,
                });
                current_lines = Vec::new();
                current_tokens = 0;
            }

            if line_tokens > budget {
                debug!("Line is oversized ({} tokens, budget {}), placing in its own segment",
                       line_tokens, budget);
            }

            current_lines.push(line);
            current_tokens += line_tokens;
        }

        // Add the last segment if it's not empty
        if !current_lines.is_empty() {
            segments.push(Segment {
                text: current_lines.join("\n"),
                token_estimate: current_tokens,
            });
        }

        // Verify that all lines have been included in the segments
        let total_segmented_lines: usize = segments.iter()
            .map(|segment| segment.text.split('\n').count())
            .sum();
        if total_segmented_lines != total_lines {
            error!("CRITICAL ERROR: Lost lines during segmentation! Original: {}, After segmentation: {}",
                   total_lines, total_segmented_lines);
        } else if log::max_level() >= log::LevelFilter::Debug {
            for (i, segment) in segments.iter().enumerate() {
                debug!("Segment {}: {} lines, ~{} tokens, {} chars",
                       i + 1, segment.text.split('\n').count(),
                       segment.token_estimate, segment.text.len());
            }
        }

        info!("Document '{}' split into {} segments", self.title, segments.len());
        segments
    }
}
