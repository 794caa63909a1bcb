/*!
 * The three-stage translation unit.
 *
 * One segment flows through forward translation, back-translation and
 * difference analysis. The forward stage is the only gate: when it fails
 * the unit returns immediately and the segment contributes nothing. The
 * later stages degrade the outcome instead of aborting it.
 */

use std::sync::Arc;

use log::{debug, info, warn};

use super::client::{DiffAnalyzer, TranslationClient};
use crate::app_config::Config;
use crate::providers::GenerationProvider;

/// Result of driving one segment through the unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    /// The segment text as it went in
    pub original: String,

    /// Forward translation into the target language
    pub translated: Option<String>,

    /// Back-translation of the forward result into the source language
    pub back_translated: Option<String>,

    /// Difference report for the round trip
    pub diff_report: Option<String>,
}

impl TranslationOutcome {
    /// Outcome for a segment whose forward translation never materialized
    fn failed(original: String) -> Self {
        TranslationOutcome {
            original,
            translated: None,
            back_translated: None,
            diff_report: None,
        }
    }

    /// True when the segment produced usable translated text
    pub fn has_translation(&self) -> bool {
        self.translated.is_some()
    }
}

/// Drives one segment through translate, back-translate and analyze
#[derive(Debug)]
pub struct TranslationUnit<P> {
    client: TranslationClient<P>,
    analyzer: DiffAnalyzer<P>,
}

impl<P: GenerationProvider> TranslationUnit<P> {
    /// Build a unit over one shared provider, with models taken from the config
    pub fn new(provider: Arc<P>, config: &Config) -> Self {
        let client = TranslationClient::new(
            Arc::clone(&provider),
            config.generator.translation_model.clone(),
        );
        let analyzer = DiffAnalyzer::new(provider, config.generator.comparison_model.clone());
        TranslationUnit { client, analyzer }
    }

    /// Process one segment: forward translation, back-translation, then
    /// difference analysis when both texts exist. Stages run strictly in
    /// order, one call in flight at a time.
    pub async fn process(&self, text: &str, source_language: &str, target_language: &str) -> TranslationOutcome {
        // Forward translation gates the whole unit
        let Some(translated) = self.client.translate(text, target_language).await else {
            warn!("Translation to {} failed, segment will not contribute output", target_language);
            return TranslationOutcome::failed(text.to_string());
        };
        info!("Translated to {}", target_language);
        debug!("Translated text: {}", translated);

        // Verification round trip back into the source language
        let back_translated = self.client.translate(&translated, source_language).await;
        match &back_translated {
            Some(back) => {
                info!("Back-translated to {}", source_language);
                debug!("Back-translated text: {}", back);
            },
            None => warn!("Back-translation to {} failed", source_language),
        }

        // Compare only when the round trip is complete
        let diff_report = match &back_translated {
            Some(back) => {
                let report = self.analyzer.analyze(text, back, &translated).await;
                match &report {
                    Some(r) => debug!("Difference report: {}", r),
                    None => warn!("Difference analysis produced no report"),
                }
                report
            },
            None => None,
        };

        TranslationOutcome {
            original: text.to_string(),
            translated: Some(translated),
            back_translated,
            diff_report,
        }
    }
}
