//! Scripted image analyzer.
//!
//! Returns pre-queued verdicts in order, then a fixed fallback.  Used by the
//! scenario runner and by tests that need deterministic camera results.

use std::collections::VecDeque;

use crate::app::ports::{AnalyzerError, ImageAnalyzer};

/// Analyzer that replays queued verdicts instead of looking at pixels.
#[derive(Debug, Default)]
pub struct ScriptedAnalyzer {
    verdicts: VecDeque<Result<bool, AnalyzerError>>,
    fallback: bool,
    thresholds_seen: Vec<f32>,
}

impl ScriptedAnalyzer {
    /// Analyzer with an empty script that never sees a cat.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verdict returned once the script is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, cat: bool) -> Self {
        self.fallback = cat;
        self
    }

    /// Queue the next verdict.
    pub fn push(&mut self, verdict: Result<bool, AnalyzerError>) {
        self.verdicts.push_back(verdict);
    }

    /// Confidence thresholds passed in, one per call.
    pub fn thresholds_seen(&self) -> &[f32] {
        &self.thresholds_seen
    }
}

impl ImageAnalyzer for ScriptedAnalyzer {
    /// Raw frame bytes; never inspected.
    type Image = Vec<u8>;

    fn contains_cat(
        &mut self,
        _image: Option<&Self::Image>,
        confidence_threshold: f32,
    ) -> Result<bool, AnalyzerError> {
        self.thresholds_seen.push(confidence_threshold);
        self.verdicts.pop_front().unwrap_or(Ok(self.fallback))
    }
}
