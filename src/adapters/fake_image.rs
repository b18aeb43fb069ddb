//! Stand-in image analyzer for running without a classification model.
//!
//! Reports a cat at random, biased by the confidence threshold: the higher
//! the threshold, the less often a cat is "seen".  An empty or missing
//! frame never contains a cat.

use log::debug;
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::ports::{AnalyzerError, ImageAnalyzer};

/// Random analyzer; seedable for reproducible runs.
pub struct FakeImageAnalyzer {
    rng: StdRng,
}

impl FakeImageAnalyzer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for FakeImageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageAnalyzer for FakeImageAnalyzer {
    type Image = Vec<u8>;

    fn contains_cat(
        &mut self,
        image: Option<&Self::Image>,
        confidence_threshold: f32,
    ) -> Result<bool, AnalyzerError> {
        let Some(frame) = image.filter(|f| !f.is_empty()) else {
            return Ok(false);
        };
        let confidence: f32 = self.rng.gen_range(0.0..100.0);
        debug!(
            "FakeImageAnalyzer: {} byte frame, confidence {:.1} vs threshold {:.1}",
            frame.len(),
            confidence,
            confidence_threshold
        );
        Ok(confidence >= confidence_threshold)
    }
}
