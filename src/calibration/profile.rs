// NoiseProfile - persisted snapshot of a noise capture
//
// A finished capture is saved as plain JSON so a later session can reuse the
// measured noise floor without re-recording it.

use serde::{Deserialize, Serialize};

/// Snapshot of a noise-floor capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseProfile {
    /// Bin count of the averaged spectrum
    pub spectrum_size: usize,
    /// Number of ticks that went into the mean
    pub sample_count: u64,
    /// Per-bin arithmetic mean over the capture window
    pub mean: Vec<f32>,
}

impl NoiseProfile {
    /// Whether the capture actually averaged any samples
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}
