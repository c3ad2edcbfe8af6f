// NoiseCalibrator - running mean of the noise spectrum
//
// Maintains an exact running mean over an operator-controlled capture
// window. The operator arms the accumulator, lets it average the estimator's
// magnitude spectrum for as long as they like, and disarms it; the mean is
// then read out as the noise floor for later calibration.
//
// The incremental-mean update avoids storing the sample history while
// staying exact up to ordinary floating-point accumulation error, so the
// capture window can run unbounded.

use crate::calibration::profile::NoiseProfile;
use crate::error::CalibrationError;

/// NoiseCalibrator accumulates a running mean spectrum while armed
///
/// Owned exclusively by its caller and fed once per tick from the host
/// sampling loop; there is no internal locking or threading.
#[derive(Debug, Clone)]
pub struct NoiseCalibrator {
    /// Whether accumulation is active
    armed: bool,
    /// Ticks accumulated since the last arm
    sample_count: u64,
    /// Per-bin arithmetic mean over exactly `sample_count` samples
    running_mean: Vec<f32>,
}

impl NoiseCalibrator {
    /// Create a disarmed accumulator for spectra of `spectrum_size` bins
    ///
    /// # Arguments
    /// * `spectrum_size` - Bin count of the estimator's spectrum, >= 1
    ///
    /// # Returns
    /// * `Ok(NoiseCalibrator)` - Disarmed, zeroed accumulator
    /// * `Err(CalibrationError)` - `spectrum_size` is zero
    pub fn new(spectrum_size: usize) -> Result<Self, CalibrationError> {
        if spectrum_size == 0 {
            return Err(CalibrationError::ZeroSpectrumSize);
        }
        Ok(Self {
            armed: false,
            sample_count: 0,
            running_mean: vec![0.0; spectrum_size],
        })
    }

    /// Toggle accumulation
    ///
    /// Arming always starts a fresh capture: the sample count and the
    /// running mean are cleared, even when the accumulator was already
    /// armed. Disarming stops accumulation but keeps the mean readable.
    pub fn set_armed(&mut self, armed: bool) {
        if armed {
            self.sample_count = 0;
            self.running_mean.fill(0.0);
        }
        self.armed = armed;
    }

    /// Whether accumulation is currently active
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Ticks accumulated since the last arm
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Bin count this accumulator was configured with
    pub fn spectrum_size(&self) -> usize {
        self.running_mean.len()
    }

    /// Fold one tick's spectrum snapshot into the running mean
    ///
    /// A spectrum of the wrong length is a contract violation and fails
    /// before any state changes, armed or not. A well-formed call while
    /// disarmed is an `Ok` no-op.
    ///
    /// # Arguments
    /// * `spectrum` - Magnitude spectrum, exactly `spectrum_size` bins
    ///
    /// # Returns
    /// * `Ok(())` - Accumulated (or ignored while disarmed)
    /// * `Err(CalibrationError)` - Length mismatch, state untouched
    pub fn accumulate(&mut self, spectrum: &[f32]) -> Result<(), CalibrationError> {
        self.check_spectrum(spectrum)?;
        if !self.armed {
            return Ok(());
        }

        self.sample_count += 1;
        let count = self.sample_count as f32;
        for (mean, &sample) in self.running_mean.iter_mut().zip(spectrum) {
            *mean = (*mean * (count - 1.0) + sample) / count;
        }
        Ok(())
    }

    /// Validate a spectrum against the configured bin count
    pub fn check_spectrum(&self, spectrum: &[f32]) -> Result<(), CalibrationError> {
        if spectrum.len() != self.running_mean.len() {
            return Err(CalibrationError::SpectrumLengthMismatch {
                expected: self.running_mean.len(),
                actual: spectrum.len(),
            });
        }
        Ok(())
    }

    /// Snapshot of the current running mean, by value
    ///
    /// The returned vector does not update as further samples arrive.
    pub fn mean(&self) -> Vec<f32> {
        self.running_mean.clone()
    }

    /// Snapshot of the capture for persistence or reporting
    pub fn profile(&self) -> NoiseProfile {
        NoiseProfile {
            spectrum_size: self.running_mean.len(),
            sample_count: self.sample_count,
            mean: self.running_mean.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create an armed accumulator with a small bin count
    fn create_armed(spectrum_size: usize) -> NoiseCalibrator {
        let mut calibrator = NoiseCalibrator::new(spectrum_size).expect("non-zero size");
        calibrator.set_armed(true);
        calibrator
    }

    #[test]
    fn test_rejects_zero_spectrum_size() {
        match NoiseCalibrator::new(0) {
            Err(CalibrationError::ZeroSpectrumSize) => {}
            other => panic!("Expected ZeroSpectrumSize, got {:?}", other),
        }
    }

    #[test]
    fn test_starts_disarmed_and_zeroed() {
        let calibrator = NoiseCalibrator::new(4).unwrap();
        assert!(!calibrator.is_armed());
        assert_eq!(calibrator.sample_count(), 0);
        assert_eq!(calibrator.mean(), vec![0.0; 4]);
    }

    #[test]
    fn test_running_mean_is_exact() {
        let mut calibrator = create_armed(3);

        calibrator.accumulate(&[1.0, 2.0, 3.0]).unwrap();
        calibrator.accumulate(&[3.0, 2.0, 1.0]).unwrap();
        calibrator.accumulate(&[2.0, 2.0, 2.0]).unwrap();

        assert_eq!(calibrator.sample_count(), 3);
        assert_eq!(calibrator.mean(), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_single_sample_mean_is_the_sample() {
        let mut calibrator = create_armed(3);
        calibrator.accumulate(&[0.5, -1.5, 4.0]).unwrap();
        assert_eq!(calibrator.mean(), vec![0.5, -1.5, 4.0]);
    }

    #[test]
    fn test_accumulate_while_disarmed_is_a_noop() {
        let mut calibrator = NoiseCalibrator::new(3).unwrap();

        calibrator.accumulate(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(calibrator.sample_count(), 0);
        assert_eq!(calibrator.mean(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_disarm_preserves_mean() {
        let mut calibrator = create_armed(2);
        calibrator.accumulate(&[4.0, 8.0]).unwrap();
        calibrator.set_armed(false);

        assert_eq!(calibrator.mean(), vec![4.0, 8.0]);
        assert_eq!(calibrator.sample_count(), 1);

        // Further spectra are ignored while disarmed
        calibrator.accumulate(&[100.0, 100.0]).unwrap();
        assert_eq!(calibrator.mean(), vec![4.0, 8.0]);
    }

    #[test]
    fn test_rearming_resets_capture() {
        let mut calibrator = create_armed(2);
        calibrator.accumulate(&[10.0, 20.0]).unwrap();
        calibrator.accumulate(&[30.0, 40.0]).unwrap();
        assert_eq!(calibrator.sample_count(), 2);

        calibrator.set_armed(false);
        calibrator.set_armed(true);

        assert_eq!(calibrator.sample_count(), 0);
        assert_eq!(calibrator.mean(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_arming_while_armed_also_resets() {
        let mut calibrator = create_armed(2);
        calibrator.accumulate(&[10.0, 20.0]).unwrap();

        calibrator.set_armed(true);

        assert!(calibrator.is_armed());
        assert_eq!(calibrator.sample_count(), 0);
        assert_eq!(calibrator.mean(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_length_mismatch_leaves_state_unchanged() {
        let mut calibrator = create_armed(3);
        calibrator.accumulate(&[1.0, 2.0, 3.0]).unwrap();

        let result = calibrator.accumulate(&[1.0, 2.0]);
        match result {
            Err(CalibrationError::SpectrumLengthMismatch { expected, actual }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("Expected SpectrumLengthMismatch, got {:?}", other),
        }

        assert_eq!(calibrator.sample_count(), 1);
        assert_eq!(calibrator.mean(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_length_mismatch_fails_even_while_disarmed() {
        let mut calibrator = NoiseCalibrator::new(3).unwrap();
        assert!(calibrator.accumulate(&[1.0]).is_err());
    }

    #[test]
    fn test_mean_snapshot_is_stable() {
        let mut calibrator = create_armed(2);
        calibrator.accumulate(&[2.0, 6.0]).unwrap();

        let first = calibrator.mean();
        let second = calibrator.mean();
        assert_eq!(first, second);

        // The snapshot must not track later accumulation
        calibrator.accumulate(&[100.0, 100.0]).unwrap();
        assert_eq!(first, vec![2.0, 6.0]);
    }

    #[test]
    fn test_profile_snapshot() {
        let mut calibrator = create_armed(2);
        calibrator.accumulate(&[1.0, 3.0]).unwrap();

        let profile = calibrator.profile();
        assert_eq!(profile.spectrum_size, 2);
        assert_eq!(profile.sample_count, 1);
        assert_eq!(profile.mean, vec![1.0, 3.0]);
    }
}
