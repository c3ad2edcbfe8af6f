// Session - per-tick orchestration of both derived-signal components
//
// The host sampling loop calls process_frame once per tick with fresh
// estimator output. The session fans the frame out to the note stabilizer
// and the noise calibrator; no data flows between the two, they merely share
// the tick. Everything runs synchronously on the caller's thread.
//
// Rendering, button wiring, and file logging stay outside; the session only
// produces a FrameReport for the presentation layer to consume.

use crate::calibration::{NoiseCalibrator, NoiseProfile};
use crate::error::{log_calibration_error, CalibrationError};
use crate::tracker::note::PitchClass;
use crate::tracker::NoteStabilizer;

/// Per-tick input from the external pitch estimator
///
/// The spectrum is borrowed from the estimator's buffer; nothing here is
/// retained across ticks.
#[derive(Debug, Clone, Copy)]
pub struct EstimatorFrame<'a> {
    /// Fundamental frequency estimate in Hz; NaN means no pitch detected
    pub frequency: f32,
    /// Magnitude spectrum snapshot, bin meaning opaque to the tracker
    pub spectrum: &'a [f32],
    /// Lower display bound of the estimator's search range (pass-through)
    pub frequency_min: f32,
    /// Upper display bound of the estimator's search range (pass-through)
    pub frequency_max: f32,
}

/// Per-tick output for the presentation layer
#[derive(Debug, Clone, serde::Serialize)]
pub struct FrameReport {
    /// 1-based tick ordinal within this session
    pub tick: u64,
    /// Raw frequency estimate the tick was fed (NaN serializes as null)
    pub frequency: f32,
    /// Stabilized note after this tick
    pub note: Option<PitchClass>,
    /// Estimator display bounds, passed through untouched
    pub frequency_min: f32,
    pub frequency_max: f32,
    /// Noise samples accumulated so far in the current capture
    pub noise_sample_count: u64,
}

impl FrameReport {
    /// The note name to display, `--` for silence
    pub fn label(&self) -> &'static str {
        PitchClass::label(self.note)
    }
}

/// TrackerSession owns one stabilizer and one calibrator and drives both
/// once per tick
pub struct TrackerSession {
    stabilizer: NoteStabilizer,
    calibrator: NoiseCalibrator,
    tick: u64,
    last_note: Option<PitchClass>,
}

impl TrackerSession {
    /// Create a session from already-validated components
    pub fn new(stabilizer: NoteStabilizer, calibrator: NoiseCalibrator) -> Self {
        Self {
            stabilizer,
            calibrator,
            tick: 0,
            last_note: None,
        }
    }

    /// Process one tick of estimator output
    ///
    /// The spectrum is validated and accumulated first, so a malformed frame
    /// fails before any state changes; the stabilizer never sees a tick the
    /// calibrator rejected.
    ///
    /// # Arguments
    /// * `frame` - This tick's estimator output
    ///
    /// # Returns
    /// * `Ok(FrameReport)` - Stabilized note and pass-through display data
    /// * `Err(CalibrationError)` - Spectrum length mismatch, session untouched
    pub fn process_frame(
        &mut self,
        frame: &EstimatorFrame<'_>,
    ) -> Result<FrameReport, CalibrationError> {
        if let Err(err) = self.calibrator.accumulate(frame.spectrum) {
            log_calibration_error(&err, "process_frame");
            return Err(err);
        }

        let note = self.stabilizer.update(frame.frequency);
        self.tick += 1;

        if note != self.last_note {
            tracing::debug!(
                "[Session] tick {}: held note {} -> {}",
                self.tick,
                PitchClass::label(self.last_note),
                PitchClass::label(note)
            );
            self.last_note = note;
        }

        Ok(FrameReport {
            tick: self.tick,
            frequency: frame.frequency,
            note,
            frequency_min: frame.frequency_min,
            frequency_max: frame.frequency_max,
            noise_sample_count: self.calibrator.sample_count(),
        })
    }

    /// Arm or disarm the noise capture
    ///
    /// Arming restarts the capture from zero, matching the calibrator's
    /// contract.
    pub fn set_armed(&mut self, armed: bool) {
        if armed {
            tracing::info!("[Session] Noise capture armed, averaging restarted");
        } else {
            tracing::info!(
                "[Session] Noise capture disarmed after {} samples",
                self.calibrator.sample_count()
            );
        }
        self.calibrator.set_armed(armed);
    }

    /// Whether the noise capture is currently armed
    pub fn is_armed(&self) -> bool {
        self.calibrator.is_armed()
    }

    /// Snapshot of the current running-mean noise spectrum
    pub fn noise_mean(&self) -> Vec<f32> {
        self.calibrator.mean()
    }

    /// Snapshot of the capture for persistence or reporting
    pub fn noise_profile(&self) -> NoiseProfile {
        self.calibrator.profile()
    }

    /// The note currently held by the stabilizer
    pub fn held_note(&self) -> Option<PitchClass> {
        self.stabilizer.held()
    }

    /// Ticks processed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
