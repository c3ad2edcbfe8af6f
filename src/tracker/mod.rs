// Tracker module - note stabilization for per-tick pitch estimates
//
// This module turns the raw fundamental-frequency stream from the external
// pitch estimator into a stable note display:
// - PitchClass: frequency to equal-tempered pitch class conversion
// - NoteStabilizer: debounce and silence-bridging hysteresis
//
// The stabilizer is deliberately independent of the noise calibration
// accumulator; the two only meet in the per-tick session glue.

pub mod note;
pub mod stabilizer;

pub use note::{PitchClass, NO_NOTE_LABEL};
pub use stabilizer::NoteStabilizer;
