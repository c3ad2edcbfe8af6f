// Pitch Tracker Core - stabilized note display and noise calibration
//
// Derived-signal computations over the output of an external pitch
// estimator: hysteresis-stabilized note labels and a running-mean noise
// floor capture. The estimator itself, rendering, and UI wiring live in the
// host application.

// Module declarations
pub mod calibration;
pub mod config;
pub mod error;
pub mod session;
pub mod tracker;

// Re-exports for convenience
pub use calibration::{NoiseCalibrator, NoiseProfile};
pub use config::{AppConfig, CalibrationConfig, StabilizerConfig};
pub use error::{CalibrationError, ErrorCode, StabilizerError};
pub use session::{EstimatorFrame, FrameReport, TrackerSession};
pub use tracker::{NoteStabilizer, PitchClass, NO_NOTE_LABEL};
