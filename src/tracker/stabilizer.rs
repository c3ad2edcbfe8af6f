// NoteStabilizer - hysteresis for noisy per-tick pitch estimates
//
// Raw per-frame pitch estimates flicker to "no detection" during natural
// amplitude dips within a sustained note (vibrato nulls, transients). This
// module debounces them into a held note label: a note must repeat before it
// counts as confirmed, and only a confirmed note is bridged across brief
// estimator dropouts. Unconfirmed detections are still shown live, they just
// earn no silence tolerance.
//
// The debounce logic lives in a pure transition function over an explicit
// state enum, so the hysteresis rules are testable without a host loop.

use crate::config::StabilizerConfig;
use crate::error::StabilizerError;
use crate::tracker::note::PitchClass;

/// Debounce state for the held note
///
/// `Bridging` is the silence-tolerance window of a confirmed note: the note
/// stays on display while the estimator reports nothing, up to the silence
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoteState {
    /// No note context at all
    Silent,
    /// A detection run that has not yet reached the match threshold;
    /// `matches` counts repeats after the first detection of `class`
    Unconfirmed { class: PitchClass, matches: u32 },
    /// The run reached the match threshold
    Confirmed { class: PitchClass },
    /// A confirmed note coasting through silent ticks
    Bridging { class: PitchClass, silent_ticks: u32 },
}

impl NoteState {
    /// The note currently on display for this state
    fn held(&self) -> Option<PitchClass> {
        match self {
            NoteState::Silent => None,
            NoteState::Unconfirmed { class, .. }
            | NoteState::Confirmed { class }
            | NoteState::Bridging { class, .. } => Some(*class),
        }
    }
}

/// NoteStabilizer converts a per-tick frequency sample into a held note
///
/// Owned exclusively by its caller and updated once per tick from the host
/// sampling loop; there is no internal locking or threading.
#[derive(Debug)]
pub struct NoteStabilizer {
    config: StabilizerConfig,
    state: NoteState,
}

impl NoteStabilizer {
    /// Create a stabilizer with the given hysteresis thresholds
    ///
    /// # Arguments
    /// * `config` - Match and silence thresholds, both >= 1
    ///
    /// # Returns
    /// * `Ok(NoteStabilizer)` - Ready stabilizer in the silent state
    /// * `Err(StabilizerError)` - A threshold is zero
    pub fn new(config: StabilizerConfig) -> Result<Self, StabilizerError> {
        if config.match_threshold == 0 {
            return Err(StabilizerError::InvalidThreshold {
                name: "match_threshold",
                value: config.match_threshold,
            });
        }
        if config.silence_threshold == 0 {
            return Err(StabilizerError::InvalidThreshold {
                name: "silence_threshold",
                value: config.silence_threshold,
            });
        }
        Ok(Self {
            config,
            state: NoteState::Silent,
        })
    }

    /// Create a stabilizer with the default thresholds (2 matches, 3 silent
    /// ticks)
    pub fn new_default() -> Self {
        Self {
            config: StabilizerConfig::default(),
            state: NoteState::Silent,
        }
    }

    /// Feed one tick's frequency estimate and get the stabilized note
    ///
    /// NaN, infinite, and non-positive frequencies are valid input meaning
    /// "no pitch detected this tick" and route through the silence rules.
    ///
    /// # Arguments
    /// * `frequency` - Fundamental frequency estimate in Hz, or NaN
    ///
    /// # Returns
    /// The note to display after this tick, or `None` for silence
    pub fn update(&mut self, frequency: f32) -> Option<PitchClass> {
        let detected = PitchClass::from_frequency(frequency);
        self.state = Self::step(self.state, detected, &self.config);
        self.state.held()
    }

    /// The note currently held, without advancing a tick
    pub fn held(&self) -> Option<PitchClass> {
        self.state.held()
    }

    /// The thresholds this stabilizer was built with
    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    /// Pure transition function for one tick
    ///
    /// Rules:
    /// 1. A detection matching the current run extends it; once the run has
    ///    `match_threshold` repeats the note is confirmed.
    /// 2. A detection of a different class restarts the run at zero for the
    ///    new class, from any state. The new class is shown immediately.
    /// 3. Silence during an unconfirmed run discards the run outright.
    /// 4. Silence after confirmation keeps the note on display until
    ///    `silence_threshold` consecutive silent ticks have passed.
    fn step(
        state: NoteState,
        detected: Option<PitchClass>,
        config: &StabilizerConfig,
    ) -> NoteState {
        match (state, detected) {
            (NoteState::Silent, None) => NoteState::Silent,
            (NoteState::Silent, Some(class)) => Self::run_state(class, 0, config),

            (NoteState::Unconfirmed { class, matches }, Some(detected)) if detected == class => {
                Self::run_state(class, matches + 1, config)
            }
            (NoteState::Unconfirmed { .. }, Some(detected)) => Self::run_state(detected, 0, config),
            (NoteState::Unconfirmed { .. }, None) => NoteState::Silent,

            (NoteState::Confirmed { class }, Some(detected)) if detected == class => {
                NoteState::Confirmed { class }
            }
            (NoteState::Confirmed { .. }, Some(detected)) => Self::run_state(detected, 0, config),
            (NoteState::Confirmed { class }, None) => Self::bridge_state(class, 1, config),

            (NoteState::Bridging { class, .. }, Some(detected)) if detected == class => {
                // The dropout ended and the same note is back; silence
                // tolerance is available again in full
                NoteState::Confirmed { class }
            }
            (NoteState::Bridging { .. }, Some(detected)) => Self::run_state(detected, 0, config),
            (NoteState::Bridging { class, silent_ticks }, None) => {
                Self::bridge_state(class, silent_ticks + 1, config)
            }
        }
    }

    fn run_state(class: PitchClass, matches: u32, config: &StabilizerConfig) -> NoteState {
        if matches >= config.match_threshold {
            NoteState::Confirmed { class }
        } else {
            NoteState::Unconfirmed { class, matches }
        }
    }

    fn bridge_state(class: PitchClass, silent_ticks: u32, config: &StabilizerConfig) -> NoteState {
        if silent_ticks >= config.silence_threshold {
            NoteState::Silent
        } else {
            NoteState::Bridging {
                class,
                silent_ticks,
            }
        }
    }
}

#[cfg(test)]
#[path = "stabilizer_tests.rs"]
mod tests;
