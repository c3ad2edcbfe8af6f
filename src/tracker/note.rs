// PitchClass - equal-tempered pitch class names
//
// Maps a fundamental frequency estimate to one of the 12 pitch classes,
// independent of octave. The reference is A4 = 440 Hz at MIDI note 69.

use std::fmt;

/// Label displayed when no note is held
pub const NO_NOTE_LABEL: &str = "--";

/// One of the 12 equal-tempered pitch classes, octave-independent
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// Derive the pitch class from a fundamental frequency in Hz
    ///
    /// Rounds `12 * log2(f / 440) + 69` to the nearest MIDI note and reduces
    /// it modulo 12. Non-finite or non-positive frequencies have no pitch
    /// class and return `None`; callers treat them as silence.
    pub fn from_frequency(frequency: f32) -> Option<PitchClass> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return None;
        }
        let midi_note = (12.0 * (frequency / 440.0).log2() + 69.0).round() as i64;
        Some(PitchClass::from_index(midi_note.rem_euclid(12) as usize))
    }

    /// Pitch class for a semitone index in [0, 11] (0 = C)
    ///
    /// Indices outside the range are reduced modulo 12.
    pub fn from_index(index: usize) -> PitchClass {
        match index % 12 {
            0 => PitchClass::C,
            1 => PitchClass::CSharp,
            2 => PitchClass::D,
            3 => PitchClass::DSharp,
            4 => PitchClass::E,
            5 => PitchClass::F,
            6 => PitchClass::FSharp,
            7 => PitchClass::G,
            8 => PitchClass::GSharp,
            9 => PitchClass::A,
            10 => PitchClass::ASharp,
            11 => PitchClass::B,
            _ => unreachable!(),
        }
    }

    /// Semitone index in [0, 11] (0 = C)
    pub fn index(&self) -> usize {
        match self {
            PitchClass::C => 0,
            PitchClass::CSharp => 1,
            PitchClass::D => 2,
            PitchClass::DSharp => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::FSharp => 6,
            PitchClass::G => 7,
            PitchClass::GSharp => 8,
            PitchClass::A => 9,
            PitchClass::ASharp => 10,
            PitchClass::B => 11,
        }
    }

    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Render an optional held note the way the display does, with `--`
    /// standing in for silence
    pub fn label(note: Option<PitchClass>) -> &'static str {
        match note {
            Some(class) => class.name(),
            None => NO_NOTE_LABEL,
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
