//! Pitch table and jingles.
//!
//! A tone code is the tone timer's half-period in timer ticks: the timer
//! interrupt toggles the speaker every `code` ticks. Code 0 is a rest.

/// Speaker pitches available to the jingles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pitch {
    Rest,
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
    D5,
    E5,
    F5,
    G5,
    A5,
    B5,
    C6,
    D6,
}

impl Pitch {
    /// Timer half-period for this pitch
    pub const fn code(self) -> u16 {
        match self {
            Pitch::Rest => 0,
            Pitch::C4 => 2867, // 261.63 Hz
            Pitch::D4 => 2554, // 293.66 Hz
            Pitch::E4 => 2276, // 329.63 Hz
            Pitch::F4 => 2148, // 349.23 Hz
            Pitch::G4 => 1914, // 392.00 Hz
            Pitch::A4 => 1705, // 440.00 Hz
            Pitch::B4 => 1519, // 493.88 Hz
            Pitch::C5 => 1434, // 523.25 Hz
            Pitch::D5 => 1277, // 587.33 Hz
            Pitch::E5 => 1138, // 659.26 Hz
            Pitch::F5 => 1074, // 698.46 Hz
            Pitch::G5 => 957,  // 783.99 Hz
            Pitch::A5 => 853,  // 880.00 Hz
            Pitch::B5 => 760,  // 987.77 Hz
            Pitch::C6 => 717,  // 1046.50 Hz
            Pitch::D6 => 639,  // 1174.66 Hz
        }
    }
}

/// Note lengths in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteLength {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteLength {
    pub const fn ms(self) -> u32 {
        match self {
            NoteLength::Whole => 512,
            NoteLength::Half => 256,
            NoteLength::Quarter => 128,
            NoteLength::Eighth => 64,
            NoteLength::Sixteenth => 32,
        }
    }
}

/// One fixed-length tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tone {
    pub code: u16,
    pub duration_ms: u32,
}

impl Tone {
    pub const fn new(pitch: Pitch, length: NoteLength) -> Self {
        Self {
            code: pitch.code(),
            duration_ms: length.ms(),
        }
    }
}

/// Played after a move that merged at least one pair
pub const MERGE_JINGLE: [Tone; 3] = [
    Tone::new(Pitch::G5, NoteLength::Sixteenth),
    Tone::new(Pitch::D5, NoteLength::Sixteenth),
    Tone::new(Pitch::B5, NoteLength::Eighth),
];

/// Played when the session ends
pub const GAME_OVER_JINGLE: [Tone; 4] = [
    Tone::new(Pitch::D5, NoteLength::Half),
    Tone::new(Pitch::C5, NoteLength::Quarter),
    Tone::new(Pitch::B4, NoteLength::Quarter),
    Tone::new(Pitch::G4, NoteLength::Whole),
];

/// Total blocking time of a jingle
pub fn jingle_ms(tones: &[Tone]) -> u32 {
    tones.iter().map(|t| t.duration_ms).sum()
}
