//! Audio module - jingles on a one-voice tone timer.
//!
//! The main loop plays tones through [`AudioSequencer`], which blocks for the
//! length of each tone with the edge interrupt masked. The timer interrupt
//! runs [`ToneOscillator`] against the shared [`ActiveNote`].

pub mod notes;
pub mod oscillator;
pub mod sequencer;

pub use notes::{jingle_ms, NoteLength, Pitch, Tone, GAME_OVER_JINGLE, MERGE_JINGLE};
pub use oscillator::{SpeakerPin, ToneOscillator};
pub use sequencer::{ActiveNote, AudioSequencer, EdgeMask, TonePlayer, ToneHardware};
