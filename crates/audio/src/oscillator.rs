//! Tone-timer interrupt body.

use crate::sequencer::ActiveNote;

/// Speaker output line
pub trait SpeakerPin {
    fn set_level(&mut self, high: bool);
}

/// Square-wave generator driven by the tone timer.
///
/// Each timer tick reads the active note and flips the speaker. A zero code
/// is a rest: the pin is held low.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ToneOscillator {
    level: bool,
}

impl ToneOscillator {
    pub const fn new() -> Self {
        Self { level: false }
    }

    pub fn level(&self) -> bool {
        self.level
    }

    /// Run one tick. Returns the reload value for the next tick, or `None`
    /// while resting.
    pub fn on_timer_interrupt<P: SpeakerPin>(&mut self, note: &ActiveNote, pin: &mut P) -> Option<u16> {
        let code = note.read();
        if code == 0 {
            self.level = false;
            pin.set_level(false);
            return None;
        }
        self.level = !self.level;
        pin.set_level(self.level);
        Some(code)
    }
}
