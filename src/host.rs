//! Host stand-ins for the board's tone peripherals.
//!
//! `HostToneHardware` masks the simulated edge interrupt for the duration of
//! each tone and runs the tone-timer interrupt body once per millisecond of
//! the busy-wait. It only touches the gate's enable bit; edges held during a
//! tone are delivered later by the input thread. There is no speaker on the
//! host; the pin just counts level changes.

use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::audio::{ActiveNote, SpeakerPin, ToneHardware, ToneOscillator};
use crate::input::EdgeIrqGate;

/// Speaker pin that records edges instead of making sound
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SilentSpeaker {
    level: bool,
    edges: u64,
}

impl SilentSpeaker {
    pub fn edges(&self) -> u64 {
        self.edges
    }
}

impl SpeakerPin for SilentSpeaker {
    fn set_level(&mut self, high: bool) {
        if self.level != high {
            self.edges += 1;
        }
        self.level = high;
    }
}

pub struct HostToneHardware<'a> {
    gate: &'a EdgeIrqGate,
    note: &'a ActiveNote,
    oscillator: ToneOscillator,
    speaker: SilentSpeaker,
    timer_running: bool,
}

impl<'a> HostToneHardware<'a> {
    pub fn new(gate: &'a EdgeIrqGate, note: &'a ActiveNote) -> Self {
        Self {
            gate,
            note,
            oscillator: ToneOscillator::new(),
            speaker: SilentSpeaker::default(),
            timer_running: false,
        }
    }

    pub fn speaker(&self) -> &SilentSpeaker {
        &self.speaker
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }
}

impl ToneHardware for HostToneHardware<'_> {
    fn mask_edge_interrupts(&mut self) {
        self.gate.mask();
    }

    fn unmask_edge_interrupts(&mut self) {
        self.gate.unmask();
    }

    fn start_tone_timer(&mut self) {
        self.timer_running = true;
    }

    fn stop_tone_timer(&mut self) {
        self.timer_running = false;
        self.speaker.set_level(false);
        trace!(edges = self.speaker.edges(), "tone timer stopped");
    }

    fn busy_wait_ms(&mut self, ms: u32) {
        let deadline = Instant::now() + Duration::from_millis(u64::from(ms));
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if self.timer_running {
                self.oscillator.on_timer_interrupt(self.note, &mut self.speaker);
            }
            thread::sleep((deadline - now).min(Duration::from_millis(1)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioSequencer, TonePlayer};
    use crate::input::EdgeLatches;
    use crate::types::EdgeEvent;

    #[test]
    fn test_edges_raised_during_a_tone_arrive_after_it() {
        let latches = EdgeLatches::new();
        let (producers, mut consumers) = latches.split().unwrap();
        let gate = EdgeIrqGate::new();
        let mut irq = gate.attach(producers);
        let note = ActiveNote::new();

        let mut hw = HostToneHardware::new(&gate, &note);
        hw.mask_edge_interrupts();
        irq.raise(EdgeEvent::Confirm);
        assert!(!consumers.take(EdgeEvent::Confirm));
        hw.unmask_edge_interrupts();
        assert!(!consumers.take(EdgeEvent::Confirm));
        irq.service();
        assert!(consumers.take(EdgeEvent::Confirm));
    }

    #[test]
    fn test_tone_toggles_silent_speaker() {
        let gate = EdgeIrqGate::new();
        let note = ActiveNote::new();

        let mut seq = AudioSequencer::new(HostToneHardware::new(&gate, &note), &note);
        seq.play_tone(957, 5);

        let hw = seq.into_inner();
        assert!(!hw.timer_running());
        assert!(hw.speaker().edges() >= 1);
        assert!(!gate.is_masked());
    }
}
