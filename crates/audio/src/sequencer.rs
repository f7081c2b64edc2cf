//! Blocking tone playback from the main loop.
//!
//! Exactly one value crosses into the tone-timer interrupt: the [`ActiveNote`]
//! scalar. The loop writes it only inside an [`EdgeMask`], the critical
//! section that keeps the edge interrupt off for the whole tone, and the timer
//! interrupt only reads it. `ActiveNote::write` takes the mask as a witness,
//! so a write outside the critical section does not compile.

use std::sync::atomic::{AtomicU16, Ordering};

use tracing::trace;

use crate::notes::Tone;

/// Peripheral operations the sequencer drives
pub trait ToneHardware {
    /// Disable the edge-triggered button interrupt
    fn mask_edge_interrupts(&mut self);
    /// Re-enable the edge-triggered button interrupt
    fn unmask_edge_interrupts(&mut self);
    /// Enable the periodic tone-timer interrupt
    fn start_tone_timer(&mut self);
    /// Disable the tone-timer interrupt and silence the speaker
    fn stop_tone_timer(&mut self);
    /// Spin for `ms` milliseconds
    fn busy_wait_ms(&mut self, ms: u32);
}

impl<T: ToneHardware + ?Sized> ToneHardware for &mut T {
    fn mask_edge_interrupts(&mut self) {
        (**self).mask_edge_interrupts()
    }
    fn unmask_edge_interrupts(&mut self) {
        (**self).unmask_edge_interrupts()
    }
    fn start_tone_timer(&mut self) {
        (**self).start_tone_timer()
    }
    fn stop_tone_timer(&mut self) {
        (**self).stop_tone_timer()
    }
    fn busy_wait_ms(&mut self, ms: u32) {
        (**self).busy_wait_ms(ms)
    }
}

/// Critical section: the edge interrupt is masked while this guard lives.
pub struct EdgeMask<'h, H: ToneHardware> {
    hw: &'h mut H,
}

impl<'h, H: ToneHardware> EdgeMask<'h, H> {
    pub fn engage(hw: &'h mut H) -> Self {
        hw.mask_edge_interrupts();
        Self { hw }
    }

    pub fn hardware(&mut self) -> &mut H {
        self.hw
    }
}

impl<H: ToneHardware> Drop for EdgeMask<'_, H> {
    fn drop(&mut self) {
        self.hw.unmask_edge_interrupts();
    }
}

/// The tone code the timer interrupt is currently playing
#[derive(Debug, Default)]
pub struct ActiveNote {
    code: AtomicU16,
}

impl ActiveNote {
    pub const fn new() -> Self {
        Self {
            code: AtomicU16::new(0),
        }
    }

    /// Loop side; only callable inside the critical section
    pub fn write<H: ToneHardware>(&self, _mask: &EdgeMask<'_, H>, code: u16) {
        self.code.store(code, Ordering::Release);
    }

    /// Timer-interrupt side
    #[inline]
    pub fn read(&self) -> u16 {
        self.code.load(Ordering::Acquire)
    }
}

/// Anything that can play a fixed-length tone to completion
pub trait TonePlayer {
    /// Block for `duration_ms` while `code` sounds. Cannot be cancelled.
    fn play_tone(&mut self, code: u16, duration_ms: u32);

    fn play(&mut self, tone: Tone) {
        self.play_tone(tone.code, tone.duration_ms);
    }

    fn play_jingle(&mut self, tones: &[Tone]) {
        for &tone in tones {
            self.play(tone);
        }
    }
}

impl<T: TonePlayer + ?Sized> TonePlayer for &mut T {
    fn play_tone(&mut self, code: u16, duration_ms: u32) {
        (**self).play_tone(code, duration_ms)
    }
}

/// Plays tones through a [`ToneHardware`] and a shared [`ActiveNote`]
pub struct AudioSequencer<'n, H> {
    hw: H,
    note: &'n ActiveNote,
}

impl<'n, H: ToneHardware> AudioSequencer<'n, H> {
    pub fn new(hw: H, note: &'n ActiveNote) -> Self {
        Self { hw, note }
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn into_inner(self) -> H {
        self.hw
    }
}

impl<H: ToneHardware> TonePlayer for AudioSequencer<'_, H> {
    fn play_tone(&mut self, code: u16, duration_ms: u32) {
        trace!(code, duration_ms, "tone");
        let mut mask = EdgeMask::engage(&mut self.hw);
        self.note.write(&mask, code);

        let hw = mask.hardware();
        hw.start_tone_timer();
        hw.busy_wait_ms(duration_ms);
        hw.stop_tone_timer();
        // Edge interrupt comes back when `mask` drops.
    }
}
