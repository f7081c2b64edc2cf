//! Edge latches - the hand-off between interrupt context and the main loop.
//!
//! A latch is one atomic flag with exactly one writer and one reader:
//!
//! - the interrupt side holds an [`EdgeSetter`] and can only raise the flag
//! - the loop side holds an [`EdgeTaker`] and can only read-and-clear it
//!
//! [`EdgeLatch::split`] hands out the pair at most once. Neither half is
//! `Clone`, and both `set` and `take` need `&mut self`, so a shared reference
//! to a setter cannot write and one setter cannot be used from two contexts
//! at once. The setter never clears and the taker never sets, and `take` is a
//! single atomic swap, so an edge raised at any point is observed exactly once.
//!
//! ```
//! use joystick_2048_input::EdgeLatch;
//!
//! static BUTTON: EdgeLatch = EdgeLatch::new();
//!
//! let (mut setter, mut taker) = BUTTON.split().unwrap();
//! assert!(!taker.take());
//! setter.set();
//! setter.set(); // a second edge before consumption is not counted twice
//! assert!(taker.take());
//! assert!(!taker.take());
//! assert!(BUTTON.split().is_none());
//! ```
//!
//! A setter shared between threads is read-only:
//!
//! ```compile_fail
//! use joystick_2048_input::EdgeLatch;
//!
//! let latch = EdgeLatch::new();
//! let (setter, _taker) = latch.split().unwrap();
//! let shared = &setter;
//! std::thread::scope(|s| {
//!     s.spawn(|| shared.set());
//!     shared.set();
//! });
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use crate::types::EdgeEvent;

/// One edge-triggered flag
#[derive(Debug)]
pub struct EdgeLatch {
    raised: AtomicBool,
    claimed: AtomicBool,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
            claimed: AtomicBool::new(false),
        }
    }

    /// Hand out the producer/consumer pair. Returns None if already split.
    pub fn split(&self) -> Option<(EdgeSetter<'_>, EdgeTaker<'_>)> {
        if self.claimed.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some((EdgeSetter { latch: self }, EdgeTaker { latch: self }))
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt-side half of an [`EdgeLatch`]
#[derive(Debug)]
pub struct EdgeSetter<'a> {
    latch: &'a EdgeLatch,
}

impl EdgeSetter<'_> {
    /// Record an edge. Never reads or clears.
    #[inline]
    pub fn set(&mut self) {
        self.latch.raised.store(true, Ordering::Release);
    }
}

/// Loop-side half of an [`EdgeLatch`]
#[derive(Debug)]
pub struct EdgeTaker<'a> {
    latch: &'a EdgeLatch,
}

impl EdgeTaker<'_> {
    /// Read and clear in one atomic step. True if an edge was pending.
    #[inline]
    pub fn take(&mut self) -> bool {
        self.latch.raised.swap(false, Ordering::AcqRel)
    }
}

/// The three discrete-input latches of the board
#[derive(Debug, Default)]
pub struct EdgeLatches {
    latches: [EdgeLatch; 3],
}

impl EdgeLatches {
    pub const fn new() -> Self {
        Self {
            latches: [EdgeLatch::new(), EdgeLatch::new(), EdgeLatch::new()],
        }
    }

    pub fn latch(&self, event: EdgeEvent) -> &EdgeLatch {
        &self.latches[event.index()]
    }

    /// Split all three latches. Returns None if any of them was already split.
    pub fn split(&self) -> Option<(EdgeProducers<'_>, EdgeConsumers<'_>)> {
        let [force_loss, toggle_sound, confirm] = &self.latches;
        let (fs, ft) = force_loss.split()?;
        let (ss, st) = toggle_sound.split()?;
        let (cs, ct) = confirm.split()?;
        Some((
            EdgeProducers {
                setters: [fs, ss, cs],
            },
            EdgeConsumers {
                takers: [ft, st, ct],
            },
        ))
    }
}

/// Interrupt-side handles for every discrete input
#[derive(Debug)]
pub struct EdgeProducers<'a> {
    setters: [EdgeSetter<'a>; 3],
}

impl EdgeProducers<'_> {
    #[inline]
    pub fn signal(&mut self, event: EdgeEvent) {
        self.setters[event.index()].set();
    }
}

/// Loop-side handles for every discrete input
#[derive(Debug)]
pub struct EdgeConsumers<'a> {
    takers: [EdgeTaker<'a>; 3],
}

impl EdgeConsumers<'_> {
    #[inline]
    pub fn take(&mut self, event: EdgeEvent) -> bool {
        self.takers[event.index()].take()
    }
}
