//! Simulated edge-interrupt controller for host builds.
//!
//! On the board a button edge sets a hardware pending bit; while the port
//! interrupt is enabled the handler runs and raises the matching
//! [`EdgeLatch`](crate::EdgeLatch). While it is disabled (the audio critical
//! section) the pending bit waits and the handler runs once the enable bit
//! comes back.
//!
//! The host model has two halves:
//!
//! - [`EdgeIrqGate`] is the controller register: enable bit, pending bits and
//!   an in-handler bit in one atomic word. The main loop only masks and
//!   unmasks it.
//! - [`EdgeIrqHandler`] owns the [`EdgeProducers`] and lives on the thread
//!   playing interrupt context. It is the only code that sets a latch.
//!
//! The handler claims pending bits and marks itself running in one
//! compare-exchange that also checks the enable bit, and `mask` waits for a
//! running handler to finish. Once `mask` returns no latch is set until
//! `unmask`, just as a disabled interrupt cannot fire on the board.

use std::hint::spin_loop;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::latch::EdgeProducers;
use crate::types::EdgeEvent;

const ENABLED: u8 = 0x80;
const IN_HANDLER: u8 = 0x40;
const PENDING: u8 = 0x07;

#[derive(Debug)]
pub struct EdgeIrqGate {
    state: AtomicU8,
}

impl EdgeIrqGate {
    /// Gate starts unmasked with nothing pending
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(ENABLED),
        }
    }

    /// Bind the interrupt handler to this gate.
    pub fn attach<'a>(&'a self, producers: EdgeProducers<'a>) -> EdgeIrqHandler<'a> {
        EdgeIrqHandler { gate: self, producers }
    }

    /// Disable the edge interrupt. Returns once no handler is running.
    pub fn mask(&self) {
        self.state.fetch_and(!ENABLED, Ordering::AcqRel);
        while self.state.load(Ordering::Acquire) & IN_HANDLER != 0 {
            spin_loop();
        }
    }

    /// Re-enable the edge interrupt. Held edges are delivered by the
    /// handler's next [`service`](EdgeIrqHandler::service).
    pub fn unmask(&self) {
        self.state.fetch_or(ENABLED, Ordering::AcqRel);
    }

    pub fn is_masked(&self) -> bool {
        self.state.load(Ordering::Acquire) & ENABLED == 0
    }

    /// Edges waiting for the handler, as a bitmask
    pub fn pending(&self) -> u8 {
        self.state.load(Ordering::Acquire) & PENDING
    }
}

impl Default for EdgeIrqGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt-context half of the gate
#[derive(Debug)]
pub struct EdgeIrqHandler<'a> {
    gate: &'a EdgeIrqGate,
    producers: EdgeProducers<'a>,
}

impl<'a> EdgeIrqHandler<'a> {
    pub fn gate(&self) -> &'a EdgeIrqGate {
        self.gate
    }

    /// A physical edge on `event`'s input pin
    pub fn raise(&mut self, event: EdgeEvent) {
        self.gate.state.fetch_or(event.bit(), Ordering::AcqRel);
        self.service();
    }

    /// Run the handler if the interrupt is enabled and edges are pending.
    /// Returns the bits delivered.
    pub fn service(&mut self) -> u8 {
        let state = &self.gate.state;
        let mut current = state.load(Ordering::Acquire);
        let bits = loop {
            if current & ENABLED == 0 || current & PENDING == 0 {
                return 0;
            }
            match state.compare_exchange_weak(
                current,
                (current & !PENDING) | IN_HANDLER,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break current & PENDING,
                Err(now) => current = now,
            }
        };

        for event in EdgeEvent::ALL {
            if bits & event.bit() != 0 {
                self.producers.signal(event);
            }
        }
        state.fetch_and(!IN_HANDLER, Ordering::Release);
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latch::EdgeLatches;

    #[test]
    fn test_unmasked_gate_delivers_immediately() {
        let bank = EdgeLatches::new();
        let (producers, mut consumers) = bank.split().unwrap();
        let gate = EdgeIrqGate::new();
        let mut irq = gate.attach(producers);

        irq.raise(EdgeEvent::Confirm);
        assert_eq!(gate.pending(), 0);
        assert!(consumers.take(EdgeEvent::Confirm));
    }

    #[test]
    fn test_masked_gate_never_sets_a_latch() {
        let bank = EdgeLatches::new();
        let (producers, mut consumers) = bank.split().unwrap();
        let gate = EdgeIrqGate::new();
        let mut irq = gate.attach(producers);

        gate.mask();
        assert!(gate.is_masked());
        irq.raise(EdgeEvent::ToggleSound);
        irq.raise(EdgeEvent::ForceLoss);
        irq.raise(EdgeEvent::ToggleSound);
        assert_eq!(irq.service(), 0);
        for event in EdgeEvent::ALL {
            assert!(!consumers.take(event), "{:?} set while masked", event);
        }
        assert_eq!(gate.pending(), EdgeEvent::ToggleSound.bit() | EdgeEvent::ForceLoss.bit());
    }

    #[test]
    fn test_unmask_leaves_delivery_to_the_handler() {
        let bank = EdgeLatches::new();
        let (producers, mut consumers) = bank.split().unwrap();
        let gate = EdgeIrqGate::new();
        let mut irq = gate.attach(producers);

        gate.mask();
        irq.raise(EdgeEvent::Confirm);
        gate.unmask();
        assert!(!gate.is_masked());
        assert!(!consumers.take(EdgeEvent::Confirm));
        assert_eq!(gate.pending(), EdgeEvent::Confirm.bit());

        assert_eq!(irq.service(), EdgeEvent::Confirm.bit());
        assert!(consumers.take(EdgeEvent::Confirm));
        assert!(!consumers.take(EdgeEvent::Confirm));
        assert_eq!(gate.pending(), 0);
        assert_eq!(irq.service(), 0);
    }
}
