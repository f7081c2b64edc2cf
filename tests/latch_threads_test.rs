//! Edge delivery across threads: every edge is observed exactly once.

use std::hint::spin_loop;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use joystick_2048::input::{EdgeIrqGate, EdgeLatch, EdgeLatches};
use joystick_2048::types::EdgeEvent;

const EDGES: usize = 2_000;

#[test]
fn test_latch_handshake_delivers_each_edge_once() {
    let latch = EdgeLatch::new();
    let (mut setter, mut taker) = latch.split().unwrap();
    let acked = AtomicUsize::new(0);

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..EDGES {
                setter.set();
                while acked.load(Ordering::Acquire) <= i {
                    spin_loop();
                }
            }
        });

        let mut seen = 0;
        while seen < EDGES {
            if taker.take() {
                seen += 1;
                acked.store(seen, Ordering::Release);
            }
        }
    });

    assert!(!taker.take());
}

#[test]
fn test_unsynchronised_edges_coalesce_but_are_never_invented() {
    let latches = EdgeLatches::new();
    let (mut producers, mut consumers) = latches.split().unwrap();
    let mut observed = 0usize;

    thread::scope(|s| {
        let producer = s.spawn(|| {
            for _ in 0..EDGES {
                producers.signal(EdgeEvent::ToggleSound);
            }
        });
        while !producer.is_finished() {
            if consumers.take(EdgeEvent::ToggleSound) {
                observed += 1;
            }
        }
    });
    if consumers.take(EdgeEvent::ToggleSound) {
        observed += 1;
    }

    assert!(observed >= 1);
    assert!(observed <= EDGES);
    assert!(!consumers.take(EdgeEvent::ForceLoss));
    assert!(!consumers.take(EdgeEvent::Confirm));
}

#[test]
fn test_masked_edges_survive_mask_unmask_races() {
    let latches = EdgeLatches::new();
    let (producers, mut consumers) = latches.split().unwrap();
    let gate = EdgeIrqGate::new();
    let mut irq = gate.attach(producers);
    let acked = AtomicUsize::new(0);

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..EDGES {
                irq.raise(EdgeEvent::Confirm);
                while acked.load(Ordering::Acquire) <= i {
                    irq.service();
                    spin_loop();
                }
            }
        });

        let mut seen = 0;
        while seen < EDGES {
            gate.mask();
            // Anything set before the mask is drained; nothing may follow it.
            let before = consumers.take(EdgeEvent::Confirm);
            for _ in 0..16 {
                spin_loop();
            }
            assert!(!consumers.take(EdgeEvent::Confirm), "latch set while masked");
            gate.unmask();

            if before || consumers.take(EdgeEvent::Confirm) {
                seen += 1;
                acked.store(seen, Ordering::Release);
            }
        }
    });

    assert!(!gate.is_masked());
    assert_eq!(gate.pending(), 0);
    assert!(!consumers.take(EdgeEvent::Confirm));
}

#[test]
fn test_second_split_is_refused() {
    let latches = EdgeLatches::new();
    let first = latches.split();
    assert!(first.is_some());
    assert!(latches.split().is_none());
}
