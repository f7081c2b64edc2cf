use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use joystick_2048::audio::TonePlayer;
use joystick_2048::core::{slide_line, GameSnapshot, Grid, SimpleRng};
use joystick_2048::engine::{
    ControllerConfig, Delay, GameLoopController, Indicators, Renderer, ScoreDisplay,
};
use joystick_2048::input::{AnalogStick, EdgeLatches, StickSample};
use joystick_2048::types::{Direction, EdgeEvent, SessionState};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

/// Circles the stick: Left, centre, Up, centre, Right, centre, Down, centre.
struct Circle {
    tick: usize,
}

impl AnalogStick for Circle {
    fn sample(&mut self) -> StickSample {
        const PATH: [Direction; 8] = [
            Direction::Left,
            Direction::None,
            Direction::Up,
            Direction::None,
            Direction::Right,
            Direction::None,
            Direction::Down,
            Direction::None,
        ];
        self.tick += 1;
        StickSample::toward(PATH[self.tick % PATH.len()])
    }
}

/// Hardware with no side effects.
struct Inert;

impl Renderer for Inert {
    fn render(&mut self, _snapshot: &GameSnapshot) {}
}
impl ScoreDisplay for Inert {
    fn show_score(&mut self, _score: u32) {}
    fn show_high_score(&mut self, _high_score: u32) {}
}
impl Indicators for Inert {
    fn set_sound_indicator(&mut self, _enabled: bool) {}
    fn set_alert_lights(&mut self, _lit: bool) {}
}
impl Delay for Inert {
    fn delay_ms(&mut self, _ms: u32) {}
}
impl TonePlayer for Inert {
    fn play_tone(&mut self, _code: u16, _duration_ms: u32) {}
}

#[test]
fn test_grid_hot_paths_do_not_allocate() {
    let mut rng = SimpleRng::new(3);
    let mut grid = Grid::new();
    grid.spawn_tile(&mut rng);

    let allocs = with_alloc_counting(|| {
        for i in 0..500 {
            let dir = Direction::MOVES[i % 4];
            if grid.apply_move(dir).applied {
                grid.spawn_tile(&mut rng);
            }
            if grid.is_terminal() {
                grid.clear();
                grid.spawn_tile(&mut rng);
            }
            let _ = grid.empty_cells();
            let _ = slide_line([2, 2, 4, 4]);
        }
    });

    assert!(allocs == 0);
}

#[test]
fn test_controller_steps_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let latches = EdgeLatches::new();
    let (mut producers, consumers) = latches.split().unwrap();
    let mut ctl = GameLoopController::new(
        ControllerConfig { seed: 11, ..ControllerConfig::default() },
        Circle { tick: 0 },
        consumers,
        Inert,
        Inert,
    );

    // Warm-up: visit every path once.
    ctl.start();
    for _ in 0..16 {
        ctl.step();
    }
    producers.signal(EdgeEvent::ToggleSound);
    ctl.step();
    producers.signal(EdgeEvent::ToggleSound);
    ctl.step();
    producers.signal(EdgeEvent::ForceLoss);
    ctl.step();
    producers.signal(EdgeEvent::Confirm);
    ctl.step();
    ctl.step();

    let allocs = with_alloc_counting(|| {
        for i in 0..2_000 {
            if i % 500 == 499 {
                producers.signal(EdgeEvent::ForceLoss);
            }
            if ctl.state() == SessionState::AwaitingContinue {
                producers.signal(EdgeEvent::Confirm);
            }
            ctl.step();
        }
    });

    assert!(allocs == 0);
}
