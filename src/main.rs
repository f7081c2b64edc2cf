//! Terminal simulator for the joystick 2048 board (default binary).
//!
//! The keyboard stands in for the stick and the three buttons. A reader
//! thread plays the part of the edge interrupt; the main thread runs the
//! game loop controller against a terminal front end.

use std::fs::File;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use joystick_2048::audio::{ActiveNote, AudioSequencer};
use joystick_2048::config::SimConfig;
use joystick_2048::engine::{GameLoopController, WaitOutcome};
use joystick_2048::host::HostToneHardware;
use joystick_2048::input::{map_key_event, EdgeIrqGate, EdgeIrqHandler, EdgeLatches, HostInput, SpringStick};
use joystick_2048::term::{TerminalFrontend, TerminalRenderer, Viewport};

static EDGE_LATCHES: EdgeLatches = EdgeLatches::new();
static EDGE_IRQ: EdgeIrqGate = EdgeIrqGate::new();
static ACTIVE_NOTE: ActiveNote = ActiveNote::new();

const INPUT_POLL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    let config = SimConfig::from_env();
    init_logging(&config)?;

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut frontend = TerminalFrontend::new(TerminalRenderer::stdout(), Viewport::new(w, h));
    frontend.renderer_mut().enter()?;

    let result = run(&config, &mut frontend);

    // Always try to restore terminal state.
    let _ = frontend.renderer_mut().exit();
    if let Err(err) = &result {
        error!(error = %err, "simulator stopped");
    }
    result
}

fn init_logging(config: &SimConfig) -> Result<()> {
    // Raw mode owns the terminal, so logs only go to a file.
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("installing log subscriber: {err}"))
}

fn run(config: &SimConfig, frontend: &mut TerminalFrontend) -> Result<()> {
    let (producers, consumers) = EDGE_LATCHES
        .split()
        .context("edge latches already claimed")?;
    let mut irq = EDGE_IRQ.attach(producers);
    let stick = Arc::new(SpringStick::new(config.stick_hold_ms));
    let quit = Arc::new(AtomicBool::new(false));
    let resize = Arc::new(AtomicU32::new(0));

    let reader = thread::spawn({
        let stick = Arc::clone(&stick);
        let quit = Arc::clone(&quit);
        let resize = Arc::clone(&resize);
        move || {
            let result = read_input(&mut irq, &stick, &quit, &resize);
            quit.store(true, Ordering::Release);
            result
        }
    });

    let seed = config.seed.unwrap_or_else(clock_seed);
    info!(seed, "simulator start");
    let audio = AudioSequencer::new(HostToneHardware::new(&EDGE_IRQ, &ACTIVE_NOTE), &ACTIVE_NOTE);
    let mut controller = GameLoopController::new(
        config.controller_config(seed),
        Arc::clone(&stick),
        consumers,
        &mut *frontend,
        audio,
    );

    let period = Duration::from_millis(config.loop_ms);
    let outcome = drive(&mut controller, &quit, &resize, period);
    quit.store(true, Ordering::Release);
    drop(controller);

    let input = reader
        .join()
        .map_err(|_| anyhow!("input thread panicked"))?;
    outcome.and(input)
}

fn drive<S, A>(
    controller: &mut GameLoopController<'_, S, &mut TerminalFrontend, A>,
    quit: &AtomicBool,
    resize: &AtomicU32,
    period: Duration,
) -> Result<()>
where
    S: joystick_2048::input::AnalogStick,
    A: joystick_2048::audio::TonePlayer,
{
    controller.start();
    while !quit.load(Ordering::Acquire) {
        let began = Instant::now();

        if let Some(viewport) = take_resize(resize) {
            controller.frontend_mut().resize(viewport);
        }

        let outcome = controller.step_until(|| quit.load(Ordering::Acquire));
        if let Some(err) = controller.frontend_mut().take_error() {
            return Err(err.context("terminal output failed"));
        }
        if outcome == WaitOutcome::Cancelled {
            break;
        }

        if let Some(rest) = period.checked_sub(began.elapsed()) {
            thread::sleep(rest);
        }
    }
    info!(high_score = controller.high_score(), "simulator quit");
    Ok(())
}

/// The "edge interrupt": key presses become stick deflections and edges.
/// Edges held while the loop had the interrupt masked are delivered on the
/// next pass.
fn read_input(irq: &mut EdgeIrqHandler<'_>, stick: &SpringStick, quit: &AtomicBool, resize: &AtomicU32) -> Result<()> {
    while !quit.load(Ordering::Acquire) {
        irq.service();
        if !event::poll(INPUT_POLL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match map_key_event(key) {
                Some(HostInput::Stick(direction)) => stick.deflect(direction),
                Some(HostInput::Edge(edge)) => irq.raise(edge),
                Some(HostInput::Quit) => quit.store(true, Ordering::Release),
                None => {}
            },
            Event::Resize(w, h) => resize.store(pack_size(w, h), Ordering::Release),
            _ => {}
        }
    }
    Ok(())
}

// 0 means "no pending resize"; a real terminal is never 0x0.
fn pack_size(w: u16, h: u16) -> u32 {
    (u32::from(w) << 16) | u32::from(h)
}

fn take_resize(resize: &AtomicU32) -> Option<Viewport> {
    match resize.swap(0, Ordering::AcqRel) {
        0 => None,
        packed => Some(Viewport::new((packed >> 16) as u16, packed as u16)),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
