//! Game loop controller - the session state machine
//!
//! Owns the grid, score and session state. Everything else arrives through
//! borrowed or injected collaborators: the stick, the loop side of the edge
//! latches, the front end and the tone player.

use tracing::{debug, info, trace, warn};

use joystick_2048_audio::{TonePlayer, GAME_OVER_JINGLE, MERGE_JINGLE};
use joystick_2048_core::{display_score, GameSnapshot, Grid, Scoreboard, SimpleRng};
use joystick_2048_input::{decode_direction, AnalogStick, DeadZone, DirectionTracker, EdgeConsumers};
use joystick_2048_types::{Direction, EdgeEvent, Notice, SessionState, CONTINUE_POLL_MS};

use crate::blink::BlinkTimer;
use crate::ports::Frontend;

/// Boot-time settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub seed: u32,
    pub dead_zone: DeadZone,
    pub sound_enabled: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            dead_zone: DeadZone::default(),
            sound_enabled: true,
        }
    }
}

/// Result of [`GameLoopController::step_until`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The iteration ran to completion
    Stepped(SessionState),
    /// The cancel predicate fired during the continue wait
    Cancelled,
}

pub struct GameLoopController<'a, S, F, A> {
    grid: Grid,
    seed: u32,
    rng: SimpleRng,
    scoreboard: Scoreboard,
    state: SessionState,
    stick: S,
    dead_zone: DeadZone,
    tracker: DirectionTracker,
    edges: EdgeConsumers<'a>,
    frontend: F,
    audio: A,
    sound_enabled: bool,
    blink: BlinkTimer,
    last_gain: u32,
    started: bool,
}

impl<'a, S, F, A> GameLoopController<'a, S, F, A>
where
    S: AnalogStick,
    F: Frontend,
    A: TonePlayer,
{
    pub fn new(config: ControllerConfig, stick: S, edges: EdgeConsumers<'a>, frontend: F, audio: A) -> Self {
        Self {
            grid: Grid::new(),
            seed: config.seed,
            rng: SimpleRng::new(config.seed),
            scoreboard: Scoreboard::new(),
            state: SessionState::Playing,
            stick,
            dead_zone: config.dead_zone,
            tracker: DirectionTracker::new(),
            edges,
            frontend,
            audio,
            sound_enabled: config.sound_enabled,
            blink: BlinkTimer::new(),
            last_gain: 0,
            started: false,
        }
    }

    /// Preload a board. `start` keeps it instead of dealing two tiles.
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    /// Deal the first board and light the displays. Idempotent.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if self.grid.tile_count() == 0 {
            self.deal();
        }
        info!(seed = self.seed, sound = self.sound_enabled, "session start");
        self.frontend.set_sound_indicator(self.sound_enabled);
        self.frontend.show_score(display_score(self.scoreboard.score()));
        self.frontend.show_high_score(self.scoreboard.high_score());
        self.render();
    }

    /// Run one iteration of the current state.
    ///
    /// Blocks inside the continue wait until confirm arrives.
    pub fn step(&mut self) -> SessionState {
        match self.step_until(|| false) {
            WaitOutcome::Stepped(state) => state,
            WaitOutcome::Cancelled => self.state,
        }
    }

    /// Like [`step`](Self::step), but the continue wait also returns once
    /// `cancel` reports true. Cancelling leaves the state untouched.
    pub fn step_until<C: FnMut() -> bool>(&mut self, mut cancel: C) -> WaitOutcome {
        self.start();
        match self.state {
            SessionState::Playing => self.play_iteration(),
            SessionState::AwaitingContinue => {
                if !self.wait_for_confirm(&mut cancel) {
                    return WaitOutcome::Cancelled;
                }
            }
            SessionState::Resetting => self.reset_board(),
        }
        WaitOutcome::Stepped(self.state)
    }

    /// The board's main loop.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(
            &self.grid,
            self.state,
            &self.scoreboard,
            self.last_gain,
            self.sound_enabled,
        )
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Seed the tile RNG was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scoreboard.high_score()
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    fn play_iteration(&mut self) {
        let current = decode_direction(self.stick.sample(), self.dead_zone);
        let fresh = self.tracker.register(current);
        self.frontend.show_score(display_score(self.scoreboard.score()));

        if self.edges.take(EdgeEvent::ForceLoss) {
            self.force_loss();
        }
        if self.edges.take(EdgeEvent::ToggleSound) {
            self.toggle_sound();
        }
        if self.state == SessionState::Playing && self.edges.take(EdgeEvent::Confirm) {
            trace!("confirm ignored while playing");
        }

        if let Some(direction) = fresh {
            if self.state == SessionState::Playing {
                self.slide(direction);
            }
        }
    }

    fn slide(&mut self, direction: Direction) {
        self.frontend.notice(Notice::Slide(direction));
        let outcome = self.grid.apply_move(direction);
        if !outcome.applied {
            debug!(direction = direction.as_str(), "move rejected");
            self.frontend.notice(Notice::MoveRejected(direction));
            return;
        }

        debug!(direction = direction.as_str(), gained = outcome.score_delta, "move applied");
        self.scoreboard.add(outcome.score_delta);
        self.last_gain = outcome.score_delta;
        if outcome.score_delta > 0 && self.sound_enabled {
            self.audio.play_jingle(&MERGE_JINGLE);
        }
        if self.grid.spawn_tile(&mut self.rng).is_none() {
            warn!("applied move left no empty cell");
        }
        self.render();
        self.frontend.notice(Notice::ScoreGained {
            added: outcome.score_delta,
            total: self.scoreboard.score(),
        });

        if self.grid.is_terminal() {
            self.finish_session();
        }
    }

    fn force_loss(&mut self) {
        info!("forced loss");
        self.grid.fill_losing_pattern();
        self.render();
        if self.grid.is_terminal() {
            self.finish_session();
        }
    }

    fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        debug!(enabled = self.sound_enabled, "sound toggled");
        self.frontend.set_sound_indicator(self.sound_enabled);
        self.frontend.notice(Notice::SoundToggled(self.sound_enabled));
    }

    fn finish_session(&mut self) {
        let final_score = self.scoreboard.score();
        let new_high = self.scoreboard.close_session();
        let high_score = self.scoreboard.high_score();
        info!(final_score, high_score, new_high, max_tile = self.grid.max_tile(), "session over");

        if new_high {
            self.frontend.notice(Notice::NewHighScore(high_score));
        }
        self.frontend.show_high_score(high_score);
        if self.sound_enabled {
            self.audio.play_jingle(&GAME_OVER_JINGLE);
        }
        if self.edges.take(EdgeEvent::Confirm) {
            trace!("dropped stale confirm");
        }
        self.frontend.notice(Notice::GameOver);

        self.state = SessionState::AwaitingContinue;
        self.blink.reset();
        self.render();
    }

    /// Returns false if cancelled before confirm arrived.
    fn wait_for_confirm<C: FnMut() -> bool>(&mut self, cancel: &mut C) -> bool {
        loop {
            let lit = self.blink.advance();
            self.frontend.set_alert_lights(lit);
            self.frontend.delay_ms(CONTINUE_POLL_MS);

            if self.edges.take(EdgeEvent::Confirm) {
                self.frontend.set_alert_lights(false);
                self.state = SessionState::Resetting;
                return true;
            }
            if cancel() {
                return false;
            }
        }
    }

    fn reset_board(&mut self) {
        self.grid.clear();
        self.deal();
        self.last_gain = 0;
        self.state = SessionState::Playing;
        info!("new game");
        self.render();
        self.frontend.notice(Notice::NewGame);
    }

    fn deal(&mut self) {
        for _ in 0..2 {
            if self.grid.spawn_tile(&mut self.rng).is_none() {
                warn!("no empty cell while dealing");
            }
        }
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.frontend.render(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Delay, Indicators, Renderer, ScoreDisplay};
    use joystick_2048_input::{EdgeLatches, EdgeProducers, StickSample};

    #[derive(Default)]
    struct ScriptStick {
        script: Vec<Direction>,
    }

    impl ScriptStick {
        fn push(&mut self, direction: Direction) {
            self.script.insert(0, direction);
        }
    }

    impl AnalogStick for ScriptStick {
        fn sample(&mut self) -> StickSample {
            StickSample::toward(self.script.pop().unwrap_or(Direction::None))
        }
    }

    #[derive(Default)]
    struct Panel<'a> {
        renders: Vec<GameSnapshot>,
        notices: Vec<Notice>,
        scores: Vec<u32>,
        high_scores: Vec<u32>,
        sound_light: Option<bool>,
        alert: Vec<bool>,
        delays: u32,
        /// Pressed on the Nth delay of the continue wait
        confirm_at: Option<(u32, EdgeProducers<'a>)>,
    }

    impl Renderer for Panel<'_> {
        fn render(&mut self, snapshot: &GameSnapshot) {
            self.renders.push(*snapshot);
        }
        fn notice(&mut self, notice: Notice) {
            self.notices.push(notice);
        }
    }

    impl ScoreDisplay for Panel<'_> {
        fn show_score(&mut self, score: u32) {
            self.scores.push(score);
        }
        fn show_high_score(&mut self, high_score: u32) {
            self.high_scores.push(high_score);
        }
    }

    impl Indicators for Panel<'_> {
        fn set_sound_indicator(&mut self, enabled: bool) {
            self.sound_light = Some(enabled);
        }
        fn set_alert_lights(&mut self, lit: bool) {
            self.alert.push(lit);
        }
    }

    impl Delay for Panel<'_> {
        fn delay_ms(&mut self, ms: u32) {
            assert_eq!(ms, CONTINUE_POLL_MS);
            self.delays += 1;
            if let Some((at, producers)) = &mut self.confirm_at {
                if self.delays == *at {
                    producers.signal(EdgeEvent::Confirm);
                }
            }
        }
    }

    #[derive(Default)]
    struct Tones {
        played: Vec<u16>,
    }

    impl TonePlayer for Tones {
        fn play_tone(&mut self, code: u16, _duration_ms: u32) {
            self.played.push(code);
        }
    }

    fn row(cells: [u32; 4]) -> Grid {
        Grid::from_cells([cells, [0; 4], [0; 4], [0; 4]])
    }

    #[test]
    fn test_start_deals_two_tiles_once() {
        let latches = EdgeLatches::new();
        let (_producers, consumers) = latches.split().unwrap();
        let mut ctl = GameLoopController::new(
            ControllerConfig::default(),
            ScriptStick::default(),
            consumers,
            Panel::default(),
            Tones::default(),
        );
        ctl.start();
        ctl.start();
        assert_eq!(ctl.grid().tile_count(), 2);
        assert_eq!(ctl.frontend().renders.len(), 1);
        assert_eq!(ctl.frontend().sound_light, Some(true));
    }

    #[test]
    fn test_seed_survives_the_first_deal() {
        let latches = EdgeLatches::new();
        let (_producers, consumers) = latches.split().unwrap();
        let mut ctl = GameLoopController::new(
            ControllerConfig {
                seed: 0xC0FFEE,
                ..ControllerConfig::default()
            },
            ScriptStick::default(),
            consumers,
            Panel::default(),
            Tones::default(),
        );
        ctl.start();
        assert_eq!(ctl.grid().tile_count(), 2);
        assert_eq!(ctl.seed(), 0xC0FFEE);
    }

    #[test]
    fn test_held_stick_moves_once() {
        let latches = EdgeLatches::new();
        let (_producers, consumers) = latches.split().unwrap();
        let mut stick = ScriptStick::default();
        stick.push(Direction::Left);
        stick.push(Direction::Left);
        stick.push(Direction::Left);
        let mut ctl = GameLoopController::new(
            ControllerConfig::default(),
            stick,
            consumers,
            Panel::default(),
            Tones::default(),
        )
        .with_grid(row([0, 2, 0, 2]));

        for _ in 0..3 {
            assert_eq!(ctl.step(), SessionState::Playing);
        }
        assert_eq!(ctl.grid().get(0, 0), Some(4));
        assert_eq!(ctl.score(), 4);
        let slides = ctl
            .frontend()
            .notices
            .iter()
            .filter(|n| matches!(n, Notice::Slide(_)))
            .count();
        assert_eq!(slides, 1);
        assert_eq!(ctl.audio().played, vec![957, 1277, 760]);
    }

    #[test]
    fn test_rejected_move_keeps_board() {
        let latches = EdgeLatches::new();
        let (_producers, consumers) = latches.split().unwrap();
        let mut stick = ScriptStick::default();
        stick.push(Direction::Left);
        let before = row([2, 4, 0, 0]);
        let mut ctl = GameLoopController::new(
            ControllerConfig::default(),
            stick,
            consumers,
            Panel::default(),
            Tones::default(),
        )
        .with_grid(before);

        ctl.step();
        assert_eq!(ctl.grid(), &before);
        assert_eq!(
            ctl.frontend().notices,
            vec![Notice::Slide(Direction::Left), Notice::MoveRejected(Direction::Left)]
        );
    }

    #[test]
    fn test_toggle_sound_mutes_jingles() {
        let latches = EdgeLatches::new();
        let (mut producers, consumers) = latches.split().unwrap();
        let mut stick = ScriptStick::default();
        stick.push(Direction::None);
        stick.push(Direction::Left);
        let mut ctl = GameLoopController::new(
            ControllerConfig::default(),
            stick,
            consumers,
            Panel::default(),
            Tones::default(),
        )
        .with_grid(row([2, 2, 0, 0]));

        producers.signal(EdgeEvent::ToggleSound);
        ctl.step();
        assert!(!ctl.sound_enabled());
        assert_eq!(ctl.frontend().sound_light, Some(false));

        ctl.step();
        assert_eq!(ctl.score(), 4);
        assert!(ctl.audio().played.is_empty());
    }

    #[test]
    fn test_force_loss_then_confirm_resets() {
        let latches = EdgeLatches::new();
        let (mut producers, consumers) = latches.split().unwrap();
        producers.signal(EdgeEvent::ForceLoss);

        let panel = Panel {
            confirm_at: Some((3, producers)),
            ..Panel::default()
        };
        let mut ctl = GameLoopController::new(
            ControllerConfig::default(),
            ScriptStick::default(),
            consumers,
            panel,
            Tones::default(),
        )
        .with_grid(row([8, 8, 0, 0]));

        assert_eq!(ctl.step(), SessionState::AwaitingContinue);
        assert!(ctl.grid().is_terminal());
        assert!(ctl.frontend().notices.contains(&Notice::GameOver));
        assert_eq!(ctl.audio().played.len(), GAME_OVER_JINGLE.len());

        assert_eq!(ctl.step(), SessionState::Resetting);
        assert_eq!(ctl.frontend().delays, 3);
        assert_eq!(ctl.frontend().alert, vec![true, true, true, false]);

        assert_eq!(ctl.step(), SessionState::Playing);
        assert_eq!(ctl.grid().tile_count(), 2);
        assert_eq!(ctl.frontend().notices.last(), Some(&Notice::NewGame));
    }

    #[test]
    fn test_cancel_leaves_wait_state() {
        let latches = EdgeLatches::new();
        let (mut producers, consumers) = latches.split().unwrap();
        let mut ctl = GameLoopController::new(
            ControllerConfig {
                sound_enabled: false,
                ..ControllerConfig::default()
            },
            ScriptStick::default(),
            consumers,
            Panel::default(),
            Tones::default(),
        );

        producers.signal(EdgeEvent::ForceLoss);
        ctl.step();
        assert_eq!(ctl.state(), SessionState::AwaitingContinue);

        let mut polls = 0;
        let outcome = ctl.step_until(|| {
            polls += 1;
            polls == 5
        });
        assert_eq!(outcome, WaitOutcome::Cancelled);
        assert_eq!(ctl.state(), SessionState::AwaitingContinue);
        assert_eq!(ctl.frontend().delays, 5);
    }
}
