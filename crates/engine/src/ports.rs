//! Collaborator traits the controller drives.
//!
//! On the board these are the LCD, the seven-segment score display, the LEDs
//! and the millisecond delay. On the host a terminal front end implements all
//! of them.

use joystick_2048_core::GameSnapshot;
use joystick_2048_types::Notice;

/// Draws the board
pub trait Renderer {
    /// Called after a move, a reset, a forced loss and on entering the wait.
    fn render(&mut self, snapshot: &GameSnapshot);

    /// Operator-facing message. Ignored unless overridden.
    fn notice(&mut self, _notice: Notice) {}
}

/// Numeric displays
pub trait ScoreDisplay {
    /// `score` is already clamped to the four-digit display
    fn show_score(&mut self, score: u32);
    fn show_high_score(&mut self, high_score: u32);
}

/// Status LEDs
pub trait Indicators {
    fn set_sound_indicator(&mut self, enabled: bool);
    fn set_alert_lights(&mut self, lit: bool);
}

/// Blocking delay used by the continue wait
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Everything the controller needs from the outside world
pub trait Frontend: Renderer + ScoreDisplay + Indicators + Delay {}

impl<T: Renderer + ScoreDisplay + Indicators + Delay + ?Sized> Frontend for T {}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn render(&mut self, snapshot: &GameSnapshot) {
        (**self).render(snapshot)
    }
    fn notice(&mut self, notice: Notice) {
        (**self).notice(notice)
    }
}

impl<T: ScoreDisplay + ?Sized> ScoreDisplay for &mut T {
    fn show_score(&mut self, score: u32) {
        (**self).show_score(score)
    }
    fn show_high_score(&mut self, high_score: u32) {
        (**self).show_high_score(high_score)
    }
}

impl<T: Indicators + ?Sized> Indicators for &mut T {
    fn set_sound_indicator(&mut self, enabled: bool) {
        (**self).set_sound_indicator(enabled)
    }
    fn set_alert_lights(&mut self, lit: bool) {
        (**self).set_alert_lights(lit)
    }
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
