//! TerminalFrontend: the board's displays, LEDs and delay on a terminal.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::core::GameSnapshot;
use crate::engine::{Delay, Indicators, Renderer, ScoreDisplay};
use crate::fb::FrameBuffer;
use crate::grid_view::{GridView, PanelState, Viewport};
use crate::renderer::TerminalRenderer;
use crate::types::Notice;

/// Implements every controller port by redrawing one terminal frame.
///
/// The ports are infallible, so the first I/O error is parked here and
/// handed out by [`take_error`](Self::take_error). Later frames are still
/// attempted.
pub struct TerminalFrontend<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: GridView,
    fb: FrameBuffer,
    viewport: Viewport,
    snapshot: GameSnapshot,
    panel: PanelState,
    error: Option<anyhow::Error>,
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(renderer: TerminalRenderer<W>, viewport: Viewport) -> Self {
        Self {
            renderer,
            view: GridView::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            snapshot: GameSnapshot::default(),
            panel: PanelState::default(),
            error: None,
        }
    }

    pub fn with_view(mut self, view: GridView) -> Self {
        self.view = view;
        self
    }

    /// Terminal size changed: full redraw at the new size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.renderer.invalidate();
        self.refresh();
    }

    pub fn redraw(&mut self) -> Result<()> {
        self.view
            .render_into(&self.snapshot, &self.panel, self.viewport, &mut self.fb);
        self.renderer.present(&self.fb)
    }

    /// First I/O error since the last call, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.renderer
    }

    fn refresh(&mut self) {
        if let Err(err) = self.redraw() {
            self.error.get_or_insert(err);
        }
    }
}

impl<W: Write> Renderer for TerminalFrontend<W> {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.snapshot = *snapshot;
        self.refresh();
    }

    fn notice(&mut self, notice: Notice) {
        self.panel.notice = Some(notice);
        self.refresh();
    }
}

impl<W: Write> ScoreDisplay for TerminalFrontend<W> {
    fn show_score(&mut self, score: u32) {
        if self.panel.score_display != score {
            self.panel.score_display = score;
            self.refresh();
        }
    }

    fn show_high_score(&mut self, high_score: u32) {
        self.panel.high_score_display = high_score;
        self.refresh();
    }
}

impl<W: Write> Indicators for TerminalFrontend<W> {
    fn set_sound_indicator(&mut self, enabled: bool) {
        self.panel.sound_light = enabled;
        self.refresh();
    }

    fn set_alert_lights(&mut self, lit: bool) {
        if self.panel.alert_lit != lit {
            self.panel.alert_lit = lit;
            self.refresh();
        }
    }
}

impl<W: Write> Delay for TerminalFrontend<W> {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}
