//! GridView: draws a `GameSnapshot` and the board's status panel into a
//! framebuffer.
//!
//! Pure (no I/O) and allocation-free once the framebuffer has its size.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Direction, Notice, SessionState, GRID_LEN};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What the board's displays and LEDs currently show.
///
/// Updated by the collaborator calls between renders, so it can lag or lead
/// the snapshot exactly like the physical displays do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    pub score_display: u32,
    pub high_score_display: u32,
    pub sound_light: bool,
    pub alert_lit: bool,
    pub notice: Option<Notice>,
}

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(120, 110, 100);
const EMPTY_BG: Rgb = Rgb::new(160, 148, 136);
const DARK_TEXT: Rgb = Rgb::new(70, 62, 54);
const LIGHT_TEXT: Rgb = Rgb::new(250, 246, 242);

const TITLE: &str = "JOYSTICK 2048";
const HELP: &str = "arrows/wasd move  space confirm  m sound  f lose  q quit";
const PANEL_ROWS: u16 = 5;

pub struct GridView {
    tile_w: u16,
    tile_h: u16,
}

impl Default for GridView {
    fn default() -> Self {
        // 7x3 keeps tiles roughly square in most terminal fonts.
        Self { tile_w: 7, tile_h: 3 }
    }
}

impl GridView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
        }
    }

    /// Board frame size including the one-cell gutters between tiles
    pub fn board_size(&self) -> (u16, u16) {
        let n = GRID_LEN as u16;
        (n * self.tile_w + n + 1, n * self.tile_h + n + 1)
    }

    /// Top-left corner of tile `(row, col)` for a given viewport
    pub fn tile_origin(&self, viewport: Viewport, row: usize, col: usize) -> (u16, u16) {
        let (bx, by) = self.board_origin(viewport);
        (
            bx + 1 + col as u16 * (self.tile_w + 1),
            by + 1 + row as u16 * (self.tile_h + 1),
        )
    }

    pub fn render_into(&self, snap: &GameSnapshot, panel: &PanelState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::new(' ', CellStyle::new(LIGHT_TEXT, BACKGROUND)));

        let (bx, by) = self.board_origin(viewport);
        let (bw, bh) = self.board_size();

        let title = CellStyle::new(LIGHT_TEXT, BACKGROUND).bold();
        let title_x = bx + bw.saturating_sub(TITLE.len() as u16) / 2;
        fb.put_str(title_x, by.saturating_sub(1), TITLE, title);

        fb.fill_rect(bx, by, bw, bh, ' ', CellStyle::new(LIGHT_TEXT, BOARD_BG));
        for (row, cells) in snap.cells.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                self.draw_tile(fb, viewport, row, col, value);
            }
        }

        self.draw_panel(fb, snap, panel, bx, by + bh + 1);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, panel: &PanelState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, panel, viewport, &mut fb);
        fb
    }

    fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (bw, bh) = self.board_size();
        // title above, panel below
        let total_h = 1 + bh + 1 + PANEL_ROWS;
        let x = viewport.width.saturating_sub(bw) / 2;
        let y = viewport.height.saturating_sub(total_h) / 2 + 1;
        (x, y)
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, viewport: Viewport, row: usize, col: usize, value: u32) {
        let (x, y) = self.tile_origin(viewport, row, col);
        let style = tile_style(value);
        fb.fill_rect(x, y, self.tile_w, self.tile_h, ' ', style);

        let mid_y = y + self.tile_h / 2;
        if value == 0 {
            fb.put_char(x + self.tile_w / 2, mid_y, '·', style);
            return;
        }
        let digits = value.checked_ilog10().unwrap_or(0) as u16 + 1;
        let text_x = x + self.tile_w.saturating_sub(digits) / 2;
        fb.put_u32(text_x, mid_y, value, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, panel: &PanelState, x: u16, y: u16) {
        let label = CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND).bold();
        let value = CellStyle::new(LIGHT_TEXT, BACKGROUND);
        let dim = value.dim();

        let mut cx = fb.put_str(x, y, "SCORE ", label);
        cx = fb.put_u32_padded(cx, y, panel.score_display, 4, value);
        cx = fb.put_str(cx, y, "   HIGH ", label);
        fb.put_u32_padded(cx, y, panel.high_score_display, 4, value);

        let lamp_on = |rgb| CellStyle::new(rgb, BACKGROUND).bold();
        let lamp_off = CellStyle::new(Rgb::new(70, 70, 70), BACKGROUND);
        let y1 = y + 1;
        cx = fb.put_str(x, y1, "SOUND ", label);
        let sound = if panel.sound_light {
            lamp_on(Rgb::new(80, 220, 120))
        } else {
            lamp_off
        };
        cx = fb.put_str(cx, y1, "●", sound);
        cx = fb.put_str(cx, y1, "   ALERT ", label);
        let alert = if panel.alert_lit {
            lamp_on(Rgb::new(240, 70, 60))
        } else {
            lamp_off
        };
        fb.put_str(cx, y1, "● ● ● ●", alert);

        let state_text = match snap.state {
            SessionState::Playing => "PLAYING",
            SessionState::AwaitingContinue => "GAME OVER - press space",
            SessionState::Resetting => "DEALING",
        };
        let state_style = match snap.state {
            SessionState::AwaitingContinue => lamp_on(Rgb::new(240, 200, 80)),
            _ => value,
        };
        fb.put_str(x, y + 2, state_text, state_style);

        if let Some(notice) = panel.notice {
            draw_notice(fb, x, y + 3, notice, value);
        }

        fb.put_str(x, y + 4, HELP, dim);
    }
}

fn draw_notice(fb: &mut FrameBuffer, x: u16, y: u16, notice: Notice, style: CellStyle) {
    match notice {
        Notice::Slide(direction) => {
            let cx = fb.put_str(x, y, "Slide ", style);
            fb.put_str(cx, y, direction_label(direction), style);
        }
        Notice::MoveRejected(direction) => {
            let cx = fb.put_str(x, y, "Blocked ", style);
            fb.put_str(cx, y, direction_label(direction), style);
        }
        Notice::SoundToggled(true) => {
            fb.put_str(x, y, "Sound Enabled", style);
        }
        Notice::SoundToggled(false) => {
            fb.put_str(x, y, "Sound Disabled", style);
        }
        Notice::ScoreGained { added, total } => {
            let mut cx = fb.put_str(x, y, "+", style);
            cx = fb.put_u32(cx, y, added, style);
            cx = fb.put_str(cx, y, "  score ", style);
            fb.put_u32(cx, y, total, style);
        }
        Notice::NewHighScore(score) => {
            let cx = fb.put_str(x, y, "New high score! ", style.bold());
            fb.put_u32(cx, y, score, style.bold());
        }
        Notice::GameOver => {
            fb.put_str(x, y, "Game Over!", style.bold());
        }
        Notice::NewGame => {
            fb.put_str(x, y, "New game", style);
        }
    }
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::None => "None",
        Direction::Up => "Up",
        Direction::Down => "Down",
        Direction::Left => "Left",
        Direction::Right => "Right",
    }
}

/// Tile colours by value; anything past 2048 shares one dark style.
pub fn tile_style(value: u32) -> CellStyle {
    let (bg, fg) = match value {
        0 => (EMPTY_BG, DARK_TEXT),
        2 => (Rgb::new(238, 228, 218), DARK_TEXT),
        4 => (Rgb::new(237, 224, 200), DARK_TEXT),
        8 => (Rgb::new(242, 177, 121), LIGHT_TEXT),
        16 => (Rgb::new(245, 149, 99), LIGHT_TEXT),
        32 => (Rgb::new(246, 124, 95), LIGHT_TEXT),
        64 => (Rgb::new(246, 94, 59), LIGHT_TEXT),
        128 => (Rgb::new(237, 207, 114), LIGHT_TEXT),
        256 => (Rgb::new(237, 204, 97), LIGHT_TEXT),
        512 => (Rgb::new(237, 200, 80), LIGHT_TEXT),
        1024 => (Rgb::new(237, 197, 63), LIGHT_TEXT),
        2048 => (Rgb::new(237, 194, 46), LIGHT_TEXT),
        _ => (Rgb::new(60, 58, 50), LIGHT_TEXT),
    };
    let style = CellStyle::new(fg, bg);
    if value >= 8 {
        style.bold()
    } else {
        style
    }
}
