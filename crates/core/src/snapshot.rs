use crate::grid::Grid;
use crate::score::Scoreboard;
use crate::types::{GridCells, SessionState, GRID_LEN};

/// Everything a renderer needs for one frame.
///
/// `Copy` and allocation-free so it can be handed out every iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cells: GridCells,
    pub state: SessionState,
    pub score: u32,
    pub high_score: u32,
    /// Score added by the most recent applied move
    pub last_gain: u32,
    pub sound_enabled: bool,
}

impl GameSnapshot {
    pub fn capture(
        grid: &Grid,
        state: SessionState,
        scoreboard: &Scoreboard,
        last_gain: u32,
        sound_enabled: bool,
    ) -> Self {
        Self {
            cells: *grid.cells(),
            state,
            score: scoreboard.score(),
            high_score: scoreboard.high_score(),
            last_gain,
            sound_enabled,
        }
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [[0; GRID_LEN]; GRID_LEN],
            state: SessionState::Playing,
            score: 0,
            high_score: 0,
            last_gain: 0,
            sound_enabled: true,
        }
    }
}
