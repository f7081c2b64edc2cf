//! Grid module - the 4x4 board and its whole-board operations
//!
//! Cells are addressed `(row, col)` with row 0 at the top and col 0 at the
//! left. A cell holds `0` when empty, otherwise a power of two >= 2.
//!
//! All four directions share [`slide_line`]: a direction only decides which
//! cells make up each line and in which order they are read, through
//! [`line_cell`]. Reading a line, sliding it and writing it back through the
//! same map is the whole move.

use arrayvec::ArrayVec;

use crate::line::{slide_line, Line};
use crate::rng::SimpleRng;
use crate::types::{Direction, GridCells, GRID_CELLS, GRID_LEN, SPAWN_FOUR_ONE_IN};

/// Outcome of [`Grid::apply_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveOutcome {
    /// False when no line changed; the grid is then untouched
    pub applied: bool,
    /// Sum of merge results across all four lines
    pub score_delta: u32,
}

/// A tile placed by [`Grid::spawn_tile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spawn {
    pub row: u8,
    pub col: u8,
    pub value: u32,
}

/// Map position `pos` of line `line` to a `(row, col)` cell for `direction`.
///
/// Position 0 is the edge the tiles slide toward:
///
/// - Left: identity (`line` is the row)
/// - Right: row reversed
/// - Up: transpose (`line` is the column)
/// - Down: transpose, then reversed
///
/// `Direction::None` maps like Left; callers never slide with it.
#[inline(always)]
pub fn line_cell(direction: Direction, line: usize, pos: usize) -> (usize, usize) {
    let last = GRID_LEN - 1;
    match direction {
        Direction::Left | Direction::None => (line, pos),
        Direction::Right => (line, last - pos),
        Direction::Up => (pos, line),
        Direction::Down => (last - pos, line),
    }
}

/// The 4x4 game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    cells: GridCells,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [[0; GRID_LEN]; GRID_LEN],
        }
    }

    /// Create a grid from raw cells
    pub fn from_cells(cells: GridCells) -> Self {
        Self { cells }
    }

    /// Raw cells, row-major
    pub fn cells(&self) -> &GridCells {
        &self.cells
    }

    /// Get the value at `(row, col)`, or None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Set the value at `(row, col)`
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells = [[0; GRID_LEN]; GRID_LEN];
    }

    /// Coordinates of all empty cells, row-major
    pub fn empty_cells(&self) -> ArrayVec<(u8, u8), GRID_CELLS> {
        let mut out = ArrayVec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value == 0 {
                    out.push((row as u8, col as u8));
                }
            }
        }
        out
    }

    /// Number of nonzero cells
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    /// Largest tile on the board (0 when empty)
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tiles
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    fn read_line(&self, direction: Direction, line: usize) -> Line {
        let mut out = [0; GRID_LEN];
        for (pos, slot) in out.iter_mut().enumerate() {
            let (row, col) = line_cell(direction, line, pos);
            *slot = self.cells[row][col];
        }
        out
    }

    fn write_line(&mut self, direction: Direction, line: usize, values: &Line) {
        for (pos, &value) in values.iter().enumerate() {
            let (row, col) = line_cell(direction, line, pos);
            self.cells[row][col] = value;
        }
    }

    /// Slide the whole board in `direction`.
    ///
    /// The move is committed only if at least one line changed. A rejected
    /// move (`applied == false`) is a normal outcome and leaves every cell as
    /// it was. `Direction::None` is always rejected.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if !direction.is_move() {
            return MoveOutcome::default();
        }

        let mut next = *self;
        let mut outcome = MoveOutcome::default();
        for line in 0..GRID_LEN {
            let slide = slide_line(self.read_line(direction, line));
            if slide.changed {
                outcome.applied = true;
                outcome.score_delta += slide.score_delta;
                next.write_line(direction, line, &slide.line);
            }
        }

        if outcome.applied {
            *self = next;
        }
        outcome
    }

    /// True if sliding in `direction` would change the board
    pub fn can_move(&self, direction: Direction) -> bool {
        direction.is_move()
            && (0..GRID_LEN).any(|line| slide_line(self.read_line(direction, line)).changed)
    }

    /// Place a 2 (or, one time in ten, a 4) on a uniformly chosen empty cell.
    ///
    /// Returns None and leaves the grid untouched when the board is full.
    pub fn spawn_tile(&mut self, rng: &mut SimpleRng) -> Option<Spawn> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let (row, col) = empty[rng.next_range(empty.len() as u32) as usize];
        let value = if rng.one_in(SPAWN_FOUR_ONE_IN) { 4 } else { 2 };
        self.cells[row as usize][col as usize] = value;
        Some(Spawn { row, col, value })
    }

    /// True when the board is full and no two neighbours (horizontal or
    /// vertical) hold the same value.
    pub fn is_terminal(&self) -> bool {
        for row in 0..GRID_LEN {
            for col in 0..GRID_LEN {
                let value = self.cells[row][col];
                if value == 0 {
                    return false;
                }
                if row + 1 < GRID_LEN && self.cells[row + 1][col] == value {
                    return false;
                }
                if col + 1 < GRID_LEN && self.cells[row][col + 1] == value {
                    return false;
                }
            }
        }
        true
    }

    /// Overwrite the board with sixteen distinct powers of two
    /// (2, 4, ... 65536, row-major).
    ///
    /// The result is full with no equal neighbours, so it is terminal.
    pub fn fill_losing_pattern(&mut self) {
        let mut value = 2u32;
        for cell in self.cells.iter_mut().flatten() {
            *cell = value;
            value *= 2;
        }
    }
}

impl From<GridCells> for Grid {
    fn from(cells: GridCells) -> Self {
        Self::from_cells(cells)
    }
}
