//! Cell grid with a mutable visited/path overlay.

use serde::{Deserialize, Serialize};

use crate::games::Direction;

/// Layout value the level repository uses for a wall.
const WALL: u8 = 1;

/// A (row, column) coordinate.
///
/// Serialized as a two-element array, `[row, col]`, matching the level and
/// solver wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring position in `direction`, or `None` when it would
    /// leave the non-negative quadrant.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();
        Some(Self {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

/// Whether a cell can be walked on. Fixed at level load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Impassable.
    Wall,
    /// Open floor.
    Free,
}

/// Rendering overlay written by solver replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    /// Not touched by the current replay.
    #[default]
    Untouched,
    /// Explored by the search.
    Visited,
    /// Part of the solution path.
    Path,
}

/// A single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Wall or free, fixed for the level.
    pub kind: CellKind,
    /// Overlay state, reset on every reload.
    pub state: CellState,
}

impl Cell {
    /// Returns true for wall cells.
    pub fn is_wall(&self) -> bool {
        self.kind == CellKind::Wall
    }
}

/// Row-major 2D cell container with dimensions fixed for a level's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from a repository layout where `1` marks a wall.
    ///
    /// The column count is taken from the first row; short rows are padded
    /// with walls so every row has the same width.
    pub fn from_layout(layout: &[Vec<u8>]) -> Self {
        let rows = layout.len();
        let cols = layout.first().map_or(0, Vec::len);
        let cells = layout
            .iter()
            .flat_map(|row| (0..cols).map(move |c| row.get(c).copied().unwrap_or(WALL)))
            .map(|value| Cell {
                kind: if value == WALL {
                    CellKind::Wall
                } else {
                    CellKind::Free
                },
                state: CellState::Untouched,
            })
            .collect();
        Self { rows, cols, cells }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.row < self.rows && pos.col < self.cols).then_some(pos.row * self.cols + pos.col)
    }

    /// Returns the cell at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).and_then(|i| self.cells.get(i))
    }

    /// True when `pos` is in bounds and not a wall.
    pub fn is_open(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|cell| !cell.is_wall())
    }

    /// Sets the overlay state of one cell. Out-of-bounds positions are
    /// ignored and reported as `false`.
    pub fn mark(&mut self, pos: Position, state: CellState) -> bool {
        match self.index(pos).and_then(|i| self.cells.get_mut(i)) {
            Some(cell) => {
                cell.state = state;
                true
            }
            None => false,
        }
    }

    /// Resets every overlay state to [`CellState::Untouched`].
    pub fn clear_overlay(&mut self) {
        for cell in &mut self.cells {
            cell.state = CellState::Untouched;
        }
    }

    /// Iterates rows as slices, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Counts cells currently carrying `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_layout(&[vec![0, 1, 0], vec![0, 0, 0]])
    }

    #[test]
    fn layout_maps_walls_and_dimensions() {
        let grid = sample();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert!(grid.get(Position::new(0, 1)).unwrap().is_wall());
        assert!(grid.is_open(Position::new(1, 2)));
        assert!(!grid.is_open(Position::new(2, 0)));
    }

    #[test]
    fn ragged_rows_are_padded_with_walls() {
        let grid = Grid::from_layout(&[vec![0, 0, 0], vec![0]]);
        assert!(grid.is_open(Position::new(1, 0)));
        assert!(!grid.is_open(Position::new(1, 2)));
    }

    #[test]
    fn overlay_marks_and_clears() {
        let mut grid = sample();
        assert!(grid.mark(Position::new(1, 1), CellState::Visited));
        assert!(!grid.mark(Position::new(5, 5), CellState::Path));
        assert_eq!(grid.count(CellState::Visited), 1);
        grid.clear_overlay();
        assert_eq!(grid.count(CellState::Visited), 0);
    }

    #[test]
    fn step_stops_at_zero() {
        assert_eq!(Position::new(0, 0).step(Direction::Up), None);
        assert_eq!(
            Position::new(0, 0).step(Direction::Right),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn position_wire_format_is_pair() {
        let json = serde_json::to_string(&Position::new(2, 3)).unwrap();
        assert_eq!(json, "[2,3]");
        let back: Position = serde_json::from_str("[4,1]").unwrap();
        assert_eq!(back, Position::new(4, 1));
    }
}
