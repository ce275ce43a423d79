//! Grid maze: cell storage, generation and collision queries
//!
//! Cells are stored row-major and addressed by `(x, y)` grid coordinates
//! (`x` = column, `y` = row). Anything outside the grid reads as a wall, so
//! collision checks stay total at the edges.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::grid_cell;
use crate::settings::MazeLayout;

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Collectible,
}

impl Cell {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Collectible),
            ' ' | '_' => Some(Cell::Empty),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Collectible => '.',
        }
    }
}

/// Wall blocks stamped by the hand-authored layout, as `(x, y, width, height)`
/// in grid cells. Designed for the default 30x30 grid; blocks are clipped to
/// the interior on smaller grids.
pub const HAND_AUTHORED_BLOCKS: &[(i32, i32, i32, i32)] = &[
    // Top band
    (2, 2, 4, 3),
    (7, 2, 6, 3),
    (14, 1, 2, 4),
    (17, 2, 6, 3),
    (24, 2, 4, 3),
    // Upper T-shapes
    (2, 6, 4, 2),
    (7, 6, 2, 8),
    (10, 6, 10, 2),
    (21, 6, 2, 8),
    (24, 6, 4, 2),
    // Pursuer pen (open at the top between x = 14..15)
    (11, 10, 3, 1),
    (16, 10, 3, 1),
    (11, 13, 8, 1),
    (11, 11, 1, 2),
    (18, 11, 1, 2),
    // Side blocks
    (2, 9, 4, 5),
    (24, 9, 4, 5),
    // Lower band
    (2, 15, 4, 2),
    (7, 15, 2, 5),
    (10, 15, 10, 2),
    (21, 15, 2, 5),
    (24, 15, 4, 2),
    (2, 18, 4, 3),
    (10, 18, 4, 3),
    (16, 18, 4, 3),
    (24, 18, 4, 3),
    // Around the player spawn
    (12, 21, 6, 1),
    (2, 22, 4, 2),
    (7, 21, 3, 3),
    (20, 21, 3, 3),
    (24, 22, 4, 2),
    // Bottom band
    (2, 25, 10, 2),
    (14, 24, 2, 3),
    (18, 25, 10, 2),
];

/// Error from parsing a text maze layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("maze layout is empty")]
    Empty,
    #[error("row {row} has width {width}, expected {expected}")]
    Ragged {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("unknown cell character {ch:?} at ({x}, {y})")]
    UnknownCell { ch: char, x: usize, y: usize },
    #[error("{width}x{height} maze needs {expected} cells, got {actual}")]
    CellCount {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

/// Serialized maze as read from disk, checked before it becomes a [`Maze`]
#[derive(Deserialize)]
struct MazeData {
    width: usize,
    height: usize,
    cell_size: f32,
    cells: Vec<Cell>,
}

impl TryFrom<MazeData> for Maze {
    type Error = LayoutError;

    fn try_from(data: MazeData) -> Result<Self, Self::Error> {
        let expected = data.width.checked_mul(data.height);
        if expected != Some(data.cells.len()) {
            return Err(LayoutError::CellCount {
                width: data.width,
                height: data.height,
                expected: expected.unwrap_or(usize::MAX),
                actual: data.cells.len(),
            });
        }
        Ok(Self {
            width: data.width,
            height: data.height,
            cell_size: data.cell_size,
            cells: data.cells,
        })
    }
}

/// Fixed-size 2D grid of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MazeData")]
pub struct Maze {
    width: usize,
    height: usize,
    cell_size: f32,
    cells: Vec<Cell>,
}

impl Maze {
    /// A grid with a wall border and every interior cell set to `fill`
    pub fn bordered(width: usize, height: usize, cell_size: f32, fill: Cell) -> Self {
        let mut cells = vec![fill; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    cells[y * width + x] = Cell::Wall;
                }
            }
        }
        Self {
            width,
            height,
            cell_size,
            cells,
        }
    }

    /// Generate a maze with the given layout strategy
    ///
    /// Spawn cells are only consulted by the hand-authored layout, which
    /// forces the player spawn to hold a collectible and the pursuer spawn to
    /// be empty.
    pub fn generate(
        layout: MazeLayout,
        width: usize,
        height: usize,
        cell_size: f32,
        player_spawn: IVec2,
        pursuer_spawn: IVec2,
    ) -> Self {
        match layout {
            MazeLayout::Checkerboard => Self::checkerboard(width, height, cell_size),
            MazeLayout::HandAuthored => {
                Self::hand_authored(width, height, cell_size, player_spawn, pursuer_spawn)
            }
        }
    }

    /// Border walls plus a wall on every interior cell with both coordinates even
    pub fn checkerboard(width: usize, height: usize, cell_size: f32) -> Self {
        let mut maze = Self::bordered(width, height, cell_size, Cell::Collectible);
        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                if x % 2 == 0 && y % 2 == 0 {
                    maze.cells[y * width + x] = Cell::Wall;
                }
            }
        }
        maze
    }

    /// Border walls plus the fixed [`HAND_AUTHORED_BLOCKS`] table
    pub fn hand_authored(
        width: usize,
        height: usize,
        cell_size: f32,
        player_spawn: IVec2,
        pursuer_spawn: IVec2,
    ) -> Self {
        let mut maze = Self::bordered(width, height, cell_size, Cell::Collectible);
        for &(bx, by, bw, bh) in HAND_AUTHORED_BLOCKS {
            for y in by..by + bh {
                for x in bx..bx + bw {
                    if maze.is_interior(x, y) {
                        maze.set(x, y, Cell::Wall);
                    }
                }
            }
        }
        if maze.is_interior(player_spawn.x, player_spawn.y) {
            maze.set(player_spawn.x, player_spawn.y, Cell::Collectible);
        }
        if maze.is_interior(pursuer_spawn.x, pursuer_spawn.y) {
            maze.set(pursuer_spawn.x, pursuer_spawn.y, Cell::Empty);
        }
        maze
    }

    /// Parse a text layout: `#` wall, `.` collectible, space or `_` empty
    ///
    /// The text is taken as-is; border walls are not forced.
    pub fn from_rows(rows: &[&str], cell_size: f32) -> Result<Self, LayoutError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(LayoutError::Empty);
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    width: row_width,
                    expected: width,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(LayoutError::UnknownCell { ch, x, y })?;
                cells.push(cell);
            }
        }
        Ok(Self {
            width,
            height: rows.len(),
            cell_size,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    fn is_interior(&self, x: i32, y: i32) -> bool {
        x > 0 && y > 0 && (x as usize) + 1 < self.width && (y as usize) + 1 < self.height
    }

    /// Overwrite a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Cell at grid coordinates; out of range reads as `Wall`
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        self.index(x, y).map_or(Cell::Wall, |i| self.cells[i])
    }

    /// Grid cell containing a pixel position
    #[inline]
    pub fn grid_of(&self, pos: Vec2) -> IVec2 {
        grid_cell(pos, self.cell_size)
    }

    /// Pixel center of a grid cell
    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        (cell.as_vec2() + Vec2::splat(0.5)) * self.cell_size
    }

    /// Whether a pixel position lies in a wall (or off the grid)
    pub fn is_blocked(&self, pos: Vec2) -> bool {
        let cell = self.grid_of(pos);
        self.cell_at(cell.x, cell.y) == Cell::Wall
    }

    /// Turn a collectible into an empty cell; returns whether one was there
    pub fn consume_if_collectible(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) if self.cells[i] == Cell::Collectible => {
                self.cells[i] = Cell::Empty;
                true
            }
            _ => false,
        }
    }

    /// Whether any collectible is left
    pub fn has_collectibles(&self) -> bool {
        self.cells.iter().any(|&c| c == Cell::Collectible)
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Collectible).count()
    }

    /// Rows of cells, top to bottom (none for a zero-width grid)
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // Zero width means no cells, so any nonzero chunk size yields nothing
        self.cells.chunks(self.width.max(1))
    }

    /// Text rendering in the same alphabet `from_rows` accepts
    pub fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.as_char()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_border_walls(maze: &Maze) {
        let (w, h) = (maze.width() as i32, maze.height() as i32);
        for x in 0..w {
            assert_eq!(maze.cell_at(x, 0), Cell::Wall);
            assert_eq!(maze.cell_at(x, h - 1), Cell::Wall);
        }
        for y in 0..h {
            assert_eq!(maze.cell_at(0, y), Cell::Wall);
            assert_eq!(maze.cell_at(w - 1, y), Cell::Wall);
        }
    }

    #[test]
    fn test_checkerboard_layout() {
        let maze = Maze::checkerboard(30, 30, 20.0);
        assert_border_walls(&maze);
        assert_eq!(maze.cell_at(2, 2), Cell::Wall);
        assert_eq!(maze.cell_at(3, 2), Cell::Collectible);
        assert_eq!(maze.cell_at(1, 1), Cell::Collectible);
        // 28x28 interior, 14x14 of it even/even walls
        assert_eq!(maze.remaining_collectibles(), 28 * 28 - 14 * 14);
    }

    #[test]
    fn test_hand_authored_spawns() {
        let player = IVec2::new(14, 23);
        let pursuer = IVec2::new(14, 11);
        let maze = Maze::hand_authored(30, 30, 20.0, player, pursuer);
        assert_border_walls(&maze);
        assert_eq!(maze.cell_at(player.x, player.y), Cell::Collectible);
        assert_eq!(maze.cell_at(pursuer.x, pursuer.y), Cell::Empty);
        assert_eq!(maze.cell_at(2, 2), Cell::Wall);
        // Pen exit stays open
        assert_ne!(maze.cell_at(14, 10), Cell::Wall);
    }

    #[test]
    fn test_hand_authored_clips_to_small_grid() {
        // Both spawns sit inside the clipped (2, 2, 4, 3) block
        let player = IVec2::new(3, 3);
        let pursuer = IVec2::new(4, 2);
        let maze = Maze::hand_authored(8, 6, 10.0, player, pursuer);
        assert_border_walls(&maze);
        assert_eq!(maze.width(), 8);
        assert_eq!(maze.height(), 6);
        assert_eq!(maze.cell_at(2, 2), Cell::Wall);
        assert_eq!(maze.cell_at(5, 4), Cell::Wall);
        assert_eq!(maze.cell_at(6, 4), Cell::Collectible);
        assert_eq!(maze.cell_at(player.x, player.y), Cell::Collectible);
        assert_eq!(maze.cell_at(pursuer.x, pursuer.y), Cell::Empty);
        // Blocks starting at x = 7 only touch the border column
        assert_eq!(maze.to_rows()[1], "#......#");
        assert_eq!(maze.to_rows()[2], "#.## #.#");
    }

    #[test]
    fn test_out_of_range_is_wall() {
        let maze = Maze::checkerboard(5, 5, 20.0);
        assert_eq!(maze.cell_at(-1, 2), Cell::Wall);
        assert_eq!(maze.cell_at(5, 2), Cell::Wall);
        assert_eq!(maze.cell_at(2, 99), Cell::Wall);
        assert!(maze.is_blocked(Vec2::new(-0.1, 30.0)));
        assert!(maze.is_blocked(Vec2::new(30.0, 100.0)));
        assert!(!maze.is_blocked(Vec2::new(30.0, 30.0)));
    }

    #[test]
    fn test_consume_if_collectible() {
        let mut maze = Maze::checkerboard(5, 5, 20.0);
        let before = maze.remaining_collectibles();
        assert!(maze.consume_if_collectible(1, 1));
        assert_eq!(maze.cell_at(1, 1), Cell::Empty);
        assert!(!maze.consume_if_collectible(1, 1));
        assert!(!maze.consume_if_collectible(0, 0));
        assert!(!maze.consume_if_collectible(-3, 7));
        assert_eq!(maze.remaining_collectibles(), before - 1);
    }

    #[test]
    fn test_collectible_scan_is_idempotent() {
        let maze = Maze::from_rows(&["#####", "#. ##", "#####"], 10.0).unwrap();
        assert!(maze.has_collectibles());
        assert!(maze.has_collectibles());
        let empty = Maze::bordered(4, 4, 10.0, Cell::Empty);
        assert!(!empty.has_collectibles());
        assert!(!empty.has_collectibles());
    }

    #[test]
    fn test_from_rows_round_trip_and_errors() {
        let rows = ["####", "#. #", "####"];
        let maze = Maze::from_rows(&rows, 10.0).unwrap();
        assert_eq!(maze.to_rows(), rows);
        assert_eq!(maze.cell_at(1, 1), Cell::Collectible);
        assert_eq!(maze.cell_at(2, 1), Cell::Empty);

        assert_eq!(Maze::from_rows(&[], 10.0), Err(LayoutError::Empty));
        assert!(matches!(
            Maze::from_rows(&["###", "##"], 10.0),
            Err(LayoutError::Ragged { row: 1, .. })
        ));
        assert!(matches!(
            Maze::from_rows(&["#x#"], 10.0),
            Err(LayoutError::UnknownCell { ch: 'x', .. })
        ));
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let maze = Maze::checkerboard(5, 4, 20.0);
        let json = serde_json::to_string(&maze).unwrap();
        assert_eq!(serde_json::from_str::<Maze>(&json).unwrap(), maze);

        let short = r#"{"width": 3, "height": 3, "cell_size": 10.0, "cells": ["Wall"]}"#;
        let err = serde_json::from_str::<Maze>(short).unwrap_err();
        assert!(err.to_string().contains("needs 9 cells, got 1"));

        // width * height overflows usize
        let huge = format!(
            r#"{{"width": {}, "height": 2, "cell_size": 1.0, "cells": []}}"#,
            usize::MAX
        );
        assert!(serde_json::from_str::<Maze>(&huge).is_err());
    }

    #[test]
    fn test_zero_width_maze_has_no_rows() {
        let maze = Maze::bordered(0, 3, 10.0, Cell::Empty);
        assert_eq!(maze.rows().count(), 0);
        assert!(maze.to_rows().is_empty());
        assert_eq!(maze.cell_at(0, 0), Cell::Wall);

        let json = r#"{"width": 0, "height": 4, "cell_size": 10.0, "cells": []}"#;
        let maze: Maze = serde_json::from_str(json).unwrap();
        assert!(maze.to_rows().is_empty());
    }

    #[test]
    fn test_cell_center() {
        let maze = Maze::checkerboard(5, 5, 20.0);
        assert_eq!(maze.cell_center(IVec2::new(1, 2)), Vec2::new(30.0, 50.0));
        assert_eq!(maze.grid_of(Vec2::new(30.0, 50.0)), IVec2::new(1, 2));
    }
}
