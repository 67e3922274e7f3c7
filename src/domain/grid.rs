/// The playfield: a fixed-size grid of tiles.
/// All access is bounds-checked; reads outside the grid see Empty and
/// writes outside the grid are ignored, so callers can probe neighbor
/// cells at the edges without guarding every coordinate themselves.

use crate::domain::tile::Tile;

pub const GRID_WIDTH: usize = 20;
pub const GRID_HEIGHT: usize = 15;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: [[Tile; GRID_WIDTH]; GRID_HEIGHT],
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            cells: [[Tile::Empty; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    /// Build a grid from one string per row.
    /// Legend: `' '` Empty, `#` Dirt, `.` Tunnel, `O` Rock.
    /// Spawn markers leave their underlying terrain: `P` (player) sits in
    /// a Tunnel, `p` (Pooka) and `F` (Fygar) start buried in Dirt.
    /// Missing rows and short rows are padded with Empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Grid::new();
        for (row, line) in rows.iter().enumerate().take(GRID_HEIGHT) {
            for (col, ch) in line.chars().enumerate().take(GRID_WIDTH) {
                let tile = match ch {
                    '#' => Tile::Dirt,
                    '.' | 'P' => Tile::Tunnel,
                    'O' => Tile::Rock,
                    'p' | 'F' => Tile::Dirt,
                    _ => Tile::Empty,
                };
                grid.cells[row][col] = tile;
            }
        }
        grid
    }

    /// Is (row, col) inside the grid?
    #[inline]
    pub fn in_bounds(row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < GRID_HEIGHT && col >= 0 && (col as usize) < GRID_WIDTH
    }

    /// Tile at (row, col). Out-of-bounds reads return Empty.
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Tile {
        if Self::in_bounds(row, col) {
            self.cells[row as usize][col as usize]
        } else {
            Tile::Empty
        }
    }

    /// Write a tile at (row, col). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, row: i32, col: i32, tile: Tile) {
        if Self::in_bounds(row, col) {
            self.cells[row as usize][col as usize] = tile;
        }
    }
}
