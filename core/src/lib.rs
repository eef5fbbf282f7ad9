#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;

pub use command::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use render::*;
pub use tile::*;
pub use types::*;

mod command;
mod engine;
mod error;
mod generator;
mod render;
mod tile;
mod types;

/// Side length of the board played by the terminal game.
pub const DEFAULT_SIZE: Coord = 10;

/// Number of mines hidden on the board played by the terminal game.
pub const DEFAULT_MINES: CellCount = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// At least one cell has to stay free of mines, otherwise the game could never be won.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        if config.safe_cells() == 0 {
            return Err(GameError::TooManyMines);
        }
        Ok(config)
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, DEFAULT_MINES)
    }
}

/// Final placement of mines on a square board, together with the adjacent mine counts which are computed once when
/// the layout is built and never change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    contents: Array2<CellContent>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if mine_count as usize >= mine_mask.len() {
            return Err(GameError::TooManyMines);
        }

        let contents = compute_contents(&mine_mask);
        Ok(Self {
            mine_mask,
            contents,
            mine_count,
        })
    }

    /// Builds a layout with mines at exactly the given cells, duplicates are collapsed.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds {
                    max: size.saturating_sub(1),
                });
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn size(&self) -> Coord {
        self.mine_mask.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn content(&self, coords: Coord2) -> CellContent {
        self.contents[coords.to_nd_index()]
    }

    /// Adjacent mine count of a safe cell, `None` for a mine.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Option<u8> {
        match self.content(coords) {
            CellContent::Mine => None,
            CellContent::Empty(count) => Some(count),
        }
    }

    /// Mine positions in row-major order.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

fn compute_contents(mine_mask: &Array2<bool>) -> Array2<CellContent> {
    Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
        if mine_mask[(row, col)] {
            return CellContent::Mine;
        }
        let count = mine_mask
            .iter_neighbors((row as Coord, col as Coord))
            .filter(|&pos| mine_mask[pos.to_nd_index()])
            .count();
        CellContent::Empty(count as u8)
    })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Revealed,
    HitMine,
    Won,
}
