#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod grid;
mod tile;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// Skips the mine count check, only meant for known-good presets.
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Board of `rows` x `cols` holding `mines` mines, at least one cell must stay safe.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked((rows, cols), mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mines >= self.total_cells() {
            Err(GameError::TooManyMines)
        } else {
            Ok(())
        }
    }
}

/// Generated mine positions, immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    size: Coord2,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(size, mine_mask))
    }

    /// `mine_mask` must have the shape of `size`.
    pub(crate) fn from_mine_mask(size: Coord2, mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_mask,
            size,
            // bounded by the mask size, which is at most `Coord::MAX` squared
            mine_count: mine_count as CellCount,
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        if in_bounds(coords, self.size) {
            Ok(self[coords])
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was already open.
    NoChange,
    /// Safe cell, `opened` cells were revealed by the cascade.
    Revealed { opened: CellCount },
    HitMine,
}

impl RevealOutcome {
    pub const fn is_mine_hit(self) -> bool {
        matches!(self, Self::HitMine)
    }
}
