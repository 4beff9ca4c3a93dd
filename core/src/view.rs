use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player is allowed to see, enough to draw the board mid-game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub mines_left: CellCount,
    pub cells: Array2<Cell>,
}

impl BoardView {
    pub fn from_engine<G: MinefieldGenerator>(engine: &PlayEngine<G>) -> Self {
        Self {
            size: engine.size(),
            mines_left: engine.mines_left(),
            cells: engine.grid().cells().clone(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        if in_bounds(coords, self.size) {
            Ok(self.cells[coords.to_nd_index()])
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolvedCell {
    Mine,
    Safe(u8),
}

/// Full disclosure of the layout, for showing the board once the game is over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolutionView {
    pub size: Coord2,
    pub cells: Array2<SolvedCell>,
    pub detonated_at: Option<Coord2>,
}

impl SolutionView {
    pub fn from_engine<G: MinefieldGenerator>(engine: &PlayEngine<G>) -> Result<Self> {
        Ok(Self::from_layout(engine.mine_layout()?, engine.detonated_at()))
    }

    pub fn from_layout(layout: &MineLayout, detonated_at: Option<Coord2>) -> Self {
        let size = layout.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), SolvedCell::Safe(0));

        let (row_end, col_end) = size;
        for row in 0..row_end {
            for col in 0..col_end {
                let coords = (row, col);
                cells[coords.to_nd_index()] = if layout.contains_mine(coords) {
                    SolvedCell::Mine
                } else {
                    SolvedCell::Safe(layout.adjacent_mine_count(coords))
                };
            }
        }

        Self {
            size,
            cells,
            detonated_at,
        }
    }
}
