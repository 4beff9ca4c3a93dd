use ndarray::Array2;

use crate::*;

/// Display-state matrix with a single validating accessor.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
    size: Coord2,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            size,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cells[coords.to_nd_index()] = cell;
        Ok(())
    }

    pub fn neighbors(&self, coords: Coord2) -> Result<NeighborIter> {
        let coords = self.validate_coords(coords)?;
        Ok(NeighborIter::new(coords, self.size))
    }

    /// Unchecked read for coordinates that already went through validation.
    pub(crate) fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}
