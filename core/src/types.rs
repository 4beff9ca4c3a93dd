/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, zero based.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` lies inside a board of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

// Row-major so traversal order is reproducible.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;

    let next = (
        row.checked_add_signed(d_row)?,
        col.checked_add_signed(d_col)?,
    );
    in_bounds(next, bounds).then_some(next)
}

/// Moore neighborhood of a cell, clipped to the board.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn neighbors(center: Coord2, bounds: Coord2) -> Vec<Coord2> {
        NeighborIter::new(center, bounds).collect()
    }

    #[test]
    fn corners_edges_and_interior_have_expected_counts() {
        let bounds = (4, 5);
        for row in 0..bounds.0 {
            for col in 0..bounds.1 {
                let on_row_edge = row == 0 || row == bounds.0 - 1;
                let on_col_edge = col == 0 || col == bounds.1 - 1;
                let expected = match (on_row_edge, on_col_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };

                let found = neighbors((row, col), bounds);
                assert_eq!(found.len(), expected, "at {:?}", (row, col));
                assert!(!found.contains(&(row, col)));
                assert!(found.iter().all(|&pos| in_bounds(pos, bounds)));
            }
        }
    }

    #[test]
    fn order_is_row_major() {
        assert_eq!(
            neighbors((1, 1), (3, 3)),
            [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(neighbors((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn max_coordinate_does_not_overflow() {
        let bounds = (Coord::MAX, Coord::MAX);
        let corner = (Coord::MAX - 1, Coord::MAX - 1);
        assert_eq!(neighbors(corner, bounds).len(), 3);
    }
}
