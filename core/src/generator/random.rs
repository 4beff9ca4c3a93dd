use alloc::vec::Vec;
use ndarray::Array2;
use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};

use super::*;

/// Uniformly random placement: every cell except the excluded one is shuffled and the first
/// `mines` of them receive a mine.
#[derive(Clone, Debug)]
pub struct ShuffleGenerator {
    rng: SmallRng,
}

impl ShuffleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinefieldGenerator for ShuffleGenerator {
    fn generate(&mut self, config: &GameConfig, excluded: Coord2) -> MineLayout {
        let (rows, cols) = config.size;
        let mut candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| coords != excluded)
            .collect();

        if usize::from(config.mines) > candidates.len() {
            log::warn!(
                "Minefield cannot hold {} mines with one safe cell, placing {}",
                config.mines,
                candidates.len()
            );
        }

        candidates.shuffle(&mut self.rng);

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for coords in candidates.into_iter().take(config.mines.into()) {
            mine_mask[coords.to_nd_index()] = true;
        }
        MineLayout::from_mine_mask(config.size, mine_mask)
    }
}
