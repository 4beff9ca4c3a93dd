use alloc::collections::VecDeque;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// When the flood fill keeps spreading past an opened cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadePolicy {
    /// Only cells without adjacent mines spread.
    #[default]
    Standard,
    /// Numbered cells also spread once every adjacent mine is flagged.
    FlaggedNeighbors,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Clone, Debug)]
pub struct PlayEngine<G = ShuffleGenerator> {
    config: GameConfig,
    cascade: CascadePolicy,
    minefield: Minefield<G>,
    grid: Grid,
    flagged_count: Saturating<CellCount>,
    marked_mines: Saturating<CellCount>,
    revealed_count: Saturating<CellCount>,
    detonated_at: Option<Coord2>,
}

impl PlayEngine<ShuffleGenerator> {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, 0)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, ShuffleGenerator::new(seed))
    }
}

impl PlayEngine<FixedGenerator> {
    /// Game over a known layout, mines are not moved away from the first reveal.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let generator = FixedGenerator::new(layout);
        Self::with_generator(generator.game_config(), generator)
    }
}

impl<G: MinefieldGenerator> PlayEngine<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cascade: CascadePolicy::default(),
            minefield: Minefield::new(generator),
            grid: Grid::new(config.size),
            flagged_count: Saturating(0),
            marked_mines: Saturating(0),
            revealed_count: Saturating(0),
            detonated_at: None,
        })
    }

    pub fn with_cascade_policy(mut self, cascade: CascadePolicy) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn cascade_policy(&self) -> CascadePolicy {
        self.cascade
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Mines not yet covered by a flag, never negative.
    pub fn mines_left(&self) -> CellCount {
        self.config.mines.saturating_sub(self.flagged_count.0)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn marked_mines(&self) -> CellCount {
        self.marked_mines.0
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn is_exploded(&self) -> bool {
        self.detonated_at.is_some()
    }

    pub fn detonated_at(&self) -> Option<Coord2> {
        self.detonated_at
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.grid.get(coords)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_generated(&self) -> bool {
        self.minefield.is_generated()
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        self.minefield.is_mine(coords)
    }

    pub fn mine_layout(&self) -> Result<&MineLayout> {
        self.minefield.layout()
    }

    pub fn game_over(&self) -> bool {
        self.is_exploded()
            || self.marked_mines.0 == self.config.mines
            || self.revealed_count.0 == self.config.safe_cell_count()
    }

    pub fn win(&self) -> bool {
        self.game_over() && !self.is_exploded()
    }

    pub fn status(&self) -> GameStatus {
        if self.is_exploded() {
            GameStatus::Lost
        } else if self.game_over() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// Flags a hidden cell or removes the flag from a flagged one, revealed cells are left alone.
    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use Cell::*;
        use MarkOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        // nothing is a mine before the layout exists
        let is_mine = self.minefield.is_mine(coords).unwrap_or(false);

        let outcome = match self.grid.cell(coords) {
            Flagged => {
                *self.grid.cell_mut(coords) = Hidden;
                self.flagged_count -= 1;
                if is_mine {
                    self.marked_mines -= 1;
                }
                Changed
            }
            Hidden => {
                if self.flagged_count.0 >= self.config.mines {
                    return Err(GameError::FlagLimitExceeded);
                }
                *self.grid.cell_mut(coords) = Flagged;
                self.flagged_count += 1;
                if is_mine {
                    self.marked_mines += 1;
                }
                Changed
            }
            Blank | Count(_) => NoChange,
        };

        self.log_if_decided();
        Ok(outcome)
    }

    /// Opens `coords`, placing the mines first if this is the opening move.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        let cell = self.grid.cell(coords);
        if cell == Cell::Flagged {
            return Err(GameError::PositionFlagged);
        }

        let first_placement = !self.minefield.is_generated();
        let layout = self.minefield.place(&self.config, coords);
        if first_placement {
            // flags placed earlier may now sit on mines
            self.marked_mines = Saturating(count_flagged_mines(layout, &self.grid));
        }

        if layout.contains_mine(coords) {
            log::debug!("Mine hit at {:?}", coords);
            // the first detonation is the one on record
            self.detonated_at.get_or_insert(coords);
            return Ok(RevealOutcome::HitMine);
        }

        if cell.is_revealed() {
            return Ok(RevealOutcome::NoChange);
        }

        let opened = flood_fill(layout, &mut self.grid, self.cascade, coords);
        self.revealed_count += opened;
        log::debug!("Opened {} cells from {:?}", opened, coords);

        self.log_if_decided();
        Ok(RevealOutcome::Revealed { opened })
    }

    /// Boolean form of [`reveal`](Self::reveal), `true` when a mine went off.
    pub fn check(&mut self, coords: Coord2) -> Result<bool> {
        self.reveal(coords).map(RevealOutcome::is_mine_hit)
    }

    fn log_if_decided(&self) {
        let status = self.status();
        if status.is_finished() {
            log::debug!("Game decided: {:?}", status);
        }
    }
}

fn count_flagged_mines(layout: &MineLayout, grid: &Grid) -> CellCount {
    let count = grid
        .cells()
        .indexed_iter()
        .filter(|&(_, &cell)| cell == Cell::Flagged)
        .filter(|&((row, col), _)| layout.contains_mine((row as Coord, col as Coord)))
        .count();
    // bounded by the number of flags
    count as CellCount
}

/// Breadth-first opening from `start`, returns how many cells were revealed.
fn flood_fill(
    layout: &MineLayout,
    grid: &mut Grid,
    cascade: CascadePolicy,
    start: Coord2,
) -> CellCount {
    let mut visited: Array2<bool> = Array2::default(grid.size().to_nd_index());
    let mut to_visit = VecDeque::from([start]);
    visited[start.to_nd_index()] = true;
    let mut opened: CellCount = 0;

    while let Some(visit_coords) = to_visit.pop_front() {
        let adjacent_mines = layout.adjacent_mine_count(visit_coords);
        *grid.cell_mut(visit_coords) = Cell::revealed(adjacent_mines);
        opened += 1;
        log::trace!(
            "Flood opened cell at {:?}, mine count: {}",
            visit_coords,
            adjacent_mines
        );

        let spreads = match cascade {
            CascadePolicy::Standard => adjacent_mines == 0,
            CascadePolicy::FlaggedNeighbors => grid
                .iter_neighbors(visit_coords)
                .filter(|&pos| layout.contains_mine(pos))
                .all(|pos| grid.cell(pos) == Cell::Flagged),
        };
        if !spreads {
            continue;
        }

        for pos in grid.iter_neighbors(visit_coords) {
            if visited[pos.to_nd_index()] || layout.contains_mine(pos) {
                continue;
            }
            // flags and earlier openings are left as they are
            if grid.cell(pos) != Cell::Hidden {
                continue;
            }
            visited[pos.to_nd_index()] = true;
            to_visit.push_back(pos);
        }
    }

    opened
}
