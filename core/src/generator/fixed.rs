use super::*;

/// Replays a known layout. The exclusion is not applied, the caller owns the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedGenerator {
    layout: MineLayout,
}

impl FixedGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }

    pub fn game_config(&self) -> GameConfig {
        self.layout.game_config()
    }
}

impl MinefieldGenerator for FixedGenerator {
    fn generate(&mut self, config: &GameConfig, excluded: Coord2) -> MineLayout {
        if self.layout.game_config() != *config {
            log::warn!(
                "Fixed layout {:?} does not match requested {:?}",
                self.layout.game_config(),
                config
            );
        }
        if self.layout.is_mine(excluded).unwrap_or(false) {
            log::debug!("Fixed layout has a mine on the first revealed cell {:?}", excluded);
        }
        self.layout.clone()
    }
}
