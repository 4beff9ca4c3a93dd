use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

pub trait MinefieldGenerator {
    /// Builds a layout for `config` where `excluded` holds no mine.
    fn generate(&mut self, config: &GameConfig, excluded: Coord2) -> MineLayout;
}

/// Mine layout that is absent until the first reveal, then fixed for the rest of the game.
#[derive(Clone, Debug)]
pub struct Minefield<G> {
    generator: G,
    layout: Option<MineLayout>,
}

impl<G: MinefieldGenerator> Minefield<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            layout: None,
        }
    }

    pub fn is_generated(&self) -> bool {
        self.layout.is_some()
    }

    pub fn layout(&self) -> Result<&MineLayout> {
        self.layout.as_ref().ok_or(GameError::NotGenerated)
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        self.layout()?.is_mine(coords)
    }

    /// Generates the layout on first use, later calls return the existing one.
    pub fn place(&mut self, config: &GameConfig, excluded: Coord2) -> &MineLayout {
        let Self { generator, layout } = self;
        layout.get_or_insert_with(|| {
            let layout = generator.generate(config, excluded);
            log::debug!(
                "Placed {} mines on {:?}, excluding {:?}",
                layout.mine_count(),
                layout.size(),
                excluded
            );
            layout
        })
    }
}
