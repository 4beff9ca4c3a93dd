use clap::ValueEnum;
use sapper_core::{CascadePolicy, GameConfig};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Expert,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((8, 8), 10),
            Self::Medium => GameConfig::new_unchecked((15, 13), 40),
            Self::Expert => GameConfig::new_unchecked((30, 16), 99),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CascadeMode {
    /// Stop the flood at every numbered cell
    #[default]
    Standard,
    /// Keep flooding through numbered cells whose mines are all flagged
    FlaggedNeighbors,
}

impl From<CascadeMode> for CascadePolicy {
    fn from(mode: CascadeMode) -> Self {
        match mode {
            CascadeMode::Standard => CascadePolicy::Standard,
            CascadeMode::FlaggedNeighbors => CascadePolicy::FlaggedNeighbors,
        }
    }
}
