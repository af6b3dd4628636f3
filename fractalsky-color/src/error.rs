use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("Palette needs at least one color")]
    Empty,

    #[error("Palette text needs at least 2 colors, got {0}")]
    TooFewColors(usize),

    #[error("Palette text has {0} colors, more than the 25000 allowed")]
    TooManyColors(usize),

    #[error("Invalid color token {token:?} at position {position}")]
    InvalidToken { position: usize, token: String },

    #[error("Oklab expansion needs at least 2 steps per segment, got {0}")]
    InvalidSteps(usize),

    #[error("Unknown palette preset {0:?}")]
    UnknownPreset(String),
}
