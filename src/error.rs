use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShiftError {
    #[error("{0}")]
    Usage(#[from] clap::Error),
    #[error("palette file '{}' not found", .0.display())]
    MissingPalette(PathBuf),
    #[error("{context}: could not parse {token:?} as an integer")]
    Parse { context: String, token: String },
    #[error("palette line {line}: expected at least 3 channels, found {found}")]
    ChannelCount { line: usize, found: usize },
    #[error("palette has {found} entries, expected {expected}")]
    PaletteSize { expected: usize, found: usize },
    #[error("palette is empty")]
    EmptyPalette,
    #[error("I/O error\n{0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse JSON palette file\n{0}")]
    Json(#[from] serde_json::Error),
    #[error("could not parse RON palette file\n{0}")]
    Ron(#[from] ron::error::SpannedError),
}
