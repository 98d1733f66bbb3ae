use thiserror::Error;

use crate::core::types::Cell;

#[derive(Error, Debug)]
pub enum WorldError {
    #[error("Invalid footprint size {0}: locations occupy 1x1 or 2x2 cells")]
    InvalidFootprint(u8),

    #[error("Cell {cell} is outside the {size}x{size} grid")]
    CellOutOfBounds { cell: Cell, size: i32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WorldError>;
