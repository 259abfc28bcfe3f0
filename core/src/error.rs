use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineError {
    #[error("Area '{area}': invalid capacity min={min} max={max}")]
    InvalidCapacity { area: String, min: usize, max: usize },

    #[error("Rotation count {count} outside allowed range 1..=6")]
    InvalidRotationCount { count: u8 },

    #[error("Duplicate area id '{area}' in line configuration")]
    DuplicateArea { area: String },

    #[error("Area '{area}' not found in line configuration")]
    UnknownArea { area: String },

    #[error("Person '{person}' not found on the roster")]
    UnknownPerson { person: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type LineResult<T> = Result<T, LineError>;
