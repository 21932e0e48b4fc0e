use std::path::PathBuf;

use thiserror::Error;

use super::*;

#[derive(Error, Debug)]
pub enum BreakupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Cannot open {}: {source}", .path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No passive value for coalition size {size} in {partition}")]
    MissingPassiveValue { partition: Partition, size: Size },

    #[error("Level with {parts} coalitions is not available")]
    MissingLevel { parts: usize },

    #[error("Partition {partition} needs level {needed}, but only levels up to {ceiling} are retained")]
    RetentionViolation {
        partition: Partition,
        needed: usize,
        ceiling: usize,
    },

    #[error("Worker for batch {batch} panicked")]
    WorkerPanicked { batch: usize },
}

pub type Result<T> = std::result::Result<T, BreakupError>;
