mod types;
mod error;
mod partition;
mod partition_enumerator;
mod reward;
mod table;
mod engine;
mod scheduler;
mod extractor;
mod game;
pub mod config;
pub mod logger;
pub mod report;

pub use types::*;
pub use error::{BreakupError, Result};
pub use partition::Partition;
pub use partition_enumerator::{PartitionCursor, Partitions};
pub use reward::{RewardModel, RewardType};
pub use table::PassiveTable;
pub use engine::{Split, best_split, evaluate, evaluate_range, profitable_split};
pub use scheduler::{Batch, compute_level, plan_batches};
pub use extractor::{Extraction, extract_stable};
pub use game::BreakupGame;
pub use config::SolverConfig;
pub use report::{FileReporter, LevelProgress, RecordingReporter, Reporter};
