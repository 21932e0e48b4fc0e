//! Tuning of the solver, loaded from an optional TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BreakupError, Result, RewardType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Smallest level, in partitions, that is split among workers.
    pub min_parallel: usize,
    /// Number of worker threads for a parallel level.
    pub workers: usize,
    pub reward: RewardType,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_parallel: 600,
            workers: 30,
            reward: RewardType::LinearCournot,
        }
    }
}

impl SolverConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(BreakupError::Config("workers must be at least 1".into()));
        }
        if self.min_parallel == 0 {
            return Err(BreakupError::Config("min_parallel must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.min_parallel, 600);
        assert_eq!(config.workers, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "workers = 4").unwrap();
        let config = SolverConfig::load_from(file.path()).unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.min_parallel, 600);
        assert_eq!(config.reward, RewardType::LinearCournot);
    }

    #[test]
    fn test_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "workers = 0").unwrap();
        assert!(matches!(SolverConfig::load_from(file.path()), Err(BreakupError::Config(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reward = \"quadratic\"").unwrap();
        assert!(matches!(SolverConfig::load_from(file.path()), Err(BreakupError::ConfigParse(_))));
    }
}
