use std::time::Instant;

use tracing::info;

use super::*;
use crate::report::peak_memory_bytes;

/// A coalition breakup game on `n` agents.
///
/// Levels with at most `max_parts` coalitions are kept for the extraction of
/// stable structures; finer levels are dropped as soon as they are no longer
/// needed.
#[derive(Debug)]
pub struct BreakupGame<R: RewardModel> {
    pub n: usize,
    pub max_parts: usize,
    pub reward: R,
    pub config: SolverConfig,
}

impl BreakupGame<RewardType> {
    /// A game using the reward selected in `config`.
    pub fn from_config(n: usize, max_parts: usize, config: SolverConfig) -> Result<Self> {
        Self::new(n, max_parts, config.reward, config)
    }
}

impl<R: RewardModel> BreakupGame<R> {
    pub fn new(n: usize, max_parts: usize, reward: R, config: SolverConfig) -> Result<Self> {
        if n == 0 {
            return Err(BreakupError::Config("the number of agents must be positive".into()));
        }
        if max_parts == 0 || max_parts > n {
            return Err(BreakupError::Config(format!(
                "max_parts must be in 1..={n}, got {max_parts}"
            )));
        }
        config.validate()?;
        Ok(BreakupGame {
            n,
            max_parts,
            reward,
            config,
        })
    }

    /// Passive values of the singletons, the base of the induction.
    fn base_level(&self) -> LevelTable {
        let singletons = Partition::singletons(self.n);
        let values = PassiveValues::from([(1, self.reward.reward(&singletons, 1))]);
        LevelTable::from([(singletons, values)])
    }

    /// Computes all levels from the singletons up to the grand coalition.
    pub fn solve(&self, reporter: &mut dyn Reporter) -> Result<PassiveTable> {
        let start = Instant::now();
        let mut table = PassiveTable::new(self.max_parts);
        table.commit(self.n, self.base_level());
        report_level(reporter, self.n, 1, start)?;

        for k in (1..self.n).rev() {
            let prev = table.level(k + 1).ok_or(BreakupError::MissingLevel { parts: k + 1 })?;
            let (level, count) = compute_level(self.n, k, prev, &self.reward, &self.config)?;
            table.commit(k, level);
            report_level(reporter, k, count, start)?;
        }
        Ok(table)
    }

    pub fn stable_descendants(&self, table: &PassiveTable, reporter: &mut dyn Reporter) -> Result<Extraction> {
        extract_stable(self.n, table, &self.reward, reporter)
    }

    /// Solves the game and reports its stable descendants.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<Extraction> {
        let start = Instant::now();
        reporter.start(self.n)?;
        let table = self.solve(reporter)?;
        let extraction = self.stable_descendants(&table, reporter)?;
        let elapsed = start.elapsed();
        info!(
            n = self.n,
            stable = extraction.stable.len(),
            complete = extraction.is_complete(),
            elapsed = elapsed.as_secs_f64(),
            "run finished"
        );
        reporter.finish(elapsed)?;
        Ok(extraction)
    }
}

fn report_level(reporter: &mut dyn Reporter, parts: usize, count: usize, start: Instant) -> Result<()> {
    reporter.append_progress(&LevelProgress {
        parts,
        count,
        peak_memory_bytes: peak_memory_bytes(),
        elapsed: start.elapsed(),
    })
}
