use std::thread;

use tracing::debug;

use super::*;

/// A contiguous run of partitions of one level, handled by one worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    pub start: Partition,
    pub end: Partition,
    pub len: usize,
}

/// Cuts the `count` partitions of `n` into `k` parts into contiguous batches
/// of `ceil(count / workers)` partitions each.
pub fn plan_batches(n: usize, k: usize, count: usize, workers: usize) -> Vec<Batch> {
    debug_assert!(workers > 0, "At least one worker is needed.");
    let batch_size = count.div_ceil(workers).max(1);
    let mut batches = Vec::with_capacity(workers);
    let mut start = None;
    for (i, p) in Partitions::new(n, k).enumerate() {
        if i % batch_size == 0 {
            start = Some(p.clone());
        }
        if ((i + 1) % batch_size == 0 || i + 1 == count)
            && let Some(start) = start.take()
        {
            let len = i % batch_size + 1;
            batches.push(Batch { start, end: p, len });
        }
    }
    batches
}

/// Computes every partition of `n` into `k` parts from the finished level
/// `k + 1`. Large levels are split among scoped worker threads, each filling
/// its own table; the tables are merged once all workers have joined.
pub fn compute_level<R: RewardModel + ?Sized>(
    n: usize,
    k: usize,
    prev: &LevelTable,
    reward: &R,
    config: &SolverConfig,
) -> Result<(LevelTable, usize)> {
    let count = Partitions::count(n, k);
    if count < config.min_parallel {
        let level = evaluate_range(prev, reward, Partition::first(n, k), None)?;
        return Ok((level, count));
    }

    let batches = plan_batches(n, k, count, config.workers);
    debug!(parts = k, count, batches = batches.len(), "dispatching level to workers");
    let locals = thread::scope(|s| {
        let handles: Vec<_> = batches
            .iter()
            .map(|batch| s.spawn(move || evaluate_range(prev, reward, batch.start.clone(), Some(batch.end.clone()))))
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(batch, h)| h.join().unwrap_or_else(|_| Err(BreakupError::WorkerPanicked { batch })))
            .collect::<Vec<_>>()
    });

    let mut level = LevelTable::with_capacity(count);
    for local in locals {
        level.extend(local?);
    }
    debug_assert_eq!(level.len(), count, "Batches must cover the level exactly once.");
    Ok((level, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Level `k + 1` of `n`, computed sequentially from the singletons.
    fn finer_level(n: usize, k: usize) -> LevelTable {
        let reward = RewardType::LinearCournot;
        let singletons = Partition::singletons(n);
        let base = PassiveValues::from([(1, reward.reward(&singletons, 1))]);
        let mut prev = LevelTable::from([(singletons, base)]);
        for j in (k + 1..n).rev() {
            prev = evaluate_range(&prev, &reward, Partition::first(n, j), None).unwrap();
        }
        prev
    }

    fn config(min_parallel: usize, workers: usize) -> SolverConfig {
        SolverConfig {
            min_parallel,
            workers,
            ..SolverConfig::default()
        }
    }

    fn bits(level: &LevelTable) -> Vec<(Vec<Size>, Vec<(Size, u64)>)> {
        let mut out: Vec<_> = level
            .iter()
            .map(|(p, values)| (p.parts().to_vec(), values.iter().map(|(&q, v)| (q, v.to_bits())).collect()))
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_plan_batches() {
        // 9 partitions of 10 into 4 parts
        let batches = plan_batches(10, 4, 9, 4);
        assert_eq!(batches.iter().map(|b| b.len).collect::<Vec<_>>(), [3, 3, 3]);
        assert_eq!(batches[0].start, Partition::first(10, 4));
        assert_eq!(batches[2].end, Partition::new(vec![3, 3, 2, 2]));

        let batches = plan_batches(10, 4, 9, 2);
        assert_eq!(batches.iter().map(|b| b.len).collect::<Vec<_>>(), [5, 4]);

        let batches = plan_batches(10, 4, 9, 30);
        assert_eq!(batches.len(), 9);
        assert!(batches.iter().all(|b| b.start == b.end && b.len == 1));
    }

    #[test]
    fn test_batches_cover_level() {
        for workers in 1..=12 {
            let batches = plan_batches(12, 4, Partitions::count(12, 4), workers);
            let covered: Vec<Partition> = batches
                .into_iter()
                .flat_map(|b| Partitions::range(b.start, b.end))
                .collect();
            assert_eq!(covered, Partitions::new(12, 4).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let n = 14;
        let reward = RewardType::LinearCournot;
        for k in [3, 5, 8] {
            let prev = finer_level(n, k);
            let count = Partitions::count(n, k);
            let (sequential, c) = compute_level(n, k, &prev, &reward, &config(usize::MAX, 1)).unwrap();
            assert_eq!(c, count);
            for workers in [1, 2, 3, 7, count, count + 5] {
                for min_parallel in [1, count, count + 1] {
                    let (level, _) = compute_level(n, k, &prev, &reward, &config(min_parallel, workers)).unwrap();
                    assert_eq!(bits(&level), bits(&sequential));
                }
            }
        }
    }

    #[test]
    fn test_worker_error_fails_level() {
        let err = compute_level(6, 3, &LevelTable::new(), &RewardType::LinearCournot, &config(1, 2)).unwrap_err();
        assert!(matches!(err, BreakupError::MissingPassiveValue { .. }));
    }
}
