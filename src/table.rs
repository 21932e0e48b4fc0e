use std::collections::BTreeMap;

use tracing::debug;

use super::*;

/// Passive values of the levels computed so far.
///
/// Levels with at most `ceiling` coalitions are archived for the extraction
/// phase. Coarser levels only need the level right below them, so at most one
/// level above the ceiling is cached at any time.
#[derive(Debug)]
pub struct PassiveTable {
    ceiling: usize,
    archive: BTreeMap<usize, LevelTable>,
    cache: Option<(usize, LevelTable)>,
}

impl PassiveTable {
    pub fn new(ceiling: usize) -> Self {
        PassiveTable {
            ceiling,
            archive: BTreeMap::new(),
            cache: None,
        }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Stores a completed level. Levels must be committed from the finest to
    /// the coarsest; the cached level, if any, is evicted.
    pub fn commit(&mut self, parts: usize, level: LevelTable) {
        debug_assert!(
            self.archive.keys().chain(self.cache.iter().map(|(k, _)| k)).all(|&k| k > parts),
            "Levels must be committed by decreasing number of parts."
        );
        let evicted = if parts <= self.ceiling {
            self.archive.insert(parts, level);
            self.cache.take()
        } else {
            self.cache.replace((parts, level))
        };
        if let Some((k, level)) = evicted {
            debug!(parts = k, partitions = level.len(), "evicted level");
        }
    }

    pub fn level(&self, parts: usize) -> Option<&LevelTable> {
        match &self.cache {
            Some((k, level)) if *k == parts => Some(level),
            _ => self.archive.get(&parts),
        }
    }

    pub fn get(&self, partition: &Partition) -> Option<&PassiveValues> {
        self.level(partition.part_count())?.get(partition)
    }

    /// Part counts of the levels currently held, finest first.
    pub fn retained_levels(&self) -> Vec<usize> {
        let mut levels: Vec<usize> = self.cache.iter().map(|(k, _)| *k).collect();
        levels.extend(self.archive.keys().rev());
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_of(p: Partition, value: Reward) -> LevelTable {
        let mut values = PassiveValues::new();
        for q in p.distinct_sizes() {
            values.insert(q, value);
        }
        LevelTable::from([(p, values)])
    }

    #[test]
    fn test_retention() {
        let mut table = PassiveTable::new(2);
        table.commit(4, level_of(Partition::singletons(4), 1.0));
        assert_eq!(table.retained_levels(), [4]);
        table.commit(3, level_of(Partition::new(vec![2, 1, 1]), 2.0));
        assert_eq!(table.retained_levels(), [3]);
        assert!(table.level(4).is_none());
        table.commit(2, level_of(Partition::new(vec![3, 1]), 3.0));
        assert_eq!(table.retained_levels(), [2]);
        table.commit(1, level_of(Partition::grand(4), 4.0));
        assert_eq!(table.retained_levels(), [2, 1]);
        assert_eq!(table.get(&Partition::new(vec![3, 1])).and_then(|v| v.get(&3)), Some(&3.0));
        assert_eq!(table.get(&Partition::grand(4)).and_then(|v| v.get(&4)), Some(&4.0));
    }

    #[test]
    fn test_full_retention() {
        let mut table = PassiveTable::new(3);
        table.commit(3, level_of(Partition::singletons(3), 1.0));
        table.commit(2, level_of(Partition::new(vec![2, 1]), 2.0));
        table.commit(1, level_of(Partition::grand(3), 3.0));
        assert_eq!(table.retained_levels(), [3, 2, 1]);
        assert!(table.get(&Partition::singletons(3)).is_some());
    }
}
