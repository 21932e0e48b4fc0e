use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::*;

/// Outcome of the walk from the grand coalition.
#[derive(Debug)]
pub struct Extraction {
    /// Structures without a profitable split, in discovery order.
    pub stable: Vec<Partition>,
    /// Set when the walk stopped at an evicted level.
    pub violation: Option<BreakupError>,
    /// Number of frontiers expanded.
    pub steps: usize,
}

impl Extraction {
    pub fn is_complete(&self) -> bool {
        self.violation.is_none()
    }
}

/// Children of `partition`: one per coalition size with a profitable split.
fn successors<R: RewardModel + ?Sized>(prev: &LevelTable, reward: &R, partition: &Partition) -> Result<Vec<Partition>> {
    let mut children = Vec::new();
    for q in partition.distinct_sizes() {
        if let Some(split) = profitable_split(prev, reward, partition, q)? {
            children.push(partition.split(split.size, split.piece));
        }
    }
    Ok(children)
}

/// Walks from the grand coalition of `n`, applying every profitable best
/// split, and reports the structures where nobody wants to split.
///
/// All partitions of a frontier have the same number of parts, one more than
/// the previous frontier, so the walk ends after at most `n - 1` steps.
pub fn extract_stable<R: RewardModel + ?Sized>(
    n: usize,
    table: &PassiveTable,
    reward: &R,
    reporter: &mut dyn Reporter,
) -> Result<Extraction> {
    let mut stable = Vec::new();
    let mut steps = 0;
    let mut frontier = BTreeSet::from([Partition::grand(n)]);
    reporter.start_results(n)?;
    while let Some(first) = frontier.first() {
        let parts = first.part_count();
        if parts > table.ceiling() {
            let violation = BreakupError::RetentionViolation {
                partition: first.clone(),
                needed: parts + 1,
                ceiling: table.ceiling(),
            };
            warn!(%violation, "extraction halted");
            reporter.append_error(&violation.to_string())?;
            return Ok(Extraction {
                stable,
                violation: Some(violation),
                steps,
            });
        }
        let empty = LevelTable::new();
        let prev = if parts == n {
            &empty
        } else {
            match table.level(parts + 1) {
                Some(level) => level,
                None => {
                    // the level below the ceiling was evicted: nothing at the
                    // ceiling can be split any further
                    debug!(parts, size = frontier.len(), "frontier at the retention ceiling");
                    for p in &frontier {
                        reporter.append_result(p)?;
                        stable.push(p.clone());
                    }
                    steps += 1;
                    break;
                }
            }
        };

        debug!(parts, size = frontier.len(), "expanding frontier");
        let mut next = BTreeSet::new();
        for p in &frontier {
            let children = successors(prev, reward, p)?;
            if children.is_empty() {
                reporter.append_result(p)?;
                stable.push(p.clone());
            }
            next.extend(children);
        }
        frontier = next;
        steps += 1;
    }
    Ok(Extraction {
        stable,
        violation: None,
        steps,
    })
}
