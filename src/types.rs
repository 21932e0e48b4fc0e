use std::collections::{BTreeMap, HashMap};

use super::Partition;

/// Size of a coalition (number of members).
pub type Size = usize;
/// Payoff to a single member of a coalition.
pub type Reward = f64;
/// Passive value for every distinct coalition size of one partition.
pub type PassiveValues = BTreeMap<Size, Reward>;
/// Passive values of every partition of a single level.
pub type LevelTable = HashMap<Partition, PassiveValues>;
