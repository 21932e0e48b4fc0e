use serde::{Deserialize, Serialize};

use super::*;

/// Payoff to a member of a coalition of a given size within a given
/// structure. Shared by all workers of a level, hence `Sync`.
pub trait RewardModel: Sync {
    fn reward(&self, partition: &Partition, size: Size) -> Reward;
}

impl<F> RewardModel for F
where
    F: Fn(&Partition, Size) -> Reward + Sync,
{
    fn reward(&self, partition: &Partition, size: Size) -> Reward {
        self(partition, size)
    }
}

/// Built-in reward functions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewardType {
    /// Cournot competition with linear demand: every coalition is a firm and
    /// its profit `1 / (m + 1)^2`, with `m` firms, is shared equally.
    #[default]
    LinearCournot,
}

use RewardType::*;

impl RewardModel for RewardType {
    fn reward(&self, partition: &Partition, size: Size) -> Reward {
        match self {
            LinearCournot => {
                let firms = (partition.part_count() + 1) as Reward;
                1.0 / (firms * firms * size as Reward)
            }
        }
    }
}
