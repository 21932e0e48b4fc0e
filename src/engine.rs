use super::*;

/// The best way for a member of a coalition of size `size` to break it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Split {
    pub size: Size,
    /// Size of the new coalition the deviating member ends up in.
    pub piece: Size,
    /// Passive value of the deviating member after the split.
    pub value: Reward,
}

fn passive(prev: &LevelTable, partition: &Partition, size: Size) -> Result<Reward> {
    prev.get(partition)
        .and_then(|values| values.get(&size))
        .copied()
        .ok_or_else(|| BreakupError::MissingPassiveValue {
            partition: partition.clone(),
            size,
        })
}

/// Best split of a coalition of size `size`, measured with the passive values
/// of the next finer level. Ties go to the smallest piece. Returns `None` for
/// singletons, which cannot split.
pub fn best_split(prev: &LevelTable, partition: &Partition, size: Size) -> Result<Option<Split>> {
    let mut best: Option<Split> = None;
    for piece in 1..size {
        let value = passive(prev, &partition.split(size, piece), piece)?;
        if best.is_none_or(|b| value > b.value) {
            best = Some(Split { size, piece, value });
        }
    }
    Ok(best)
}

/// The best split of `size`, if it strictly improves on staying.
pub fn profitable_split<R: RewardModel + ?Sized>(
    prev: &LevelTable,
    reward: &R,
    partition: &Partition,
    size: Size,
) -> Result<Option<Split>> {
    Ok(best_split(prev, partition, size)?.filter(|s| s.value > reward.reward(partition, size)))
}

/// Passive values of `partition` given the finished next finer level.
///
/// A partition where no coalition size has a profitable split is stable, and
/// everybody gets the reward. Otherwise every member assumes the worst among
/// the continuations opened by any coalition that has a profitable split: one
/// of the other coalitions breaking, or its own coalition breaking, in which
/// case the member ends up in either of the two pieces.
pub fn evaluate<R: RewardModel + ?Sized>(prev: &LevelTable, reward: &R, partition: &Partition) -> Result<PassiveValues> {
    let sizes: Vec<Size> = partition.distinct_sizes().collect();
    let mut moves = Vec::new();
    for &q in &sizes {
        if let Some(split) = profitable_split(prev, reward, partition, q)? {
            moves.push((split, partition.split(split.size, split.piece)));
        }
    }

    let mut values = PassiveValues::new();
    if moves.is_empty() {
        for q in sizes {
            values.insert(q, reward.reward(partition, q));
        }
        return Ok(values);
    }

    for &q in &sizes {
        let shared = partition.multiplicity(q) > 1;
        let mut worst: Option<Reward> = None;
        let mut consider = |v: Reward| worst = Some(worst.map_or(v, |w| w.min(v)));
        for (split, child) in &moves {
            if split.size != q || shared {
                consider(passive(prev, child, q)?);
            }
            if split.size == q {
                consider(passive(prev, child, split.piece)?);
                consider(passive(prev, child, q - split.piece)?);
            }
        }
        values.insert(q, worst.unwrap_or_else(|| reward.reward(partition, q)));
    }
    Ok(values)
}

/// Evaluates the partitions of a level from `start` up to `end`, or to the
/// end of the level when `end` is `None`.
pub fn evaluate_range<R: RewardModel + ?Sized>(
    prev: &LevelTable,
    reward: &R,
    start: Partition,
    end: Option<Partition>,
) -> Result<LevelTable> {
    let mut level = LevelTable::new();
    let mut cursor = PartitionCursor::new(start);
    loop {
        let p = cursor.current();
        let values = evaluate(prev, reward, p)?;
        let last = end.as_ref() == Some(p);
        level.insert(p.clone(), values);
        if last || !cursor.advance() {
            break;
        }
    }
    Ok(level)
}
