use std::cmp::min;

use super::*;

/// Moves `v` to the next partition with the same total and the same number
/// of parts in reverse lexicographic order. Returns `false`, leaving `v`
/// untouched, when `v` is already the last (most balanced) partition.
///
/// A suffix of length `l` and sum `s` is in its final configuration iff its
/// first entry is `ceil(s / l)`. We look for the shortest suffix which is not,
/// lower its first entry by one and refill the rest of the suffix with the
/// first partition whose parts do not exceed the lowered entry.
pub(crate) fn next_partition(v: &mut [Size]) -> bool {
    let Some(mut pos) = v.len().checked_sub(1) else {
        return false;
    };
    let mut sum = 0;
    let mut len = 0;
    let balanced = loop {
        sum += v[pos];
        len += 1;
        let balanced = v[pos] == sum.div_ceil(len);
        if !balanced || pos == 0 {
            break balanced;
        }
        pos -= 1;
    };
    if balanced {
        return false;
    }

    let mut cap = v[pos] - 1;
    while len > 0 {
        // without the cap, the remaining len - 1 slots would all be 1
        let q = min(sum - len + 1, cap);
        v[pos] = q;
        cap = q;
        sum -= q;
        len -= 1;
        pos += 1;
    }
    true
}

/// Cursor over the partitions of a level, owning its own buffer.
#[derive(Clone, Debug)]
pub struct PartitionCursor {
    current: Partition,
}

impl PartitionCursor {
    pub fn new(start: Partition) -> Self {
        PartitionCursor { current: start }
    }

    /// Cursor on the first partition of `n` into `k` parts.
    pub fn first(n: usize, k: usize) -> Self {
        Self::new(Partition::first(n, k))
    }

    pub fn current(&self) -> &Partition {
        &self.current
    }

    pub fn advance(&mut self) -> bool {
        next_partition(self.current.parts_mut())
    }
}

/// Iterator over the partitions of a level in reverse lexicographic order,
/// optionally stopping after a given partition.
pub struct Partitions {
    cursor: PartitionCursor,
    end: Option<Partition>,
    done: bool,
}

impl Partitions {
    /// All partitions of `n` into `k` parts.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            cursor: PartitionCursor::first(n, k),
            end: None,
            done: false,
        }
    }

    /// Partitions from `start` up to and including `end`, which must not
    /// precede `start`.
    pub fn range(start: Partition, end: Partition) -> Self {
        debug_assert_eq!(
            start.part_count(),
            end.part_count(),
            "Range bounds must belong to the same level."
        );
        Self {
            cursor: PartitionCursor::new(start),
            end: Some(end),
            done: false,
        }
    }

    /// Every partition of `n`, by increasing number of parts.
    pub fn all(n: usize) -> impl Iterator<Item = Partition> {
        (1..=n).flat_map(move |k| Self::new(n, k))
    }

    /// Number of partitions of `n` into `k` parts.
    pub fn count(n: usize, k: usize) -> usize {
        let mut cursor = PartitionCursor::first(n, k);
        let mut count = 1;
        while cursor.advance() {
            count += 1;
        }
        count
    }
}

impl Iterator for Partitions {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let p = self.cursor.current().clone();
        if self.end.as_ref() == Some(&p) || !self.cursor.advance() {
            self.done = true;
        }
        Some(p)
    }
}
