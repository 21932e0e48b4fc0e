use std::fmt;

use super::*;

/// A coalition structure, recorded as the sizes of its coalitions in
/// non-increasing order. Two structures with the same multiset of coalition
/// sizes are the same partition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Partition {
    parts: Vec<Size>,
}

impl Partition {
    fn _is_canonical(parts: &[Size]) -> bool {
        parts.iter().all(|&q| q > 0) && parts.windows(2).all(|w| w[0] >= w[1])
    }

    pub fn new(parts: Vec<Size>) -> Self {
        debug_assert!(
            Self::_is_canonical(&parts),
            "Coalition sizes must be positive and sorted in non-increasing order."
        );
        Self::new_unchecked(parts)
    }

    pub fn new_unchecked(parts: Vec<Size>) -> Self {
        Partition { parts }
    }

    /// Sorts the sizes into canonical order.
    pub fn from_vec(mut parts: Vec<Size>) -> Self {
        parts.sort_unstable_by(|a, b| b.cmp(a));
        Self::new(parts)
    }

    /// The first partition of `n` into `k` parts: `(n-k+1, 1, ..., 1)`.
    pub fn first(n: usize, k: usize) -> Self {
        debug_assert!(1 <= k && k <= n, "The number of parts must be in 1..=n.");
        let mut parts = vec![1; k];
        parts[0] = n - k + 1;
        Self::new_unchecked(parts)
    }

    pub fn singletons(n: usize) -> Self {
        Self::new_unchecked(vec![1; n])
    }

    pub fn grand(n: usize) -> Self {
        Self::new_unchecked(vec![n])
    }

    pub fn parts(&self) -> &[Size] {
        &self.parts
    }

    pub(crate) fn parts_mut(&mut self) -> &mut [Size] {
        &mut self.parts
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn total(&self) -> usize {
        self.parts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn contains(&self, q: Size) -> bool {
        self.parts.contains(&q)
    }

    pub fn multiplicity(&self, q: Size) -> usize {
        self.parts.iter().filter(|&&p| p == q).count()
    }

    /// Distinct coalition sizes, largest first.
    pub fn distinct_sizes(&self) -> impl Iterator<Item = Size> + '_ {
        self.parts
            .iter()
            .enumerate()
            .filter(|&(i, &q)| i == 0 || self.parts[i - 1] != q)
            .map(|(_, &q)| q)
    }

    /// Removes one coalition of size `q`. Returns an unchanged copy when no
    /// such coalition exists.
    pub fn remove(&self, q: Size) -> Partition {
        let mut parts = self.parts.clone();
        if let Some(pos) = parts.iter().position(|&p| p == q) {
            parts.remove(pos);
        }
        Self::new_unchecked(parts)
    }

    /// Inserts a coalition of size `q` before the first smaller one.
    pub fn add(&self, q: Size) -> Partition {
        debug_assert!(q > 0, "Coalition sizes must be positive.");
        let mut parts = self.parts.clone();
        let pos = parts.partition_point(|&p| p >= q);
        parts.insert(pos, q);
        Self::new_unchecked(parts)
    }

    /// A coalition of size `i` breaks into coalitions of sizes `j` and `i - j`.
    pub fn split(&self, i: Size, j: Size) -> Partition {
        debug_assert!(0 < j && j < i, "Split piece out of range.");
        debug_assert!(self.contains(i), "No coalition of the given size.");
        self.remove(i).add(j).add(i - j)
    }

    /// Coalitions of sizes `a` and `b` join into one of size `a + b`.
    pub fn merge(&self, a: Size, b: Size) -> Partition {
        debug_assert!(
            self.contains(a) && self.remove(a).contains(b),
            "No coalitions of the given sizes."
        );
        self.remove(a).remove(b).add(a + b)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, q) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, ")")
    }
}
