//! Merge rule management for BPE.
//!
//! Merge rules are kept as symbol-string pairs. A pair's rank is its
//! position in the merge list; lower ranks merge first, and a pair with no
//! rank is never merged.

use ahash::AHashMap;
use compact_str::CompactString;

/// A pair of adjacent symbols that can be merged.
pub type Pair = (CompactString, CompactString);

/// Merge rank mapping: pair -> rank.
pub type MergeMap = AHashMap<Pair, u32>;

/// Ordered merge rules with rank lookup.
#[derive(Debug, Clone, Default)]
pub struct MergeRanks {
    /// Pair -> rank
    ranks: MergeMap,
    /// Pairs in rank order
    ordered: Vec<Pair>,
}

impl MergeRanks {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ranks: MergeMap::with_capacity(capacity),
            ordered: Vec::with_capacity(capacity),
        }
    }

    /// Append a merge rule with the next rank.
    ///
    /// A pair that is already present keeps its first (lower) rank.
    ///
    /// # Arguments
    /// * `left` - The left symbol of the rule
    /// * `right` - The right symbol of the rule
    ///
    /// # Returns
    /// The rank the pair ends up with
    pub fn push(&mut self, left: &str, right: &str) -> u32 {
        let rank = self.ordered.len() as u32;
        let pair = (CompactString::new(left), CompactString::new(right));
        self.ranks.entry(pair.clone()).or_insert(rank);
        self.ordered.push(pair);
        rank
    }

    /// Rank of the pair `(left, right)`, or `None` if it never merges.
    #[inline]
    pub fn rank(&self, left: &str, right: &str) -> Option<u32> {
        let key = (CompactString::new(left), CompactString::new(right));
        self.ranks.get(&key).copied()
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Iterate over merge rules in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ordered.iter().map(|(l, r)| (l.as_str(), r.as_str()))
    }

    /// Create merge rules from a list of pairs, ranked in order.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut rules = Self::new();
        for (left, right) in pairs {
            rules.push(left, right);
        }
        rules
    }
}
