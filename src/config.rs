use std::fmt;

use serde::{Deserialize, Serialize};
use sorted_vec::SortedVec;

/// Summary of a board: the sizes of its groups of adjacent sticks, largest
/// first.
///
/// Two boards with the same groups in a different order share the same
/// configuration, since the game only depends on group sizes.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(Vec<usize>);

impl Configuration {
    /// Builds the canonical configuration of the given groups, in any order.
    /// Zero-sized groups are dropped.
    pub fn new(mut groups: Vec<usize>) -> Configuration {
        groups.retain(|&g| g > 0);
        groups.sort_unstable_by(|a, b| b.cmp(a));
        Configuration(groups)
    }

    /// Wraps groups that are already sorted largest first.
    fn from_sorted(groups: Vec<usize>) -> Configuration {
        debug_assert!(groups.windows(2).all(|w| w[0] >= w[1]));
        debug_assert!(groups.iter().all(|&g| g > 0));
        Configuration(groups)
    }

    /// The configuration of an empty board.
    pub fn empty() -> Configuration {
        Configuration(vec![])
    }

    /// `n` isolated sticks.
    pub fn all_ones(n: usize) -> Configuration {
        Configuration(vec![1; n])
    }

    pub fn groups(&self) -> &[usize] {
        &self.0
    }

    /// Total number of sticks.
    pub fn sticks(&self) -> usize {
        self.0.iter().sum()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn largest(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// True if every group holds a single stick (and there is at least one).
    pub fn is_all_ones(&self) -> bool {
        self.largest() == Some(1)
    }

    /// Number of groups of exactly `size` sticks.
    pub fn count(&self, size: usize) -> usize {
        self.0.iter().filter(|&&g| g == size).count()
    }

    /// The configuration made of the groups of both `self` and `other`.
    pub fn composite(&self, other: &Configuration) -> Configuration {
        let mut groups = self.0.clone();
        groups.extend_from_slice(&other.0);
        Configuration::new(groups)
    }

    /// True if every group of `sub` can be matched with its own group of
    /// `self`.
    pub fn contains(&self, sub: &Configuration) -> bool {
        sub.0.iter().all(|&g| self.count(g) >= sub.count(g))
    }

    /// Removes the groups of `sub` from `self`, one for one. Returns `None`
    /// if `sub` is not contained in `self`.
    pub fn without(&self, sub: &Configuration) -> Option<Configuration> {
        let (rest, unmatched) = cancel_common(self, sub);
        if !unmatched.is_empty() {
            return None;
        }
        Some(Configuration::new(rest.into_vec()))
    }

    /// Drops the last `n` groups, which are the smallest ones.
    pub(crate) fn without_smallest(&self, n: usize) -> Configuration {
        let keep = self.0.len().saturating_sub(n);
        Configuration::from_sorted(self.0[..keep].to_vec())
    }
}

impl From<Vec<usize>> for Configuration {
    fn from(groups: Vec<usize>) -> Self {
        Configuration::new(groups)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, g) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{g}")?;
        }
        write!(f, "]")
    }
}

/// Cancels the groups that `from` and `to` have in common, one for one.
///
/// Returns the groups of `from` left unmatched (smallest first) and the
/// groups of `to` left unmatched (largest first).
pub(crate) fn cancel_common(from: &Configuration, to: &Configuration) -> (SortedVec<usize>, Vec<usize>) {
    let mut from_rest = SortedVec::from_unsorted(from.0.clone());
    let mut to_rest = vec![];
    for &group in &to.0 {
        if from_rest.remove_item(&group).is_none() {
            to_rest.push(group);
        }
    }
    (from_rest, to_rest)
}

/// Table of every configuration of a given number of sticks, indexed by
/// stick count then group count.
///
/// The table only ever grows: sizes already present are never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTable {
    sizes: Vec<Vec<Vec<Configuration>>>,
}

impl Default for ConfigTable {
    fn default() -> Self {
        ConfigTable::new()
    }
}

impl ConfigTable {
    /// A table that only knows the (configuration-less) size 0.
    pub fn new() -> ConfigTable {
        ConfigTable { sizes: vec![vec![]] }
    }

    /// Largest stick count present in the table.
    pub fn built_up_to(&self) -> usize {
        self.sizes.len() - 1
    }

    /// Fills the table for every stick count up to `up_to`, resuming after
    /// the largest size already built.
    ///
    /// An n-stick k-group configuration (k >= 2) is either an (n-1)-stick
    /// (k-1)-group configuration with an extra group of 1, or, when every
    /// group holds at least 2 sticks, an (n-k)-stick k-group configuration
    /// with one more stick in every group. The two sets are disjoint, so each
    /// partition of n appears exactly once.
    pub fn build(&mut self, up_to: usize) {
        for n in self.sizes.len()..=up_to {
            let mut by_groups = Vec::with_capacity(n + 1);
            by_groups.push(vec![]);
            by_groups.push(vec![Configuration::from_sorted(vec![n])]);
            for k in 2..=n {
                let mut configs: Vec<Configuration> = self
                    .configs(n - 1, k - 1)
                    .iter()
                    .map(|c| {
                        let mut groups = c.0.clone();
                        groups.push(1);
                        Configuration::from_sorted(groups)
                    })
                    .collect();
                if k <= n - k {
                    configs.extend(
                        self.configs(n - k, k)
                            .iter()
                            .map(|c| Configuration::from_sorted(c.0.iter().map(|g| g + 1).collect())),
                    );
                }
                by_groups.push(configs);
            }
            self.sizes.push(by_groups);
        }
    }

    /// The n-stick k-group configurations, or nothing if the size was not
    /// built or no such configuration exists.
    pub fn configs(&self, n: usize, k: usize) -> &[Configuration] {
        self.sizes
            .get(n)
            .and_then(|by_groups| by_groups.get(k))
            .map_or(&[], Vec::as_slice)
    }

    /// Every n-stick configuration, by increasing group count.
    pub fn configs_of_size(&self, n: usize) -> impl Iterator<Item = &Configuration> {
        self.sizes.get(n).into_iter().flatten().flatten()
    }

    /// Total number of configurations stored.
    pub fn len(&self) -> usize {
        self.sizes.iter().flatten().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
