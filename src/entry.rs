use rayon::prelude::*;
use sorted_vec::SortedVec;
use tracing::debug;

use crate::config::{ConfigTable, Configuration};
use crate::moves::move_exists;

/// The losing configurations known for one value of `max_take`, kept around
/// so that changing rules back and forth does not redo the work.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    max_take: usize,
    built_up_to: usize,
    losing: Vec<Configuration>,
    index: SortedVec<Configuration>,
}

impl Entry {
    pub fn new(max_take: usize) -> Entry {
        Entry {
            max_take,
            built_up_to: 0,
            losing: vec![],
            index: SortedVec::new(),
        }
    }

    pub fn max_take(&self) -> usize {
        self.max_take
    }

    /// Largest stick count whose configurations have all been classified.
    pub fn built_up_to(&self) -> usize {
        self.built_up_to
    }

    /// Losing configurations by increasing stick count.
    pub fn losing(&self) -> &[Configuration] {
        &self.losing
    }

    /// Losing configurations of at most `sticks` sticks.
    pub fn losing_up_to(&self, sticks: usize) -> &[Configuration] {
        let end = self.losing.partition_point(|c| c.sticks() <= sticks);
        &self.losing[..end]
    }

    pub fn is_losing(&self, config: &Configuration) -> bool {
        self.index.binary_search(config).is_ok()
    }

    /// Known losing configurations reachable from `from` in one move.
    pub fn reachable_from<'a>(&'a self, from: &'a Configuration) -> impl Iterator<Item = &'a Configuration> {
        let sticks = from.sticks();
        let start = self
            .losing
            .partition_point(|c| c.sticks() < sticks.saturating_sub(self.max_take));
        let end = self.losing.partition_point(|c| c.sticks() < sticks);
        self.losing[start..end]
            .iter()
            .filter(move |lc| move_exists(from, lc, self.max_take))
    }

    fn push(&mut self, config: Configuration) {
        self.index.insert(config.clone());
        self.losing.push(config);
    }

    /// Classifies every configuration of `table` from `built_up_to() + 1`
    /// sticks up to `up_to` sticks.
    ///
    /// A configuration is losing iff no known losing configuration can be
    /// reached from it in one move. Since every move removes at least one
    /// stick, sizes are handled in increasing order, and the configurations
    /// of a single size can be checked independently of each other.
    ///
    /// With `odd_shortcut`, odd sizes are not searched: only the all-ones
    /// configuration is recorded.
    pub fn extend(&mut self, table: &ConfigTable, up_to: usize, odd_shortcut: bool) {
        debug_assert!(table.built_up_to() >= up_to);
        for n in self.built_up_to + 1..=up_to {
            if odd_shortcut && n % 2 == 1 {
                self.push(Configuration::all_ones(n));
                continue;
            }
            let candidates: Vec<&Configuration> = table.configs_of_size(n).collect();
            let found: Vec<Configuration> = candidates
                .into_par_iter()
                .filter(|c| self.reachable_from(c).next().is_none())
                .cloned()
                .collect();
            debug!(max_take = self.max_take, sticks = n, losing = found.len(), "classified configurations");
            for config in found {
                self.push(config);
            }
        }
        self.built_up_to = self.built_up_to.max(up_to);
    }
}
