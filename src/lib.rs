pub mod ai;
pub mod board;
pub mod config;
mod entry;
pub mod error;
pub mod game;
pub mod moves;
pub mod prune;

use std::time::Instant;

use dashmap::{mapref::one::Ref, DashMap};
use entry::Entry;
use tracing::{info, warn};

pub use crate::ai::{Ai, AiPlayer};
pub use crate::board::{Board, Cell, Group, Move};
pub use crate::config::{ConfigTable, Configuration};
pub use crate::error::{NimError, Result};
pub use crate::game::{Game, Player, Settings};
pub use crate::moves::{describe_move_between, move_exists, MoveDescriptor};
pub use crate::prune::main_losing_configs;


/// Tuning of the losing-configuration search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverOptions {
    /// Skip the search for odd stick counts and record only the all-ones
    /// configuration as losing.
    ///
    /// This holds for odd `max_take` of at least 3 as far as it was checked,
    /// but fails for other values (with `max_take = 2`, `[9]` is losing), so
    /// it is only honored for odd `max_take >= 3`.
    pub odd_shortcut: bool,
}

impl SolverOptions {
    /// Whether the odd shortcut is actually used for `max_take`.
    pub fn odd_shortcut_applies(&self, max_take: usize) -> bool {
        self.odd_shortcut && max_take >= 3 && max_take % 2 == 1
    }
}

/// Finds the losing configurations of Sticky-Nim, incrementally.
///
/// Results are cached per `max_take`: asking again for a board that is not
/// larger than one already solved costs nothing, and a larger board only
/// classifies the new sizes.
#[derive(Debug, Default)]
pub struct Solver {
    table: ConfigTable,
    /// Losing lists by `max_take`, kept across calls to `set_rules`. Only
    /// `set_rules` writes to it; queries hold a read guard on one entry.
    backups: DashMap<usize, Entry>,
    options: SolverOptions,
    settings: Option<Settings>,
}

impl Solver {
    /// Constructs a new, empty solver.
    pub fn new() -> Solver {
        Solver::with_options(SolverOptions::default())
    }

    /// Constructs a new, empty solver searching with `options`.
    pub fn with_options(options: SolverOptions) -> Solver {
        Solver {
            table: ConfigTable::new(),
            backups: DashMap::new(),
            options,
            settings: None,
        }
    }

    /// The options given at construction.
    pub fn options(&self) -> SolverOptions {
        self.options
    }

    /// The settings of the last call to [`Solver::set_rules`], if any.
    pub fn settings(&self) -> Option<Settings> {
        self.settings
    }

    /// Every configuration of up to the largest board solved so far.
    pub fn table(&self) -> &ConfigTable {
        &self.table
    }

    /// Returns true if calling [`Solver::set_rules`] with `settings` would
    /// require new computations.
    pub fn loading_needed(&self, settings: &Settings) -> bool {
        self.backups
            .get(&settings.max_take())
            .map_or(true, |entry| settings.board_size() > entry.built_up_to())
    }

    /// Makes `settings` the active rules, solving every configuration that
    /// fits on the board. Must be called before any query.
    pub fn set_rules(&mut self, settings: Settings) {
        let odd_shortcut = self.options.odd_shortcut_applies(settings.max_take());
        if self.options.odd_shortcut && !odd_shortcut {
            warn!(
                max_take = settings.max_take(),
                "odd shortcut is not valid for this max take, searching every size"
            );
        }

        let start = Instant::now();
        self.table.build(settings.board_size());
        let mut entry = self
            .backups
            .entry(settings.max_take())
            .or_insert_with(|| Entry::new(settings.max_take()));
        let known = entry.built_up_to();
        if settings.board_size() > known {
            entry.extend(&self.table, settings.board_size(), odd_shortcut);
            info!(
                max_take = entry.max_take(),
                from = known + 1,
                up_to = settings.board_size(),
                losing = entry.losing().len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "solved new configurations"
            );
        }
        drop(entry);
        self.settings = Some(settings);
    }

    fn active_entry(&self) -> Result<(Settings, Ref<'_, usize, Entry>)> {
        let settings = self.settings.ok_or(NimError::NotInitialized)?;
        let entry = self
            .backups
            .get(&settings.max_take())
            .ok_or(NimError::NotInitialized)?;
        Ok((settings, entry))
    }

    fn check_solved(entry: &Entry, config: &Configuration) -> Result<()> {
        if config.sticks() > entry.built_up_to() {
            return Err(NimError::Unsolved {
                sticks: config.sticks(),
                built_up_to: entry.built_up_to(),
            });
        }
        Ok(())
    }

    /// Losing configurations that fit on the active board, by increasing
    /// stick count.
    pub fn losing_configs(&self) -> Result<Vec<Configuration>> {
        let (settings, entry) = self.active_entry()?;
        Ok(entry.losing_up_to(settings.board_size()).to_vec())
    }

    /// Whether the player facing `config` loses against perfect play.
    pub fn is_losing(&self, config: &Configuration) -> Result<bool> {
        let (_, entry) = self.active_entry()?;
        Solver::check_solved(&entry, config)?;
        Ok(entry.is_losing(config))
    }

    /// Every losing configuration that can be reached from `config` in one
    /// move under the active rules. `config` is winning iff this is not
    /// empty.
    pub fn reachable_losing_configs(&self, config: &Configuration) -> Result<Vec<Configuration>> {
        let (_, entry) = self.active_entry()?;
        Solver::check_solved(&entry, config)?;
        Ok(entry.reachable_from(config).cloned().collect())
    }
}
