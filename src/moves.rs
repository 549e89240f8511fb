use std::fmt;

use rand::{seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::config::{cancel_common, Configuration};

/// Returns true if a single move taking at most `max_take` sticks leads from
/// `from` to `to`.
///
/// A move touches exactly one group: it removes it, trims one of its edges,
/// or splits it in two. So the group count changes by at most one, and every
/// group of `from` but one must be found again in `to`.
pub fn move_exists(from: &Configuration, to: &Configuration, max_take: usize) -> bool {
    if from.len().abs_diff(to.len()) > 1 {
        return false;
    }
    match from.sticks().checked_sub(to.sticks()) {
        Some(take) if (1..=max_take).contains(&take) => {}
        _ => return false,
    }
    let (from_rest, _) = cancel_common(from, to);
    from_rest.len() == 1
}

/// A move stated in terms of group sizes rather than board indices: take
/// `take` sticks from a group of `group_size` sticks, leaving `offset` sticks
/// between the edge of the group and the first stick taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub take: usize,
    pub group_size: usize,
    pub offset: usize,
}

impl MoveDescriptor {
    /// The move from `from` to `to`, or `None` if they are not one move
    /// apart. A split leaves the larger piece before the sticks taken.
    pub fn between(from: &Configuration, to: &Configuration) -> Option<MoveDescriptor> {
        let take = from.sticks().checked_sub(to.sticks())?;
        if !move_exists(from, to, take) {
            return None;
        }
        let (from_rest, to_rest) = cancel_common(from, to);
        let group_size = *from_rest.first()?;
        let offset = match to_rest.as_slice() {
            // whole group, or its left edge
            [] | [_] => 0,
            // middle of the group
            [left, _] => *left,
            _ => return None,
        };
        Some(MoveDescriptor {
            take,
            group_size,
            offset,
        })
    }

    /// A uniformly random legal move on `config`: random group, random take,
    /// random position inside the group. `None` if there is nothing to take.
    pub fn random<R: Rng + ?Sized>(config: &Configuration, max_take: usize, rng: &mut R) -> Option<MoveDescriptor> {
        if max_take == 0 {
            return None;
        }
        let &group_size = config.groups().choose(rng)?;
        let take = rng.random_range(1..=max_take.min(group_size));
        let offset = rng.random_range(0..=group_size - take);
        Some(MoveDescriptor {
            take,
            group_size,
            offset,
        })
    }

    /// The same move played from the other edge of the group.
    pub fn mirrored(&self) -> MoveDescriptor {
        MoveDescriptor {
            offset: self.group_size - self.take - self.offset,
            ..*self
        }
    }

    /// Sticks left in the group on the far side of the move.
    pub fn remainder(&self) -> usize {
        self.group_size - self.take - self.offset
    }

    /// The configuration reached by playing this move on `config`.
    pub fn apply(&self, config: &Configuration) -> Option<Configuration> {
        if self.take == 0 || self.take + self.offset > self.group_size {
            return None;
        }
        let touched = Configuration::new(vec![self.group_size]);
        let rest = config.without(&touched)?;
        Some(rest.composite(&Configuration::new(vec![self.offset, self.remainder()])))
    }
}

impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "take {} from a group of {} at offset {}",
            self.take, self.group_size, self.offset
        )
    }
}

/// Describes the move from `from` to `to`, picking at random between the two
/// equivalent edges of the touched group so the AI does not always play the
/// same side. Returns `None` if the configurations are not one move apart.
pub fn describe_move_between<R: Rng + ?Sized>(
    from: &Configuration,
    to: &Configuration,
    rng: &mut R,
) -> Option<MoveDescriptor> {
    let descriptor = MoveDescriptor::between(from, to)?;
    if rng.random_bool(0.5) {
        Some(descriptor.mirrored())
    } else {
        Some(descriptor)
    }
}
