use std::{fmt, str::FromStr};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    config::Configuration,
    error::{NimError, Result},
    moves::MoveDescriptor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Stick,
    Gap,
}

impl Cell {
    pub const STICK_CHAR: char = '|';
    pub const GAP_CHAR: char = '-';

    pub fn to_char(self) -> char {
        match self {
            Cell::Stick => Cell::STICK_CHAR,
            Cell::Gap => Cell::GAP_CHAR,
        }
    }
}

impl TryFrom<char> for Cell {
    type Error = NimError;

    fn try_from(c: char) -> Result<Cell> {
        match c {
            Cell::STICK_CHAR => Ok(Cell::Stick),
            Cell::GAP_CHAR => Ok(Cell::Gap),
            other => Err(NimError::InvalidBoard(other)),
        }
    }
}

/// A maximal run of adjacent sticks on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    pub start: usize,
    pub size: usize,
}

/// A line of cells, each holding a stick or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// A board of `size` cells, all filled with sticks.
    pub fn new(size: usize) -> Board {
        Board {
            cells: vec![Cell::Stick; size],
        }
    }

    pub fn from_cells(cells: Vec<Cell>) -> Board {
        Board { cells }
    }

    /// Lays the groups of `config` out from largest to smallest, separated by
    /// a single gap, then pads with gaps up to `board_size` cells (the
    /// tightest fit if `None`).
    pub fn from_config(config: &Configuration, board_size: Option<usize>) -> Result<Board> {
        Board::lay_out(config, config.groups(), board_size)
    }

    /// Same as [`Board::from_config`], with the groups in a random order.
    pub fn from_config_shuffled<R: Rng + ?Sized>(
        config: &Configuration,
        board_size: Option<usize>,
        rng: &mut R,
    ) -> Result<Board> {
        let mut groups = config.groups().to_vec();
        groups.shuffle(rng);
        Board::lay_out(config, &groups, board_size)
    }

    fn lay_out(config: &Configuration, groups: &[usize], board_size: Option<usize>) -> Result<Board> {
        let min_size = (config.sticks() + config.len()).saturating_sub(1);
        let board_size = board_size.unwrap_or(min_size);
        if board_size < min_size {
            return Err(NimError::ConfigDoesNotFit {
                config: config.clone(),
                board_size,
            });
        }
        let mut cells = Vec::with_capacity(board_size);
        for (i, &group) in groups.iter().enumerate() {
            if i > 0 {
                cells.push(Cell::Gap);
            }
            cells.resize(cells.len() + group, Cell::Stick);
        }
        cells.resize(board_size, Cell::Gap);
        Ok(Board { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no stick is left, which ends the game.
    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&Cell::Stick)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fills every cell with a stick again.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Stick);
    }

    /// Groups of sticks from left to right.
    pub fn to_groups(&self) -> Vec<Group> {
        let mut groups = vec![];
        let mut start = None;
        // the trailing gap closes a group touching the right edge
        for (i, cell) in self.cells.iter().chain([&Cell::Gap]).enumerate() {
            match (cell, start) {
                (Cell::Stick, None) => start = Some(i),
                (Cell::Gap, Some(s)) => {
                    groups.push(Group { start: s, size: i - s });
                    start = None;
                }
                _ => (),
            }
        }
        groups
    }

    pub fn to_config(&self) -> Configuration {
        Configuration::new(self.to_groups().iter().map(|g| g.size).collect())
    }

    /// Every move taking `take` sticks from a group of exactly `group_size`
    /// sticks, `offset` sticks away from either edge of the group.
    pub fn list_moves(&self, take: usize, group_size: usize, offset: usize) -> Vec<Move> {
        if take == 0 || take + offset > group_size {
            return vec![];
        }
        let mut moves = vec![];
        for group in self.to_groups().into_iter().filter(|g| g.size == group_size) {
            let left = group.start + offset;
            let right = group.start + group.size - offset - take;
            moves.push(Move::new(left, left + take));
            if right != left {
                moves.push(Move::new(right, right + take));
            }
        }
        moves
    }

    /// The move described by `descriptor`, played in the first group of the
    /// right size.
    pub fn realize(&self, descriptor: &MoveDescriptor) -> Result<Move> {
        let unrealizable = || NimError::UnrealizableMove {
            descriptor: *descriptor,
            board: self.to_string(),
        };
        if descriptor.take == 0 || descriptor.take + descriptor.offset > descriptor.group_size {
            return Err(unrealizable());
        }
        let group = self
            .to_groups()
            .into_iter()
            .find(|g| g.size == descriptor.group_size)
            .ok_or_else(unrealizable)?;
        let left = group.start + descriptor.offset;
        Ok(Move::new(left, left + descriptor.take))
    }

    /// Removes every stick covered by `mv`. Returns false if the move covered
    /// a gap or went past the end of the board, i.e. it was not legal.
    pub fn play_move(&mut self, mv: Move) -> bool {
        let mut only_sticks = true;
        for i in mv.left..mv.right {
            match self.cells.get_mut(i) {
                Some(cell) => {
                    only_sticks &= *cell == Cell::Stick;
                    *cell = Cell::Gap;
                }
                None => only_sticks = false,
            }
        }
        only_sticks
    }
}

impl FromStr for Board {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Board> {
        let cells = s.chars().map(Cell::try_from).collect::<Result<Vec<_>>>()?;
        Ok(Board { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

/// A half-open range of board cells to empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    left: usize,
    right: usize,
}

impl Move {
    /// The range between two cell indices, in either order.
    pub fn new(a: usize, b: usize) -> Move {
        Move {
            left: a.min(b),
            right: a.max(b),
        }
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn right(&self) -> usize {
        self.right
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.right - self.left
    }

    pub fn is_empty(&self) -> bool {
        self.left == self.right
    }

    pub fn is_out_of_bounds_on(&self, board: &Board) -> bool {
        self.right > board.len()
    }

    pub fn contains_gap_on(&self, board: &Board) -> bool {
        let right = self.right.min(board.len());
        let left = self.left.min(right);
        board.cells[left..right].contains(&Cell::Gap)
    }

    pub fn takes_too_many_for(&self, max_take: usize) -> bool {
        self.len() > max_take
    }

    pub fn is_legal_on(&self, board: &Board, max_take: usize) -> bool {
        !self.is_empty()
            && !self.is_out_of_bounds_on(board)
            && !self.contains_gap_on(board)
            && !self.takes_too_many_for(max_take)
    }

    /// The same move without the gaps at its ends, or `None` if it covers no
    /// stick at all.
    pub fn strip_on(&self, board: &Board) -> Option<Move> {
        let right = self.right.min(board.len());
        let covered = board.cells.get(self.left..right)?;
        let first = covered.iter().position(|&c| c == Cell::Stick)?;
        let last = covered.iter().rposition(|&c| c == Cell::Stick)?;
        Some(Move::new(self.left + first, self.left + last + 1))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.left, self.right)
    }
}
