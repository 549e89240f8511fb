use thiserror::Error;

use crate::{board::Move, config::Configuration, game::Settings, moves::MoveDescriptor};

pub type Result<T> = std::result::Result<T, NimError>;

/// Everything that can go wrong while solving or playing Sticky-Nim.
///
/// "No winning move" and "the board is full of gaps" are regular outcomes of
/// the game and are not represented here, except when a move is requested
/// from an empty board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NimError {
    #[error("no rules were set, call set_rules first")]
    NotInitialized,

    #[error("inconsistent settings between the AI ({ai}) and the game ({game})")]
    InconsistentSettings { ai: Settings, game: Settings },

    #[error("configurations of {sticks} sticks were not studied (solved up to {built_up_to})")]
    Unsolved { sticks: usize, built_up_to: usize },

    #[error("{from} and {to} are not one move apart")]
    NotOneMoveApart {
        from: Configuration,
        to: Configuration,
    },

    #[error("no move {descriptor} can be found on board {board}")]
    UnrealizableMove {
        descriptor: MoveDescriptor,
        board: String,
    },

    #[error("configuration {config} does not fit on a board of size {board_size}")]
    ConfigDoesNotFit {
        config: Configuration,
        board_size: usize,
    },

    #[error("board of size {got} given to a game of size {expected}")]
    BoardSizeMismatch { expected: usize, got: usize },

    #[error("unknown board cell {0:?}")]
    InvalidBoard(char),

    #[error("board size and max take must both be positive (got {board_size} and {max_take})")]
    InvalidSettings { board_size: usize, max_take: usize },

    #[error("illegal move {mv} on board {board}")]
    IllegalMove { mv: Move, board: String },

    #[error("the board has no stick left")]
    EmptyBoard,
}
