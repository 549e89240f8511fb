use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    board::{Board, Move},
    error::{NimError, Result},
};

pub const DEFAULT_BOARD_SIZE: usize = 20;
pub const DEFAULT_MAX_TAKE: usize = 3;

/// The rules that can change from one game to the next.
///
/// Both values are positive: the only ways to get a `Settings` are
/// [`Settings::new`], `Default` and deserialization, which all check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct Settings {
    board_size: usize,
    max_take: usize,
}

#[derive(Deserialize)]
struct RawSettings {
    board_size: usize,
    max_take: usize,
}

impl TryFrom<RawSettings> for Settings {
    type Error = NimError;

    fn try_from(raw: RawSettings) -> Result<Settings> {
        Settings::new(raw.board_size, raw.max_take)
    }
}

impl Settings {
    pub fn new(board_size: usize, max_take: usize) -> Result<Settings> {
        if board_size == 0 || max_take == 0 {
            return Err(NimError::InvalidSettings {
                board_size,
                max_take,
            });
        }
        Ok(Settings {
            board_size,
            max_take,
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Most sticks a single move may take.
    pub fn max_take(&self) -> usize {
        self.max_take
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            board_size: DEFAULT_BOARD_SIZE,
            max_take: DEFAULT_MAX_TAKE,
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sticks, at most {} per turn", self.board_size, self.max_take)
    }
}

/// Someone able to choose a move in a game.
pub trait Player {
    fn name(&self) -> &str;

    /// Returns the move this player wants to play on the game's board.
    fn ask_move(&mut self, game: &Game) -> Result<Move>;
}

/// A board together with the rules it is played with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    settings: Settings,
    board: Board,
}

impl Game {
    pub fn new(settings: Settings) -> Game {
        Game {
            settings,
            board: Board::new(settings.board_size),
        }
    }

    /// A game resumed from an arbitrary position.
    pub fn with_board(settings: Settings, board: Board) -> Result<Game> {
        if board.len() != settings.board_size {
            return Err(NimError::BoardSizeMismatch {
                expected: settings.board_size,
                got: board.len(),
            });
        }
        Ok(Game { settings, board })
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays `mv` if it is legal under this game's rules.
    pub fn play_move(&mut self, mv: Move) -> Result<()> {
        if !mv.is_legal_on(&self.board, self.settings.max_take) {
            return Err(NimError::IllegalMove {
                mv,
                board: self.board.to_string(),
            });
        }
        self.board.play_move(mv);
        Ok(())
    }

    /// Plays a full game from a full board, `players[0]` first.
    ///
    /// Returns the index of the winner: the player left facing the empty
    /// board, since taking the last stick loses.
    pub fn play(&mut self, players: &mut [&mut dyn Player; 2]) -> Result<usize> {
        self.board.reset();
        let mut current = 0;
        loop {
            if self.board.is_empty() {
                info!(winner = players[current].name(), "game over");
                return Ok(current);
            }
            let mv = players[current].ask_move(self)?;
            debug!(player = players[current].name(), %mv, board = %self.board, "move");
            self.play_move(mv)?;
            current = 1 - current;
        }
    }
}
