use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
use tracing::{debug, info};

use crate::{
    board::{Board, Move},
    config::Configuration,
    error::{NimError, Result},
    game::{Game, Player, Settings},
    moves::{describe_move_between, MoveDescriptor},
    Solver,
};

const YIELDING: &[&str] = &[
    "I yield!",
    "I admit defeat.",
    "Well played.",
    "Bravo!",
    "A worthy opponent indeed.",
];

const IN_TROUBLE: &[&str] = &[
    "Oh no...",
    "I'm in trouble...",
    "The end is near...",
    "Ouch.",
    "I know where this is going. I don't like it.",
];

const HESITANT: &[&str] = &[
    "Hmm...",
    "Can't decide...",
    "Making my mind up...",
    "Just a second...",
    "It's not that easy...",
    "Not bad.",
];

const EXASPERATED: &[&str] = &[
    "Looks like you're quite strong.",
    "Oh man!",
    "Really?",
    "Unbelievable.",
    "You had me from the beginning, didn't you?",
];

const FINAL_BLOW: &[&str] = &["Well played.", "You fought well.", "The final blow.", "This is it."];

const CONFIDENT: &[&str] = &[
    "I'm feeling good.",
    "Seems easy enough.",
    "Very good.",
    "Only one way now, right?",
];

const NEUTRAL: &[&str] = &[
    "All right,",
    "I'm playing",
    "Let's try",
    "Say,",
    "Okay,",
    "Why not",
    "Tell me what you think of",
];

/// A computer player: plays a winning move whenever one exists, and a random
/// move otherwise.
///
/// All randomness (which winning move, which edge, which comment) comes from
/// `rng`, so a seeded AI always plays the same game.
#[derive(Debug)]
pub struct Ai<R = StdRng> {
    solver: Solver,
    rng: R,
}

impl Ai<StdRng> {
    pub fn with_seed(seed: u64) -> Ai<StdRng> {
        Ai::new(Solver::new(), StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Ai<StdRng> {
        Ai::new(Solver::new(), StdRng::from_os_rng())
    }
}

impl<R: Rng> Ai<R> {
    pub fn new(solver: Solver, rng: R) -> Ai<R> {
        Ai { solver, rng }
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// See [`Solver::set_rules`].
    pub fn set_rules(&mut self, settings: Settings) {
        self.solver.set_rules(settings);
    }

    /// See [`Solver::loading_needed`].
    pub fn loading_needed(&self, settings: &Settings) -> bool {
        self.solver.loading_needed(settings)
    }

    fn check_settings(&self, game: &Game) -> Result<Settings> {
        let settings = self.solver.settings().ok_or(NimError::NotInitialized)?;
        if settings != game.settings() {
            return Err(NimError::InconsistentSettings {
                ai: settings,
                game: game.settings(),
            });
        }
        Ok(settings)
    }

    /// Chooses a move for the player to play on `game`, along with a comment
    /// on the situation. The game itself is left untouched.
    ///
    /// The rules of the game must be the ones last given to
    /// [`Ai::set_rules`].
    pub fn generate_move(&mut self, game: &Game) -> Result<(Move, String)> {
        let settings = self.check_settings(game)?;
        let board = game.board();
        let config = board.to_config();
        if config.is_empty() {
            return Err(NimError::EmptyBoard);
        }

        let targets = self.solver.reachable_losing_configs(&config)?;
        let (descriptor, comment) = match targets.choose(&mut self.rng) {
            Some(target) => {
                let descriptor =
                    describe_move_between(&config, target, &mut self.rng).ok_or_else(|| NimError::NotOneMoveApart {
                        from: config.clone(),
                        to: target.clone(),
                    })?;
                debug!(%config, %target, %descriptor, "winning move");
                (descriptor, self.winning_comment(&config))
            }
            None => {
                // The board is not empty, so this only fails without a legal take.
                let descriptor = MoveDescriptor::random(&config, settings.max_take(), &mut self.rng).ok_or(
                    NimError::InvalidSettings {
                        board_size: settings.board_size(),
                        max_take: settings.max_take(),
                    },
                )?;
                debug!(%config, %descriptor, "no winning move, playing at random");
                (descriptor, self.losing_comment(&config, settings.board_size()))
            }
        };
        let mv = board.realize(&descriptor)?;
        Ok((mv, comment))
    }

    /// Every move on `board` that leaves the opponent in a losing
    /// configuration, sorted. Empty if the position is lost.
    pub fn winning_moves(&self, board: &Board) -> Result<Vec<Move>> {
        let config = board.to_config();
        let mut moves = vec![];
        for target in self.solver.reachable_losing_configs(&config)? {
            let descriptor = MoveDescriptor::between(&config, &target).ok_or_else(|| NimError::NotOneMoveApart {
                from: config.clone(),
                to: target.clone(),
            })?;
            moves.extend(board.list_moves(descriptor.take, descriptor.group_size, descriptor.offset));
        }
        moves.sort_unstable();
        moves.dedup();
        Ok(moves)
    }

    /// Comment for a winning move played from `config`.
    fn winning_comment(&mut self, config: &Configuration) -> String {
        let lines = if config.groups() == [1, 1] {
            FINAL_BLOW
        } else if config.is_all_ones() {
            CONFIDENT
        } else {
            NEUTRAL
        };
        pick(lines, &mut self.rng)
    }

    /// Comment for a random move played from the lost position `config`.
    fn losing_comment(&mut self, config: &Configuration, board_size: usize) -> String {
        if config.groups() == [1] {
            return pick(YIELDING, &mut self.rng);
        }
        if config.is_all_ones() && config.sticks() % 2 == 1 {
            return pick(IN_TROUBLE, &mut self.rng);
        }
        if config.sticks() * 3 <= board_size {
            let lines: Vec<&str> = HESITANT.iter().chain(EXASPERATED).copied().collect();
            return pick(&lines, &mut self.rng);
        }
        pick(HESITANT, &mut self.rng)
    }
}

fn pick<R: Rng + ?Sized>(lines: &[&str], rng: &mut R) -> String {
    lines.choose(rng).map_or_else(String::new, |line| line.to_string())
}

/// A [`Player`] backed by an [`Ai`]. The rules must be set on the AI before
/// the game starts.
#[derive(Debug)]
pub struct AiPlayer<R = StdRng> {
    name: String,
    ai: Ai<R>,
    last_comment: Option<String>,
}

impl<R: Rng> AiPlayer<R> {
    pub fn new(name: impl Into<String>, ai: Ai<R>) -> AiPlayer<R> {
        AiPlayer {
            name: name.into(),
            ai,
            last_comment: None,
        }
    }

    pub fn ai(&self) -> &Ai<R> {
        &self.ai
    }

    /// What the AI said about its last move.
    pub fn last_comment(&self) -> Option<&str> {
        self.last_comment.as_deref()
    }
}

impl<R: Rng> Player for AiPlayer<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn ask_move(&mut self, game: &Game) -> Result<Move> {
        let (mv, comment) = self.ai.generate_move(game)?;
        info!(player = %self.name, %mv, %comment, "ai move");
        self.last_comment = Some(comment);
        Ok(mv)
    }
}
