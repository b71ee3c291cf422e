use clap::ValueEnum;
use rand::Rng;

use crate::engine::{Board, GameState, Move, DEFAULT_SPAWN};

/// The three game variants. Selected once at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameMode {
    /// Standard rules: every spawned tile is a 2.
    Normal,
    /// Every tile on the board is an 8, including the opening pair.
    Easy,
    /// Standard rules plus a per-session move counter.
    Competition,
}

impl GameMode {
    /// Value the board spawns for this mode.
    pub fn spawn_value(self) -> u32 {
        match self {
            GameMode::Normal | GameMode::Competition => DEFAULT_SPAWN,
            GameMode::Easy => 8,
        }
    }

    /// Display name, also the identity of the mode's score-file column.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Normal => "Normal Mode",
            GameMode::Easy => "Easy Mode",
            GameMode::Competition => "Competition Mode",
        }
    }

    /// Whether the front-end shows the move counter for this mode.
    pub fn counts_moves(self) -> bool {
        matches!(self, GameMode::Competition)
    }
}

/// One sitting of the game: a board configured for the chosen mode, plus the
/// move counter. Drives the move → spawn → terminal-check sequence the UI
/// loop relies on.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    mode: GameMode,
    moves: u32,
}

impl GameSession {
    pub fn new<R: Rng + ?Sized>(mode: GameMode, rng: &mut R) -> Self {
        GameSession {
            board: Board::with_spawn_value(mode.spawn_value(), rng),
            mode,
            moves: 0,
        }
    }

    /// Perform one directional move. If the grid changed, one new tile is
    /// spawned and the move counter advances; a move that changes nothing
    /// spawns nothing and does not count. Returns the state after the move.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Move, rng: &mut R) -> GameState {
        if self.board.apply(direction) {
            self.board.add_random_tile(rng);
            self.moves += 1;
        }
        self.board.state()
    }

    /// Start over: fresh grid, counter back to zero. The session best score
    /// carries across replays.
    pub fn replay<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board.reset(rng);
        self.moves = 0;
    }

    /// Mode-specific end-of-game text for a terminal state. `None` while the
    /// game is still running.
    pub fn outcome_message(&self, state: GameState) -> Option<String> {
        match (state, self.mode) {
            (GameState::Won, GameMode::Competition) => {
                Some(format!("Congratulations, you won in {} moves!", self.moves))
            }
            (GameState::Lost, GameMode::Competition) => {
                Some(format!("Game over, you lost after {} moves.", self.moves))
            }
            (GameState::Won, _) => Some("Congratulations, you won!".to_string()),
            (GameState::Lost, _) => Some("Game over, you lost.".to_string()),
            (GameState::NotOver, _) => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn best_score(&self) -> u32 {
        self.board.best_score()
    }
}
