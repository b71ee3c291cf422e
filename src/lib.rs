//! twenty48: the 2048 sliding-tile game
//!
//! This crate provides:
//! - A 4x4 `Board` engine (`engine` module): compress/merge moves in four
//!   directions, uniform random tile spawning, win/loss detection
//! - A mode controller (`game` module): Normal, Easy (8-tiles), and
//!   Competition (move-counting) variants over the same board
//! - A per-user best-score store (`score` module) over a flat CSV file
//!
//! The binary in `src/main.rs` ties these together into an interactive
//! terminal game.
//!
//! Quick start:
//! ```
//! use twenty48::engine::{GameState, Move};
//! use twenty48::game::{GameMode, GameSession};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic session with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut session = GameSession::new(GameMode::Normal, &mut rng);
//!
//! // One move: slide left, spawn a tile if anything changed
//! let state = session.apply_move(Move::Left, &mut rng);
//! assert!(state == GameState::NotOver);
//! assert!(session.best_score() <= 4);
//! ```
pub mod engine;
pub mod game;
pub mod score;
