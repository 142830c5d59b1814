//! # Chess Variant
//!
//! A rules engine for chess variants whose pieces are described by data, not
//! code: every piece kind is a list of movement specifications built from path
//! templates, quadrant mirroring, conditions and follow-up actions. On top of
//! that sit incrementally kept threat maps, a game state machine with an
//! undoable log, and a minimax search.

// Export core modules for variant primitives
pub mod board;
pub mod core;
pub mod game;
pub mod rules;
pub mod search;
pub mod utils;

pub use board::Board;
pub use core::*;
pub use game::{Action, ActionError, Game, GameConfig, GameStatus};
pub use rules::PieceFactory;
pub use search::{Eval, GameTree, SearchConfig};
