pub mod eval;

pub use eval::Eval;

use tracing::{debug, trace};

use crate::core::*;
use crate::game::{Action, Game};

/******************************************\
|==========================================|
|              Search Config               |
|==========================================|
\******************************************/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Depth used by [`GameTree::best_action`]
    pub depth: usize,
    /// Deepest iteration [`GameTree::minimax`] will probe
    pub max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 3, max_depth: 8 }
    }
}

/******************************************\
|==========================================|
|                Game Tree                 |
|==========================================|
\******************************************/

/// # Game Tree
///
/// Minimax with alpha-beta pruning over the legal actions of a borrowed game.
///
/// Every node commits an action through [`Game::update_game`], searches the
/// child and takes the action back with [`Game::undo_update`] before the next
/// sibling, so the game is left exactly as it was found. Holding the game by
/// `&mut` keeps anything else from playing on it mid-search.
///
/// Scores are always from white's point of view: white maximises, black
/// minimises.

#[derive(Debug)]
pub struct GameTree<'a> {
    game: &'a mut Game,
    config: SearchConfig,
    nodes: u64,
}

impl<'a> GameTree<'a> {
    pub fn new(game: &'a mut Game, config: SearchConfig) -> Self {
        Self { game, config, nodes: 0 }
    }

    #[inline]
    pub fn game(&self) -> &Game {
        &*self.game
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes visited since the tree was built
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Best action for the side to move at the configured depth
    pub fn best_action(&mut self) -> Option<(Action, Eval)> {
        let greater_is_best = self.game.turn() == Colour::White;
        self.next_best(self.config.depth, greater_is_best)
    }

    /// Searches every legal action `depth` plies deep and returns the best
    /// one with its score. With `greater_is_best` the highest score wins,
    /// otherwise the lowest. Among equal scores the first action in
    /// [`Game::potential_updates`] order is kept.
    ///
    /// Returns `None` when the side to move has no legal action.
    pub fn next_best(&mut self, depth: usize, greater_is_best: bool) -> Option<(Action, Eval)> {
        let depth = depth.max(1);
        let mut alpha = -Eval::INFINITY;
        let mut beta = Eval::INFINITY;
        let mut best: Option<(Action, Eval)> = None;

        for action in self.game.potential_updates() {
            if self.game.update_game(action).is_err() {
                continue;
            }
            let value = self.alpha_beta(depth - 1, alpha, beta, !greater_is_best);
            self.game.undo_update(1, false);

            let improves = match best {
                None => true,
                Some((_, best_value)) if greater_is_best => value > best_value,
                Some((_, best_value)) => value < best_value,
            };
            if improves {
                best = Some((action, value));
                if greater_is_best {
                    alpha = alpha.max(value);
                } else {
                    beta = beta.min(value);
                }
            }
        }

        if let Some((action, value)) = best {
            debug!(%action, %value, depth, nodes = self.nodes, "best action");
        }
        best
    }

    /// Value of the position for the side to move, probing depths one by one
    /// up to `depth` (capped by the configured `max_depth`). Stops early once
    /// an iteration proves the game decided.
    pub fn minimax(&mut self, depth: usize) -> Eval {
        let maximising = self.game.turn() == Colour::White;
        let depth = depth.min(self.config.max_depth).max(1);

        let mut value = self.game.evaluate_state();
        for current in 1..=depth {
            value = self.alpha_beta(current, -Eval::INFINITY, Eval::INFINITY, maximising);
            debug!(depth = current, %value, nodes = self.nodes, "iteration complete");

            if value.is_win() {
                break;
            }
        }

        value
    }

    fn alpha_beta(&mut self, depth: usize, mut alpha: Eval, mut beta: Eval, maximising: bool) -> Eval {
        self.nodes += 1;

        if depth == 0 || self.game.status().is_terminal() {
            return self.game.evaluate_state();
        }

        let actions = self.game.potential_updates();
        if actions.is_empty() {
            return self.game.evaluate_state();
        }

        let mut best = if maximising { -Eval::INFINITY } else { Eval::INFINITY };

        for action in actions {
            if self.game.update_game(action).is_err() {
                continue;
            }
            let value = self.alpha_beta(depth - 1, alpha, beta, !maximising);
            self.game.undo_update(1, false);

            if maximising {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if alpha >= beta {
                trace!(%action, depth, "cut-off");
                break;
            }
        }

        best
    }
}
