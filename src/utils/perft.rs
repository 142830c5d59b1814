use std::time::Instant;

use tracing::info;

use crate::game::Game;

/// Number of leaf actions `depth` plies below the current position.
///
/// Every action is committed with [`Game::update_game`] and taken back with
/// [`Game::undo_update`], so a correct count also proves the undo path.
pub fn perft(game: &mut Game, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    let actions = game.potential_updates();

    if depth == 1 {
        return actions.len();
    }

    let mut nodes = 0;

    for action in actions {
        if game.update_game(action).is_err() {
            continue;
        }
        nodes += perft(game, depth - 1);
        game.undo_update(1, false);
    }

    nodes
}

/// [`perft`] with the count of every root action logged, returns the total
pub fn perft_test(game: &mut Game, depth: usize) -> usize {
    let actions = game.potential_updates();

    if depth <= 1 {
        info!(nodes = actions.len(), "perft");
        return actions.len();
    }

    let start = Instant::now();
    let mut total_nodes = 0;

    for action in actions {
        if game.update_game(action).is_err() {
            continue;
        }
        let nodes = perft(game, depth - 1);
        total_nodes += nodes;
        game.undo_update(1, false);

        info!(%action, nodes, "perft root");
    }

    let time = start.elapsed().as_millis();
    info!(
        depth,
        nodes = total_nodes,
        time_ms = time as u64,
        "perft complete"
    );

    total_nodes
}
