use tracing::trace;

use super::{Action, Game, GameStatus, MoveMap, Ply};
use crate::core::*;

impl Game {
    /******************************************\
    |==========================================|
    |              Legal Actions               |
    |==========================================|
    \******************************************/

    /// Legal plies of one piece, in movement order. With `first_only` the
    /// search stops at the first legal ply.
    fn legal_plies_of(&mut self, id: PieceId, first_only: bool) -> Vec<Ply> {
        let mut plies = Vec::new();
        for end in self.destinations(id) {
            let Some(ply) = self.plan(id, end) else {
                continue;
            };
            if self.is_legal(&ply) {
                plies.push(ply);
                if first_only {
                    break;
                }
            }
        }
        plies
    }

    /// Every legal ply of `colour`, pieces in point order
    pub(crate) fn legal_plies(&mut self, colour: Colour) -> Vec<Ply> {
        let ids: Vec<_> = self.board.ids_of(colour).collect();
        ids.into_iter()
            .flat_map(|id| self.legal_plies_of(id, false))
            .collect()
    }

    fn has_legal_move(&mut self, colour: Colour) -> bool {
        let ids: Vec<_> = self.board.ids_of(colour).collect();
        ids.into_iter().any(|id| !self.legal_plies_of(id, true).is_empty())
    }

    /// Every legal action of the side to move, in a fixed order: pieces by
    /// point, then movement order. Empty once the game is over.
    pub fn potential_updates(&mut self) -> Vec<Action> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        let turn = self.turn;
        self.legal_plies(turn)
            .into_iter()
            .map(|ply| Action::new(turn, ply.start, ply.end))
            .collect()
    }

    /// Legal destinations of `colour`, indexed by point. Built fresh from the
    /// live position on every call.
    pub fn move_map(&mut self, colour: Colour) -> MoveMap {
        let mut map = MoveMap::default();
        for ply in self.legal_plies(colour) {
            map.insert(ply.end, ply.piece);
        }
        map
    }

    /******************************************\
    |==========================================|
    |               Game Status                |
    |==========================================|
    \******************************************/

    /// Status of the game after `mover` has played, from the defender's side
    pub(crate) fn derive_status(&mut self, mover: Colour) -> GameStatus {
        let defender = !mover;

        let bare_kings = self.board.count() == 2 && self.board.pieces().all(Piece::is_king);
        if self.config.bare_kings_stalemate && bare_kings {
            return GameStatus::Stalemate;
        }

        if self.in_check(defender) {
            if self.is_checkmate(defender) {
                GameStatus::win(mover)
            } else {
                GameStatus::in_check(defender)
            }
        } else if self.has_legal_move(defender) {
            GameStatus::Ongoing
        } else {
            GameStatus::Stalemate
        }
    }

    /// A checked king is mated when it has no legal move of its own and the
    /// check is double, or no other piece can legally take the attacker or
    /// land between it and the king
    fn is_checkmate(&mut self, defender: Colour) -> bool {
        let Some(king) = self.kings[defender.index()] else {
            return false;
        };

        if !self.legal_plies_of(king, true).is_empty() {
            return false;
        }

        let king_point = self.board.piece(king).point;
        let attackers: Vec<_> = self.threats(!defender).threats_at(king_point).collect();
        let [attacker] = attackers[..] else {
            trace!(attackers = attackers.len(), "multiple checkers, king cannot escape");
            return true;
        };

        let attacker_point = self.board.piece(attacker).point;
        let mut targets = vec![attacker_point];
        targets.extend_from_slice(Path::between(attacker_point, king_point).interior());

        let defenders: Vec<_> = self.board.ids_of(defender).filter(|id| *id != king).collect();
        for id in defenders {
            let answers = self.legal_plies_of(id, false);
            if answers
                .iter()
                .any(|ply| targets.contains(&ply.end) || ply.taken() == Some(attacker))
            {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::game::GameConfig;
    use crate::rules::PieceFactory;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    fn game(layout: &str) -> Game {
        Game::from_layout(Arc::new(PieceFactory::standard()), layout, GameConfig::default()).unwrap()
    }

    fn act(game: &mut Game, start: &str, end: &str) -> GameStatus {
        let turn = game.turn();
        game.submit(Action::new(turn, pt(start), pt(end)))
    }

    #[test]
    fn test_initial_potential_updates() {
        let mut game = Game::new(Arc::new(PieceFactory::standard()), GameConfig::default()).unwrap();
        let actions = game.potential_updates();
        assert_eq!(actions.len(), 20);
        assert_eq!(actions[0], Action::new(Colour::White, pt("b1"), pt("c3")));
        assert!(actions.iter().all(|a| a.colour == Colour::White));
        assert_eq!(game.potential_updates(), actions);

        let map = game.move_map(Colour::Black);
        assert_eq!(map.len(), 20);
        assert!(map.can_reach(pt("f6")));
    }

    #[test]
    fn test_move_map_follows_the_position() {
        let mut game = game("wKe1 wRa1 bKe8 bRd8");
        let before = game.move_map(Colour::White);
        assert!(before.can_reach(pt("d1")));

        assert_eq!(act(&mut game, "a1", "a2"), GameStatus::Ongoing);
        let after = game.move_map(Colour::White);
        assert!(!after.can_reach(pt("d1")));
        assert!(after.can_reach(pt("a1")));

        game.undo_update(1, false);
        assert_eq!(game.move_map(Colour::White), before);
    }

    #[test]
    fn test_back_rank_mate() {
        let mut game = game("wKh3 wRa1 bKh8 bPg7 bPh7");
        assert_eq!(act(&mut game, "a1", "a8"), GameStatus::WhiteWin);
        assert!(game.potential_updates().is_empty());
    }

    #[test]
    fn test_blockable_check_is_not_mate() {
        let mut game = game("wKh3 wRa1 bKh8 bPg7 bPh7 bRc2");
        assert_eq!(act(&mut game, "a1", "a8"), GameStatus::BlackInCheck);
        assert_eq!(game.potential_updates(), vec![Action::new(Colour::Black, pt("c2"), pt("c8"))]);
        assert_eq!(act(&mut game, "c2", "c8"), GameStatus::Ongoing);
    }

    #[test]
    fn test_capturable_checker_is_not_mate() {
        let mut game = game("wKh3 wRa1 bKh8 bPg7 bPh7 bBf3");
        assert_eq!(act(&mut game, "a1", "a8"), GameStatus::BlackInCheck);
    }

    #[test]
    fn test_stalemate_without_legal_moves() {
        let mut game = game("wKb6 wQc1 bKa8");
        assert_eq!(act(&mut game, "c1", "c7"), GameStatus::Stalemate);
        assert!(game.potential_updates().is_empty());
    }

    #[test]
    fn test_bare_kings_stalemate() {
        let mut game = game("wKc3 bKh8 bQd4");
        assert_eq!(game.status(), GameStatus::WhiteInCheck);
        assert_eq!(act(&mut game, "c3", "d4"), GameStatus::Stalemate);

        let config = GameConfig::default().with_bare_kings_stalemate(false);
        let mut game = Game::from_layout(Arc::new(PieceFactory::standard()), "wKc3 bKh8 bQd4", config).unwrap();
        assert_eq!(act(&mut game, "c3", "d4"), GameStatus::Ongoing);
    }

    #[test]
    fn test_king_cannot_retreat_along_attack_line() {
        let mut game = game("wKa1 wRa5 bKd4 bPh7");
        assert_eq!(act(&mut game, "a1", "a2"), GameStatus::Ongoing);
        assert_eq!(act(&mut game, "h7", "h6"), GameStatus::Ongoing);
        assert_eq!(act(&mut game, "a5", "a4"), GameStatus::BlackInCheck);

        let escapes: Vec<_> = game.potential_updates().iter().map(|a| a.end.to_string()).collect();
        assert!(!escapes.contains(&"e4".to_string()));
        assert!(escapes.contains(&"d5".to_string()));
    }
}
