use std::collections::BTreeSet;

use tracing::trace;

use super::{FollowUpEntry, Game, Ply};
use crate::core::*;
use crate::rules::{FollowUp, Mode, MoveContext};

impl Game {
    /******************************************\
    |==========================================|
    |                 Planning                 |
    |==========================================|
    \******************************************/

    /// Candidate destinations of a piece over all its movements, in
    /// movement order
    pub(crate) fn destinations(&self, id: PieceId) -> Vec<Point> {
        let ctx = self.context(id, None);
        let mut ends = Vec::new();
        for movement in self.factory.movements(&self.board.piece(id).kind) {
            for end in movement.candidates(&ctx, Mode::Moves) {
                if !ends.contains(&end) {
                    ends.push(end);
                }
            }
        }
        ends
    }

    /// Resolves the first movement of the piece that reaches `end` and whose
    /// follow-up can be carried out. King safety is not checked here.
    pub(crate) fn plan(&self, id: PieceId, end: Point) -> Option<Ply> {
        let piece = self.board.piece(id);
        let ctx = self.context(id, None);

        for movement in self.factory.movements(&piece.kind) {
            if !movement.candidates(&ctx, Mode::Moves).contains(&end) {
                continue;
            }

            let follow_up = match movement.follow_up() {
                Some(follow_up) => match self.resolve_follow_up(follow_up, &ctx.at(end)) {
                    Some(entry) => Some(entry),
                    None => continue,
                },
                None => None,
            };

            return Some(Ply {
                piece: id,
                start: piece.point,
                end,
                captured: self.board.on(end),
                first_occurrence: !piece.moved,
                follow_up,
            });
        }

        None
    }

    fn resolve_follow_up(&self, follow_up: &FollowUp, ctx: &MoveContext) -> Option<FollowUpEntry> {
        let end = ctx.destination?;

        match follow_up {
            FollowUp::Relocate { from, to } => {
                let (from, to) = (from.resolve(ctx)?, to.resolve(ctx)?);
                let piece = self.board.on(from).filter(|id| *id != ctx.piece)?;

                // the mover vacates its origin before the relocation lands
                let target_free = self.board.on(to).is_none_or(|id| id == ctx.piece || id == piece);
                if !self.board.bounds().contains(to) || to == end || !target_free {
                    return None;
                }

                Some(FollowUpEntry::Relocate {
                    piece,
                    from,
                    to,
                    first_occurrence: !self.board.piece(piece).moved,
                })
            }

            FollowUp::Remove { at } => {
                let at = at.resolve(ctx).filter(|point| *point != end)?;
                let piece = self.board.on(at).filter(|id| *id != ctx.piece)?;
                Some(FollowUpEntry::Remove { piece, at })
            }

            FollowUp::Promote(pt) => Some(FollowUpEntry::Promote {
                from: self.board.piece(ctx.piece).kind.clone(),
                to: PieceKind::Standard(*pt),
            }),
        }
    }

    /******************************************\
    |==========================================|
    |              Apply / Revert              |
    |==========================================|
    \******************************************/

    /// Plays a ply on the board and brings both threat maps up to date
    pub(crate) fn apply_ply(&mut self, ply: &Ply) {
        let affected = self.affected(ply);

        if let Some(captured) = ply.captured {
            self.board.remove_piece(captured);
        }
        self.board.move_piece(ply.piece, ply.end);
        self.board.piece_mut(ply.piece).moved = true;

        match &ply.follow_up {
            Some(FollowUpEntry::Relocate { piece, to, .. }) => {
                self.board.move_piece(*piece, *to);
                self.board.piece_mut(*piece).moved = true;
            }
            Some(FollowUpEntry::Remove { piece, .. }) => self.board.remove_piece(*piece),
            Some(FollowUpEntry::Promote { to, .. }) => self.board.piece_mut(ply.piece).kind = to.clone(),
            None => {}
        }

        self.refresh(affected);
    }

    /// Exact inverse of [`Game::apply_ply`]
    pub(crate) fn revert_ply(&mut self, ply: &Ply) {
        let affected = self.affected(ply);

        match &ply.follow_up {
            Some(FollowUpEntry::Relocate {
                piece,
                from,
                first_occurrence,
                ..
            }) => {
                self.board.move_piece(*piece, *from);
                self.board.piece_mut(*piece).moved = !first_occurrence;
            }
            Some(FollowUpEntry::Remove { piece, at }) => self.board.place(*piece, *at),
            Some(FollowUpEntry::Promote { from, .. }) => self.board.piece_mut(ply.piece).kind = from.clone(),
            None => {}
        }

        self.board.move_piece(ply.piece, ply.start);
        self.board.piece_mut(ply.piece).moved = !ply.first_occurrence;

        if let Some(captured) = ply.captured {
            self.board.place(captured, ply.end);
        }

        self.refresh(affected);
    }

    /// Whether a planned ply keeps the mover's king out of check
    pub(crate) fn is_legal(&mut self, ply: &Ply) -> bool {
        let colour = self.board.piece(ply.piece).colour;
        self.apply_ply(ply);
        let legal = !self.in_check(colour);
        self.revert_ply(ply);
        legal
    }

    /******************************************\
    |==========================================|
    |              Threat Upkeep               |
    |==========================================|
    \******************************************/

    /// Pieces whose reach a ply can change: those indexed on a touched point
    /// before the change, the pieces the ply moves, and volatile pieces
    fn affected(&self, ply: &Ply) -> BTreeSet<PieceId> {
        let mut affected: BTreeSet<PieceId> = ply.pieces().into_iter().collect();

        for point in ply.touched() {
            for map in &self.threats {
                affected.extend(map.threats_at(point));
            }
        }

        affected.extend(self.volatile_pieces());
        affected
    }

    fn volatile_pieces(&self) -> Vec<PieceId> {
        self.board
            .ids()
            .filter(|id| {
                let kind = &self.board.piece(*id).kind;
                self.factory.movements(kind).iter().any(|m| m.is_volatile())
            })
            .collect()
    }

    /// Points a piece threatens from where it stands
    fn reach(&self, id: PieceId) -> Vec<Point> {
        let ctx = MoveContext::new(&self.board, &self.log, None, id);
        self.factory
            .movements(&self.board.piece(id).kind)
            .iter()
            .flat_map(|movement| movement.candidates(&ctx, Mode::Threats))
            .collect()
    }

    /// Recomputes the threats of the given pieces
    fn refresh(&mut self, pieces: impl IntoIterator<Item = PieceId>) {
        for id in pieces {
            let colour = self.board.piece(id).colour;
            if self.board.is_on_board(id) {
                let reach = self.reach(id);
                self.threats[colour.index()].set(id, reach);
            } else {
                self.threats[colour.index()].clear_piece(id);
            }
        }
    }

    /// Recomputes pieces whose threats may depend on the log
    pub(crate) fn refresh_volatile(&mut self) {
        let volatile = self.volatile_pieces();
        if !volatile.is_empty() {
            trace!(pieces = volatile.len(), "refreshing volatile threats");
            self.refresh(volatile);
        }
    }

    /// Rebuilds both threat maps from scratch
    pub(crate) fn rebuild_threats(&mut self) {
        for map in &mut self.threats {
            map.clear();
        }
        let ids: Vec<_> = self.board.ids().collect();
        self.refresh(ids);
        trace!(
            white = self.threats[Colour::White.index()].mobility(),
            black = self.threats[Colour::Black.index()].mobility(),
            "threat maps rebuilt"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::game::{Action, GameConfig, GameStatus};
    use crate::rules::{Conditional, Location, Movement, PieceFactory, Property, Reference};

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    fn game(layout: &str) -> Game {
        Game::from_layout(Arc::new(PieceFactory::standard()), layout, GameConfig::default()).unwrap()
    }

    fn act(game: &mut Game, start: &str, end: &str) -> Result<GameStatus, crate::game::ActionError> {
        let turn = game.turn();
        game.update_game(Action::new(turn, pt(start), pt(end)))
    }

    fn assert_threats_fresh(game: &Game) {
        let mut fresh = game.clone();
        fresh.rebuild_threats();
        for colour in Colour::iter() {
            assert_eq!(game.threats(colour), fresh.threats(colour), "{colour} threats drifted");
        }
    }

    #[test]
    fn test_plan_picks_first_matching_movement() {
        let game = game("wKe1 bKe8 wPa7 wPb2*");
        let promo = game.plan(game.board().on(pt("a7")).unwrap(), pt("a8")).unwrap();
        assert!(matches!(promo.follow_up, Some(FollowUpEntry::Promote { .. })));

        let double = game.plan(game.board().on(pt("b2")).unwrap(), pt("b4")).unwrap();
        assert_eq!(double.follow_up, None);
        assert!(double.first_occurrence);

        assert!(game.plan(game.board().on(pt("b2")).unwrap(), pt("c3")).is_none());
    }

    #[test]
    fn test_incremental_threats_match_rebuild() {
        let mut game = Game::new(Arc::new(PieceFactory::standard()), GameConfig::default()).unwrap();
        let line = [
            ("e2", "e4"), ("d7", "d5"), ("e4", "d5"), ("d8", "d5"),
            ("b1", "c3"), ("d5", "a5"), ("g1", "f3"), ("c8", "g4"),
            ("f1", "e2"), ("b8", "c6"), ("e1", "g1"), ("e8", "c8"),
        ];
        for (from, to) in line {
            act(&mut game, from, to).unwrap();
            assert_threats_fresh(&game);
        }

        assert_eq!(game.board().piece_at(pt("f1")).map(|p| p.to_string()), Some("wRf1".into()));
        assert_eq!(game.board().piece_at(pt("d8")).map(|p| p.to_string()), Some("bRd8".into()));

        while game.undo_update(1, false) != GameStatus::NoChange {
            assert_threats_fresh(&game);
        }
    }

    #[test]
    fn test_promotion_changes_kind_in_place() {
        let mut game = game("wKe1 bKh6 wPa7");
        let pawn = game.board().on(pt("a7")).unwrap();

        act(&mut game, "a7", "a8").unwrap();
        assert_eq!(game.board().on(pt("a8")), Some(pawn));
        assert!(game.board().piece(pawn).kind.is(PieceType::Queen));
        assert_threats_fresh(&game);

        game.undo_update(1, false);
        assert!(game.board().piece(pawn).kind.is(PieceType::Pawn));
        assert_eq!(game.board().on(pt("a7")), Some(pawn));
    }

    #[test]
    fn test_volatile_custom_piece_threats() {
        let mut factory = PieceFactory::standard();
        // threatens forward only while it has never moved
        let sentry = Movement::jump(Path::template(&[(0, 1)]).unwrap())
            .specific_quadrant()
            .attack_only()
            .when(Conditional::is(Reference::Mover, Property::Moved, false));
        let guard = Movement::jump(Path::template(&[(1, 0)]).unwrap())
            .mirrored(false, true)
            .move_only()
            .when(Conditional::in_bounds(Location::origin(), true));
        factory.register("sentry", 150, vec![sentry, guard]).unwrap();

        let mut game = Game::from_layout(Arc::new(factory), "wKa1 bKh8 w~sentry~d4*", GameConfig::default()).unwrap();
        assert!(game.threats(Colour::White).has_threats(pt("d5")));

        act(&mut game, "d4", "e4").unwrap();
        assert!(game.threats(Colour::White).has_no_threats(pt("e5")));
        assert_threats_fresh(&game);
    }
}
