pub mod log;
pub mod movement;
pub mod notation;
pub mod status;
pub mod threat;

pub use log::{FollowUpEntry, Log, LogEntry, Ply};
pub use notation::{MoveNotation, NotationError};
pub use threat::{MoveMap, ThreatMap};

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, LayoutError, STANDARD_LAYOUT};
use crate::core::*;
use crate::rules::{MoveContext, PieceFactory};

/******************************************\
|==========================================|
|               Game Status                |
|==========================================|
\******************************************/

/// # Game Status
///
/// `Pending` until the first ply, then `Ongoing` or a check state, until one
/// of the terminal states. `NoChange` is only ever returned, never stored: it
/// reports a rejected or empty operation.

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Pending, Ongoing, WhiteInCheck, BlackInCheck, WhiteWin, BlackWin, Stalemate, NoChange,
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::WhiteWin | GameStatus::BlackWin | GameStatus::Stalemate)
    }

    pub const fn in_check(colour: Colour) -> Self {
        match colour {
            Colour::White => GameStatus::WhiteInCheck,
            Colour::Black => GameStatus::BlackInCheck,
        }
    }

    pub const fn win(colour: Colour) -> Self {
        match colour {
            Colour::White => GameStatus::WhiteWin,
            Colour::Black => GameStatus::BlackWin,
        }
    }

    /// The winner of a won game
    pub const fn winner(&self) -> Option<Colour> {
        match self {
            GameStatus::WhiteWin => Some(Colour::White),
            GameStatus::BlackWin => Some(Colour::Black),
            _ => None,
        }
    }
}

/******************************************\
|==========================================|
|                  Action                  |
|==========================================|
\******************************************/

/// An attempted ply, not yet validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub colour: Colour,
    pub start: Point,
    pub end: Point,
}

impl Action {
    pub const fn new(colour: Colour, start: Point, end: Point) -> Self {
        Self { colour, start, end }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}-{}", self.colour, self.start, self.end)
    }
}

/******************************************\
|==========================================|
|               Game Config                |
|==========================================|
\******************************************/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Extent of the plane
    pub bounds: Bounds,
    /// Whether a board holding only the two kings is a stalemate
    pub bare_kings_stalemate: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            bare_kings_stalemate: true,
        }
    }
}

impl GameConfig {
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_bare_kings_stalemate(mut self, enabled: bool) -> Self {
        self.bare_kings_stalemate = enabled;
        self
    }
}

/******************************************\
|==========================================|
|                   Game                   |
|==========================================|
\******************************************/

/// # Game
///
/// The single mutable aggregate: board, history, both threat maps, turn and
/// status. Every mutation goes through [`Game::update_game`],
/// [`Game::undo_update`] or [`Game::redo_update`], and each of them leaves the
/// threat maps consistent with the board.
///
/// Not safe to search and play on the same instance at once; clone the game
/// for independent work.

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,

    factory: Arc<PieceFactory>,

    log: Log,

    threats: [ThreatMap; Colour::NUM],

    kings: [Option<PieceId>; Colour::NUM],

    turn: Colour,

    status: GameStatus,

    /// Status before the first logged ply
    initial_status: GameStatus,

    config: GameConfig,
}

impl Game {
    /// A game from the standard initial position
    pub fn new(factory: Arc<PieceFactory>, config: GameConfig) -> Result<Self, LayoutError> {
        Self::from_layout(factory, STANDARD_LAYOUT, config)
    }

    /// A game from a layout string, see [`Board::from_layout`]
    pub fn from_layout(factory: Arc<PieceFactory>, layout: &str, config: GameConfig) -> Result<Self, LayoutError> {
        let (board, turn) = Board::from_layout(layout, &factory, config.bounds)?;

        let mut kings = [None; Colour::NUM];
        for id in board.ids() {
            let piece = board.piece(id);
            if piece.is_king() {
                kings[piece.colour.index()] = Some(id);
            }
        }

        let mut game = Self {
            board,
            factory,
            log: Log::new(),
            threats: [ThreatMap::new(), ThreatMap::new()],
            kings,
            turn,
            status: GameStatus::Pending,
            initial_status: GameStatus::Pending,
            config,
        };

        game.rebuild_threats();

        let status = match game.derive_status(!turn) {
            GameStatus::Ongoing => GameStatus::Pending,
            status => status,
        };
        game.status = status;
        game.initial_status = status;

        Ok(game)
    }

    /******************************************\
    |==========================================|
    |                  Views                   |
    |==========================================|
    \******************************************/

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The pieces on the board, in point order
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.board.pieces()
    }

    #[inline]
    pub fn log(&self) -> &Log {
        &self.log
    }

    #[inline]
    pub fn threats(&self, colour: Colour) -> &ThreatMap {
        &self.threats[colour.index()]
    }

    #[inline]
    pub fn factory(&self) -> &PieceFactory {
        &self.factory
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn turn(&self) -> Colour {
        self.turn
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Where the king of `colour` stands
    pub fn king(&self, colour: Colour) -> Option<Point> {
        self.kings[colour.index()].map(|id| self.board.piece(id).point)
    }

    /// Whether the king of `colour` is threatened by the other side
    pub fn in_check(&self, colour: Colour) -> bool {
        self.king(colour)
            .is_some_and(|point| self.threats(!colour).has_threats(point))
    }

    /// Side to move followed by every piece encoding
    pub fn layout(&self) -> String {
        format!("{} {}", self.turn.code(), self.board.layout())
    }

    /// Rule evaluation context for a piece against the live position
    pub(crate) fn context(&self, piece: PieceId, destination: Option<Point>) -> MoveContext<'_> {
        let colour = self.board.piece(piece).colour;
        let ctx = MoveContext::new(&self.board, &self.log, Some(self.threats(!colour)), piece);
        match destination {
            Some(point) => ctx.at(point),
            None => ctx,
        }
    }

    /******************************************\
    |==========================================|
    |               Update Game                |
    |==========================================|
    \******************************************/

    /// Validates and commits an action, returning the new status.
    ///
    /// A rejected action leaves every part of the game untouched.
    pub fn update_game(&mut self, action: Action) -> Result<GameStatus, ActionError> {
        let result = self.try_update(action);
        if let Err(error) = &result {
            debug!(%action, %error, "action rejected");
        }
        result
    }

    /// Boundary form of [`Game::update_game`]: rejections become `NoChange`
    pub fn submit(&mut self, action: Action) -> GameStatus {
        self.update_game(action).unwrap_or(GameStatus::NoChange)
    }

    fn try_update(&mut self, action: Action) -> Result<GameStatus, ActionError> {
        if self.status.is_terminal() {
            return Err(ActionError::GameOver(self.status));
        }
        if action.colour != self.turn {
            return Err(ActionError::WrongTurn(action.colour));
        }
        for point in [action.start, action.end] {
            if !self.board.bounds().contains(point) {
                return Err(ActionError::OutOfBounds(point));
            }
        }

        let id = self.board.on(action.start).ok_or(ActionError::NoPiece(action.start))?;
        if self.board.piece(id).colour != self.turn {
            return Err(ActionError::NotOwnPiece(action.start));
        }

        let ply = self
            .plan(id, action.end)
            .ok_or(ActionError::NoMatchingMovement(action.start, action.end))?;

        self.apply_ply(&ply);
        if self.in_check(self.turn) {
            self.revert_ply(&ply);
            return Err(ActionError::LeavesKingInCheck);
        }

        let mover = self.turn;
        self.log.push(LogEntry {
            ply,
            status: GameStatus::Ongoing,
        });
        self.refresh_volatile();
        self.turn = !mover;

        let status = self.derive_status(mover);
        if let Some(entry) = self.log.last_mut() {
            entry.status = status;
        }
        self.status = status;

        debug!(%action, ?status, plies = self.log.len(), "ply committed");
        if status.is_terminal() {
            info!(?status, plies = self.log.len(), "game over");
        }

        Ok(status)
    }

    /******************************************\
    |==========================================|
    |                Undo / Redo               |
    |==========================================|
    \******************************************/

    /// Takes back up to `n` plies. With `save_for_redo` they can be replayed
    /// by [`Game::redo_update`]. Returns `NoChange` when nothing was undone.
    pub fn undo_update(&mut self, n: usize, save_for_redo: bool) -> GameStatus {
        let mut undone = 0;
        for _ in 0..n {
            let entry = if save_for_redo { self.log.undo() } else { self.log.pop() };
            let Some(entry) = entry else {
                break;
            };
            self.revert_ply(&entry.ply);
            self.turn = !self.turn;
            undone += 1;
        }

        if undone == 0 {
            return GameStatus::NoChange;
        }

        self.refresh_volatile();
        self.status = self.log.last().map_or(self.initial_status, |entry| entry.status);
        debug!(undone, status = ?self.status, "plies undone");
        self.status
    }

    /// Replays up to `n` undone plies. Returns `NoChange` when nothing was redone.
    pub fn redo_update(&mut self, n: usize) -> GameStatus {
        let mut redone = 0;
        for _ in 0..n {
            let Some(entry) = self.log.redo() else {
                break;
            };
            self.apply_ply(&entry.ply);
            self.turn = !self.turn;
            self.status = entry.status;
            redone += 1;
        }

        if redone == 0 {
            return GameStatus::NoChange;
        }

        self.refresh_volatile();
        debug!(redone, status = ?self.status, "plies redone");
        self.status
    }
}

/******************************************\
|==========================================|
|              Action Errors               |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("The game is already over: {0:?}")]
    GameOver(GameStatus),
    #[error("It is not {0}'s turn")]
    WrongTurn(Colour),
    #[error("{0} is outside the board")]
    OutOfBounds(Point),
    #[error("There is no piece on {0}")]
    NoPiece(Point),
    #[error("The piece on {0} belongs to the other side")]
    NotOwnPiece(Point),
    #[error("No movement takes the piece on {0} to {1}")]
    NoMatchingMovement(Point, Point),
    #[error("The move would leave the king in check")]
    LeavesKingInCheck,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    fn standard() -> Game {
        Game::new(Arc::new(PieceFactory::standard()), GameConfig::default()).unwrap()
    }

    fn game(layout: &str) -> Game {
        Game::from_layout(Arc::new(PieceFactory::standard()), layout, GameConfig::default()).unwrap()
    }

    fn act(game: &mut Game, start: &str, end: &str) -> Result<GameStatus, ActionError> {
        let turn = game.turn();
        game.update_game(Action::new(turn, pt(start), pt(end)))
    }

    #[test]
    fn test_new_game_is_pending() {
        let game = standard();
        assert_eq!(game.status(), GameStatus::Pending);
        assert_eq!(game.turn(), Colour::White);
        assert_eq!(game.king(Colour::Black), Some(pt("e8")));
        assert!(game.log().is_empty());
        assert_eq!(game.layout().split_whitespace().count(), 33);
    }

    #[test]
    fn test_rejections_leave_game_untouched() {
        let mut game = standard();
        let before = game.clone();

        let wrong_turn = Action::new(Colour::Black, pt("e7"), pt("e5"));
        assert_eq!(game.update_game(wrong_turn), Err(ActionError::WrongTurn(Colour::Black)));
        assert_eq!(act(&mut game, "e4", "e5"), Err(ActionError::NoPiece(pt("e4"))));
        assert_eq!(act(&mut game, "e7", "e5"), Err(ActionError::NotOwnPiece(pt("e7"))));
        assert_eq!(
            act(&mut game, "e2", "e5"),
            Err(ActionError::NoMatchingMovement(pt("e2"), pt("e5")))
        );
        assert_eq!(
            game.update_game(Action::new(Colour::White, pt("e2"), Point::new(8, 3).unwrap())),
            Err(ActionError::OutOfBounds(Point::new(8, 3).unwrap()))
        );
        assert_eq!(game.submit(wrong_turn), GameStatus::NoChange);

        assert_eq!(game.board(), before.board());
        assert_eq!(game.log(), before.log());
        assert_eq!(game.status(), before.status());
        assert_eq!(game.turn(), before.turn());
    }

    #[test]
    fn test_pinned_piece_cannot_expose_king() {
        let mut game = game("wKe1 wBe2 bKh8 bRe8");
        assert_eq!(act(&mut game, "e2", "d3"), Err(ActionError::LeavesKingInCheck));
        assert!(game.threats(Colour::Black).has_no_threats(pt("e1")));
        assert_eq!(act(&mut game, "e1", "d1"), Ok(GameStatus::Ongoing));
    }

    #[test]
    fn test_commit_flips_turn_and_logs() {
        let mut game = standard();
        assert_eq!(act(&mut game, "e2", "e4"), Ok(GameStatus::Ongoing));
        assert_eq!(game.turn(), Colour::Black);
        assert_eq!(game.log().len(), 1);

        let entry = game.log().last().unwrap();
        assert_eq!(entry.ply.start, pt("e2"));
        assert_eq!(entry.ply.end, pt("e4"));
        assert!(entry.ply.first_occurrence);
        assert_eq!(entry.ply.captured, None);
        assert!(game.board().piece(entry.ply.piece).moved);
    }

    #[test]
    fn test_undo_restores_exact_state() {
        let mut game = standard();
        let start = game.clone();

        for (from, to) in [("e2", "e4"), ("d7", "d5"), ("e4", "d5")] {
            act(&mut game, from, to).unwrap();
        }
        let played = game.clone();

        assert_eq!(game.undo_update(1, false), GameStatus::Ongoing);
        assert_eq!(game.turn(), Colour::White);
        assert!(game.board().piece_at(pt("d5")).is_some_and(|p| p.colour == Colour::Black));

        assert_eq!(game.undo_update(5, true), GameStatus::Pending);
        assert_eq!(game.board(), start.board());
        assert_eq!(game.threats(Colour::White), start.threats(Colour::White));
        assert_eq!(game.threats(Colour::Black), start.threats(Colour::Black));
        assert_eq!(game.undo_update(1, true), GameStatus::NoChange);

        assert_eq!(game.redo_update(2), GameStatus::Ongoing);
        assert_eq!(game.log().len(), 2);
        assert_eq!(game.redo_update(1), GameStatus::NoChange);

        game.undo_update(2, false);
        for (from, to) in [("e2", "e4"), ("d7", "d5"), ("e4", "d5")] {
            act(&mut game, from, to).unwrap();
        }
        assert_eq!(game.board(), played.board());
        assert_eq!(game.log().entries(), played.log().entries());
    }

    #[test]
    fn test_terminal_game_rejects_actions() {
        let mut game = game("b wKh1 bKa8 bQb2 bRa2");
        assert_eq!(act(&mut game, "a2", "a1"), Ok(GameStatus::BlackWin));
        assert_eq!(
            game.update_game(Action::new(Colour::White, pt("h1"), pt("g1"))),
            Err(ActionError::GameOver(GameStatus::BlackWin))
        );
        assert_eq!(game.undo_update(1, false), GameStatus::Pending);
    }
}
