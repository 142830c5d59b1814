use std::collections::BTreeSet;
use std::sync::Arc;

use chess_variant::rules::Movement;
use chess_variant::{
    Action, ActionError, Bounds, Colour, Game, GameConfig, GameStatus, Path, PieceFactory, PieceType, Point,
};

fn pt(s: &str) -> Point {
    s.parse().unwrap()
}

fn standard() -> Game {
    Game::new(Arc::new(PieceFactory::standard()), GameConfig::default()).unwrap()
}

fn game(layout: &str) -> Game {
    Game::from_layout(Arc::new(PieceFactory::standard()), layout, GameConfig::default()).unwrap()
}

fn play(game: &mut Game, colour: Colour, start: &str, end: &str) -> GameStatus {
    game.submit(Action::new(colour, pt(start), pt(end)))
}

#[test]
fn scholars_mate_with_out_of_turn_attempt() {
    let mut game = standard();

    assert_eq!(play(&mut game, Colour::White, "e2", "e4"), GameStatus::Ongoing);
    assert_eq!(play(&mut game, Colour::Black, "f7", "f6"), GameStatus::Ongoing);

    // black tries to move twice in a row
    assert_eq!(play(&mut game, Colour::Black, "e7", "e6"), GameStatus::NoChange);
    assert_eq!(game.turn(), Colour::White);
    assert_eq!(game.log().len(), 2);

    assert_eq!(play(&mut game, Colour::White, "b1", "c3"), GameStatus::Ongoing);
    assert_eq!(play(&mut game, Colour::Black, "g7", "g5"), GameStatus::Ongoing);
    assert_eq!(play(&mut game, Colour::White, "d1", "h5"), GameStatus::WhiteWin);

    assert_eq!(game.status().winner(), Some(Colour::White));
    assert!(game.potential_updates().is_empty());
    assert_eq!(
        game.update_game(Action::new(Colour::Black, pt("e8"), pt("f7"))),
        Err(ActionError::GameOver(GameStatus::WhiteWin))
    );
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = standard();
    for (colour, start, end) in [
        (Colour::White, "e2", "e4"),
        (Colour::Black, "a7", "a6"),
        (Colour::White, "e4", "e5"),
        (Colour::Black, "d7", "d5"),
    ] {
        assert_eq!(play(&mut game, colour, start, end), GameStatus::Ongoing);
    }

    assert_eq!(play(&mut game, Colour::White, "e5", "d6"), GameStatus::Ongoing);
    assert!(game.board().on(pt("d5")).is_none());
    assert_eq!(game.board().count(), 31);

    let capture = game.log().last().unwrap();
    assert_eq!(capture.ply.captured, None);
    assert!(capture.ply.taken().is_some());

    game.undo_update(1, false);
    assert!(game.board().piece_at(pt("d5")).is_some_and(|p| p.colour == Colour::Black));
    assert_eq!(game.board().count(), 32);
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = standard();
    for (colour, start, end) in [
        (Colour::White, "e2", "e4"),
        (Colour::Black, "a7", "a6"),
        (Colour::White, "e4", "e5"),
        (Colour::Black, "d7", "d5"),
        (Colour::White, "h2", "h3"),
        (Colour::Black, "a6", "a5"),
    ] {
        play(&mut game, colour, start, end);
    }

    assert_eq!(
        game.update_game(Action::new(Colour::White, pt("e5"), pt("d6"))),
        Err(ActionError::NoMatchingMovement(pt("e5"), pt("d6")))
    );
}

#[test]
fn castling_moves_the_rook() {
    let mut game = game("wKe1* wRh1* wRa1* bKe8*");
    assert_eq!(play(&mut game, Colour::White, "e1", "g1"), GameStatus::Ongoing);
    assert!(game.board().piece_at(pt("f1")).is_some_and(|p| p.kind.is(PieceType::Rook)));
    assert!(game.board().on(pt("h1")).is_none());

    game.undo_update(1, false);
    assert_eq!(play(&mut game, Colour::White, "e1", "c1"), GameStatus::Ongoing);
    assert!(game.board().piece_at(pt("d1")).is_some_and(|p| p.kind.is(PieceType::Rook)));
    assert!(game.board().on(pt("a1")).is_none());
}

#[test]
fn castling_needs_unmoved_rook_and_safe_squares() {
    let mut moved_rook = game("wKe1* wRh1 bKe8*");
    assert_eq!(
        moved_rook.update_game(Action::new(Colour::White, pt("e1"), pt("g1"))),
        Err(ActionError::NoMatchingMovement(pt("e1"), pt("g1")))
    );

    let mut attacked = game("wKe1* wRh1* bKa8 bRf8");
    assert_eq!(
        attacked.update_game(Action::new(Colour::White, pt("e1"), pt("g1"))),
        Err(ActionError::NoMatchingMovement(pt("e1"), pt("g1")))
    );

    let mut blocked = game("wKe1* wRh1* wNg1 bKe8");
    assert_eq!(
        blocked.update_game(Action::new(Colour::White, pt("e1"), pt("g1"))),
        Err(ActionError::NoMatchingMovement(pt("e1"), pt("g1")))
    );
}

#[test]
fn promotion_reaches_the_last_rank_as_a_queen() {
    let mut game = game("wKe1 bKh6 wPb7 bRa8");
    assert_eq!(play(&mut game, Colour::White, "b7", "a8"), GameStatus::Ongoing);
    let queen = game.board().piece_at(pt("a8")).unwrap();
    assert!(queen.kind.is(PieceType::Queen));
    assert_eq!(queen.colour, Colour::White);
}

#[test]
fn interposition_keeps_the_game_alive() {
    let mut mate = game("wKh3 wRa1 bKh8 bPg7 bPh7");
    assert_eq!(play(&mut mate, Colour::White, "a1", "a8"), GameStatus::WhiteWin);

    let mut blocked = game("wKh3 wRa1 bKh8 bPg7 bPh7 bNe6");
    assert_eq!(play(&mut blocked, Colour::White, "a1", "a8"), GameStatus::BlackInCheck);

    let answers: BTreeSet<_> = blocked.potential_updates().iter().map(|a| a.to_string()).collect();
    let expected: BTreeSet<_> = ["black e6-d8", "black e6-f8"].map(String::from).into_iter().collect();
    assert_eq!(answers, expected);
}

#[test]
fn stalemate_by_no_moves_and_by_bare_kings() {
    let mut cornered = game("wKb6 wQc1 bKa8");
    assert_eq!(play(&mut cornered, Colour::White, "c1", "c7"), GameStatus::Stalemate);

    let mut bare = game("wKc3 bKh8 bQd4");
    assert_eq!(play(&mut bare, Colour::White, "c3", "d4"), GameStatus::Stalemate);
}

#[test]
fn custom_piece_on_a_larger_board() {
    let mut factory = PieceFactory::standard();
    let camel = Movement::jump(Path::template(&[(1, 3), (3, 1)]).unwrap()).mirrored(true, true);
    factory.register("camel", 250, vec![camel]).unwrap();

    let config = GameConfig::default().with_bounds(Bounds::with_size(10, 10).unwrap());
    let mut game = Game::from_layout(Arc::new(factory), "wKa1 bKj10 w~camel~e5", config).unwrap();

    let ends: Vec<_> = game.potential_updates().iter().filter(|a| a.start == pt("e5")).map(|a| a.end).collect();
    assert_eq!(ends.len(), 8);
    assert!(ends.contains(&pt("h6")));
    assert!(ends.contains(&pt("f8")));

    assert_eq!(play(&mut game, Colour::White, "e5", "h6"), GameStatus::Ongoing);
    assert_eq!(game.history()[0].to_string(), "~camel~e5-h6");
}
