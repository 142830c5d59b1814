use std::collections::BTreeMap;

use thiserror::Error;

use super::{Action, FollowUpEntry, Game};
use crate::core::*;

/******************************************\
|==========================================|
|              Move Notation               |
|==========================================|
\******************************************/

/// # Move Notation
///
/// `<code><start>[-|x]<end>`: the piece code (`P`, `N`, ..., or `~code~`), the
/// start square, `-` for a quiet move or `x` for a capture, and the end square.
///
/// ## Examples
///
/// ```
/// use chess_variant::game::MoveNotation;
///
/// let notation: MoveNotation = "Pe2-e4".parse().unwrap();
/// assert!(!notation.capture);
/// assert_eq!(notation.to_string(), "Pe2-e4");
/// ```

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveNotation {
    /// Encoding token of the moved piece's kind
    pub code: String,
    pub start: Point,
    pub end: Point,
    pub capture: bool,
}

impl MoveNotation {
    /// The action this notation describes for `colour`
    pub fn action(&self, colour: Colour) -> Action {
        Action::new(colour, self.start, self.end)
    }
}

impl std::fmt::Display for MoveNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = if self.capture { 'x' } else { '-' };
        write!(f, "{}{}{}{}", self.code, self.start, separator, self.end)
    }
}

impl std::str::FromStr for MoveNotation {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, rest) = if let Some(custom) = s.strip_prefix('~') {
            let end = custom.find('~').ok_or_else(|| NotationError::InvalidCode(s.to_string()))?;
            (&s[..end + 2], &custom[end + 1..])
        } else {
            let c = s.chars().next().ok_or(NotationError::Empty)?;
            PieceType::from_code(c).ok_or_else(|| NotationError::InvalidCode(c.to_string()))?;
            s.split_at(c.len_utf8())
        };

        // a square is one file letter and the rank digits that follow it
        let split = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .ok_or_else(|| NotationError::MissingSeparator(s.to_string()))?;

        let (start, rest) = rest.split_at(split);
        let mut tail = rest.chars();
        let capture = match tail.next() {
            Some('-') => false,
            Some('x') => true,
            _ => return Err(NotationError::MissingSeparator(s.to_string())),
        };

        Ok(MoveNotation {
            code: code.to_string(),
            start: start.parse()?,
            end: tail.as_str().parse()?,
            capture,
        })
    }
}

impl Game {
    /// Notation of every committed ply, oldest first.
    ///
    /// Kinds are read back from the board, walking promotions backwards so a
    /// promoted pawn is still written as a pawn before it promoted.
    pub fn history(&self) -> Vec<MoveNotation> {
        let mut kinds: BTreeMap<PieceId, PieceKind> = BTreeMap::new();
        let mut history: Vec<_> = self
            .log
            .iter()
            .rev()
            .map(|entry| {
                let ply = &entry.ply;
                if let Some(FollowUpEntry::Promote { from, .. }) = &ply.follow_up {
                    kinds.insert(ply.piece, from.clone());
                }
                let kind = kinds.get(&ply.piece).unwrap_or(&self.board.piece(ply.piece).kind);

                MoveNotation {
                    code: kind.to_string(),
                    start: ply.start,
                    end: ply.end,
                    capture: ply.taken().is_some(),
                }
            })
            .collect();

        history.reverse();
        history
    }

    /// Notation of the `index`-th committed ply
    pub fn notation(&self, index: usize) -> Option<MoveNotation> {
        self.history().into_iter().nth(index)
    }
}

/******************************************\
|==========================================|
|             Notation Errors              |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Move notation is empty")]
    Empty,
    #[error("Invalid piece code in move notation: {0}")]
    InvalidCode(String),
    #[error("Move notation needs '-' or 'x' between the squares: {0}")]
    MissingSeparator(String),
    #[error("Invalid square in move notation: {0}")]
    InvalidPoint(#[from] PointError),
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

    #[test]
    fn test_parse_notation() {
        let quiet: MoveNotation = "Pe2-e4".parse().unwrap();
        assert_eq!(quiet.code, "P");
        assert_eq!(quiet.start, pt("e2"));
        assert_eq!(quiet.end, pt("e4"));
        assert!(!quiet.capture);

        let capture: MoveNotation = "Qd1xh5".parse().unwrap();
        assert!(capture.capture);
        assert_eq!(capture.to_string(), "Qd1xh5");

        let custom: MoveNotation = "~camel~a10-b13".parse().unwrap();
        assert_eq!(custom.code, "~camel~");
        assert_eq!(custom.start, pt("a10"));
        assert_eq!(custom.end, pt("b13"));

        let file_x: MoveNotation = "Rx1xx8".parse().unwrap();
        assert_eq!(file_x.start, Point::new(23, 0).unwrap());
        assert!(file_x.capture);
    }

    #[test]
    fn test_parse_notation_errors() {
        assert_eq!("".parse::<MoveNotation>(), Err(NotationError::Empty));
        assert!(matches!("Ze2-e4".parse::<MoveNotation>(), Err(NotationError::InvalidCode(_))));
        assert!(matches!("~camel".parse::<MoveNotation>(), Err(NotationError::InvalidCode(_))));
        assert!(matches!("Pe2e4".parse::<MoveNotation>(), Err(NotationError::MissingSeparator(_))));
        assert!(matches!("Pe2".parse::<MoveNotation>(), Err(NotationError::MissingSeparator(_))));
        assert!(matches!("Pe2-e".parse::<MoveNotation>(), Err(NotationError::InvalidPoint(_))));
    }

    #[test]
    fn test_history_notation() {
        let mut game = Game::new(Arc::new(PieceFactory::standard()), GameConfig::default()).unwrap();
        for text in ["Pe2-e4", "Pd7-d5", "Pe4xd5", "Qd8xd5"] {
            let notation: MoveNotation = text.parse().unwrap();
            let turn = game.turn();
            game.update_game(notation.action(turn)).unwrap();
        }

        let history: Vec<_> = game.history().iter().map(|n| n.to_string()).collect();
        assert_eq!(history, vec!["Pe2-e4", "Pd7-d5", "Pe4xd5", "Qd8xd5"]);
        assert_eq!(game.notation(2).map(|n| n.to_string()), Some("Pe4xd5".into()));
        assert_eq!(game.notation(4), None);
    }

    #[test]
    fn test_history_keeps_pawn_code_before_promotion() {
        let factory = Arc::new(PieceFactory::standard());
        let mut game = Game::from_layout(factory, "wKe1 bKh6 wPa6", GameConfig::default()).unwrap();
        for (from, to) in [("a6", "a7"), ("h6", "h5"), ("a7", "a8")] {
            let turn = game.turn();
            game.update_game(Action::new(turn, pt(from), pt(to))).unwrap();
        }

        let history: Vec<_> = game.history().iter().map(|n| n.to_string()).collect();
        assert_eq!(history, vec!["Pa6-a7", "Kh6-h5", "Pa7-a8"]);
    }
}
