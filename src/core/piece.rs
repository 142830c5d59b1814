use std::sync::Arc;

use thiserror::Error;

use super::{Colour, Point, PointError};
use crate::rules::Movement;

/******************************************\
|==========================================|
|                Piece Type                |
|==========================================|
\******************************************/

/// # Piece Type representation
///
/// - The six standard pieces. Their movement is not hard-coded anywhere: the
///   factory describes each of them with movement specifications

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceType {
   Pawn, Knight, Bishop, Rook, Queen, King,
}

crate::impl_enum_table!(PieceType, [Pawn, Knight, Bishop, Rook, Queen, King]);

/// String to convert from piece type to its code
const PIECE_STR: &str = "PNBRQK";

/// Material values in centipawns, indexed by piece type
const PIECE_VALUES: [i32; PieceType::NUM] = [100, 320, 330, 500, 900, 0];

impl PieceType {
    #[inline]
    pub fn code(&self) -> char {
        PIECE_STR.as_bytes()[self.index()] as char
    }

    pub fn from_code(c: char) -> Option<PieceType> {
        PIECE_STR
            .chars()
            .position(|p| p == c)
            .and_then(PieceType::from_index)
    }

    #[inline]
    pub const fn value(&self) -> i32 {
        PIECE_VALUES[*self as usize]
    }
}

/******************************************\
|==========================================|
|               Custom Piece               |
|==========================================|
\******************************************/

/// A piece type declared entirely by its movement specifications.
///
/// Registered once with the [`PieceFactory`](crate::rules::PieceFactory) and shared
/// read-only by every piece of that type.
#[derive(Debug, Clone)]
pub struct CustomPiece {
    code: String,
    value: i32,
    movements: Vec<Movement>,
}

impl CustomPiece {
    pub(crate) fn new(code: String, value: i32, movements: Vec<Movement>) -> Self {
        Self {
            code,
            value,
            movements,
        }
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[inline]
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }
}

/******************************************\
|==========================================|
|                Piece Kind                |
|==========================================|
\******************************************/

/// # Piece Kind
///
/// Closed set of piece variants: one of the standard six, or a declarative
/// custom piece carrying its own movement list. Two kinds are equal when their
/// codes are equal.

#[derive(Debug, Clone)]
pub enum PieceKind {
    Standard(PieceType),
    Custom(Arc<CustomPiece>),
}

impl PieceKind {
    /// The bare type code (`"P"`, `"amazon"`) compared by kind conditions
    pub fn code(&self) -> String {
        match self {
            PieceKind::Standard(pt) => pt.code().to_string(),
            PieceKind::Custom(custom) => custom.code().to_string(),
        }
    }

    #[inline]
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Standard(pt) => pt.value(),
            PieceKind::Custom(custom) => custom.value(),
        }
    }

    #[inline]
    pub fn is(&self, pt: PieceType) -> bool {
        matches!(self, PieceKind::Standard(kind) if *kind == pt)
    }
}

impl PartialEq for PieceKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PieceKind::Standard(a), PieceKind::Standard(b)) => a == b,
            (PieceKind::Custom(a), PieceKind::Custom(b)) => a.code() == b.code(),
            _ => false,
        }
    }
}

impl Eq for PieceKind {}

impl std::fmt::Display for PieceKind {
    /// Encoding token: a standard letter, or a custom code between `~`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceKind::Standard(pt) => write!(f, "{}", pt.code()),
            PieceKind::Custom(custom) => write!(f, "~{}~", custom.code()),
        }
    }
}

/******************************************\
|==========================================|
|                  Piece                   |
|==========================================|
\******************************************/

/// Stable handle of a piece inside a board's piece arena.
///
/// Ids are never reused, so a captured piece restored by undo keeps its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// # Piece representation
///
/// Colour, kind, current point and the moved flag. Mutated in place by moves
/// and promotion, never recreated.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub colour: Colour,
    pub kind: PieceKind,
    pub point: Point,
    pub moved: bool,
}

impl Piece {
    pub fn new(colour: Colour, kind: PieceKind, point: Point) -> Self {
        Self {
            colour,
            kind,
            point,
            moved: false,
        }
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind.is(PieceType::King)
    }
}

impl std::fmt::Display for Piece {
    /// Piece encoding, `<colour><code><point>[*]`, `*` marking an unmoved piece
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.colour.code(), self.kind, self.point)?;
        if !self.moved {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/******************************************\
|==========================================|
|              Piece Encoding              |
|==========================================|
\******************************************/

/// Kind token of a piece encoding before custom codes are looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindToken {
    Standard(PieceType),
    Custom(String),
}

/// A parsed piece encoding, independent of any factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPiece {
    pub colour: Colour,
    pub kind: KindToken,
    pub point: Point,
    pub unmoved: bool,
}

impl std::str::FromStr for EncodedPiece {
    type Err = ParsePieceError;

    /// Parses `<w|b><PRNBQK|~code~><file><rank>[*]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();

        let colour_char = chars.next().ok_or(ParsePieceError::Empty)?;
        let colour = Colour::from_code(colour_char).ok_or(ParsePieceError::InvalidColour(colour_char))?;

        let rest = chars.as_str();
        let (kind, rest) = match rest.strip_prefix('~') {
            Some(custom) => {
                let end = custom
                    .find('~')
                    .ok_or_else(|| ParsePieceError::UnterminatedCustom(s.to_string()))?;
                let code = &custom[..end];
                validate_custom_code(code)?;
                (KindToken::Custom(code.to_string()), &custom[end + 1..])
            }
            None => {
                let code_char = rest.chars().next().ok_or(ParsePieceError::Empty)?;
                let pt = PieceType::from_code(code_char).ok_or(ParsePieceError::InvalidCode(code_char))?;
                (KindToken::Standard(pt), &rest[code_char.len_utf8()..])
            }
        };

        let (point_str, unmoved) = match rest.strip_suffix('*') {
            Some(point_str) => (point_str, true),
            None => (rest, false),
        };

        Ok(EncodedPiece {
            colour,
            kind,
            point: point_str.parse()?,
            unmoved,
        })
    }
}

/// Custom codes must be non-empty and free of the `~` delimiter and whitespace
pub(crate) fn validate_custom_code(code: &str) -> Result<(), ParsePieceError> {
    if code.is_empty() || code.chars().any(|c| c == '~' || c.is_whitespace()) {
        return Err(ParsePieceError::InvalidCustomCode(code.to_string()));
    }
    Ok(())
}

/******************************************\
|==========================================|
|               Piece Errors               |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePieceError {
    #[error("Piece encoding is empty or truncated")]
    Empty,
    #[error("Invalid colour character: '{0}', expected 'w' or 'b'")]
    InvalidColour(char),
    #[error("Invalid piece code: '{0}', expected one of PNBRQK or ~code~")]
    InvalidCode(char),
    #[error("Custom piece code is not closed with '~': {0}")]
    UnterminatedCustom(String),
    #[error("Invalid custom piece code: '{0}'")]
    InvalidCustomCode(String),
    #[error("No custom piece registered with code '{0}'")]
    UnknownCustom(String),
    #[error("Invalid piece point: {0}")]
    InvalidPoint(#[from] PointError),
}
