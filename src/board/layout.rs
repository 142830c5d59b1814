use thiserror::Error;

use super::Board;
use crate::core::*;
use crate::rules::PieceFactory;

/******************************************\
|==========================================|
|             Useful layouts               |
|==========================================|
\******************************************/

#[rustfmt::skip]
pub const STANDARD_LAYOUT: &str = "w \
    wRa1* wNb1* wBc1* wQd1* wKe1* wBf1* wNg1* wRh1* \
    wPa2* wPb2* wPc2* wPd2* wPe2* wPf2* wPg2* wPh2* \
    bPa7* bPb7* bPc7* bPd7* bPe7* bPf7* bPg7* bPh7* \
    bRa8* bNb8* bBc8* bQd8* bKe8* bBf8* bNg8* bRh8*";

/******************************************\
|==========================================|
|              Parse Layout                |
|==========================================|
\******************************************/

impl Board {
    /// Builds a board from a layout string.
    ///
    /// A layout is an optional side-to-move token (`w` or `b`, default `w`)
    /// followed by whitespace separated piece encodings. Returns the board and
    /// the side to move.
    pub fn from_layout(
        layout: &str,
        factory: &PieceFactory,
        bounds: Bounds,
    ) -> Result<(Board, Colour), LayoutError> {
        let mut board = Board::new(bounds);
        let mut turn = Colour::White;
        let mut kings = [false; Colour::NUM];

        for (i, token) in layout.split_whitespace().enumerate() {
            if token.chars().count() == 1 {
                if i != 0 {
                    return Err(LayoutError::MisplacedTurn(token.to_string()));
                }
                let c = token.chars().next().unwrap_or_default();
                turn = Colour::from_code(c).ok_or_else(|| LayoutError::MisplacedTurn(token.to_string()))?;
                continue;
            }

            let piece = factory.parse_piece(token)?;

            if !bounds.contains(piece.point) {
                return Err(LayoutError::OutOfBounds(piece.point));
            }
            if board.on(piece.point).is_some() {
                return Err(LayoutError::Occupied(piece.point));
            }
            if piece.is_king() {
                if kings[piece.colour.index()] {
                    return Err(LayoutError::DuplicateKing(piece.colour));
                }
                kings[piece.colour.index()] = true;
            }

            board.add_piece(piece);
        }

        Ok((board, turn))
    }

    /// The piece encodings of every piece on the board, in point order
    pub fn layout(&self) -> String {
        self.pieces()
            .map(|piece| piece.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/******************************************\
|==========================================|
|              Layout Errors               |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid piece in layout: {0}")]
    Piece(#[from] ParsePieceError),
    #[error("Piece placed outside the board at {0}")]
    OutOfBounds(Point),
    #[error("Two pieces placed on {0}")]
    Occupied(Point),
    #[error("More than one {0} king in layout")]
    DuplicateKing(Colour),
    #[error("Side-to-move token '{0}' must be 'w' or 'b' and come first")]
    MisplacedTurn(String),
}
