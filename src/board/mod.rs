pub mod layout;

pub use layout::{LayoutError, STANDARD_LAYOUT};

use crate::core::*;

/******************************************\
|==========================================|
|                  Board                   |
|==========================================|
\******************************************/

/// # Board representation
///
/// - `plane`: which piece stands on which point
/// - `pieces`: arena of every piece ever placed, indexed by [`PieceId`]
///
/// A piece is on the board exactly when the plane maps its point back to its
/// id. Captured pieces stay in the arena with their last point so that undo
/// can put the same instance back.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    plane: Plane<PieceId>,

    pieces: Vec<Piece>,
}

impl Board {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            plane: Plane::new(bounds),
            pieces: Vec::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        self.plane.bounds()
    }

    #[inline]
    pub fn plane(&self) -> &Plane<PieceId> {
        &self.plane
    }

    /// Id of the piece standing on `point`
    #[inline]
    pub fn on(&self, point: Point) -> Option<PieceId> {
        self.plane.get(point).copied()
    }

    /// The piece standing on `point`
    #[inline]
    pub fn piece_at(&self, point: Point) -> Option<&Piece> {
        self.on(point).map(|id| self.piece(id))
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.0]
    }

    #[inline]
    pub fn is_on_board(&self, id: PieceId) -> bool {
        self.on(self.piece(id).point) == Some(id)
    }

    /// Ids of the pieces on the board, in point order
    pub fn ids(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.plane.values().copied()
    }

    /// Ids of one colour's pieces on the board, in point order
    pub fn ids_of(&self, colour: Colour) -> impl Iterator<Item = PieceId> + '_ {
        self.ids().filter(move |id| self.piece(*id).colour == colour)
    }

    /// The pieces on the board, in point order
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.ids().map(|id| self.piece(id))
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.plane.len()
    }

    /// Adds a new piece to the arena and places it on its point.
    ///
    /// # Panics
    ///
    /// Panics if the point is occupied or outside the bounds.
    pub(crate) fn add_piece(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.pieces.len());
        let point = piece.point;
        self.pieces.push(piece);
        self.place(id, point);
        id
    }

    /// Puts an arena piece on `point` and records the point on the piece.
    ///
    /// # Panics
    ///
    /// Panics if another piece stands on `point`.
    pub(crate) fn place(&mut self, id: PieceId, point: Point) {
        let previous = self.plane.insert(point, id);
        assert!(
            previous.is_none(),
            "place: {point} is already occupied by {:?}",
            previous
        );
        self.piece_mut(id).point = point;
    }

    /// Takes a piece off the plane, leaving it in the arena.
    ///
    /// # Panics
    ///
    /// Panics if the piece is not on its recorded point.
    pub(crate) fn remove_piece(&mut self, id: PieceId) {
        let point = self.piece(id).point;
        let removed = self.plane.remove(point);
        assert_eq!(removed, Some(id), "remove_piece: {id} is not on {point}");
    }

    /// Moves a piece on the board to an empty point.
    #[inline]
    pub(crate) fn move_piece(&mut self, id: PieceId, to: Point) {
        self.remove_piece(id);
        self.place(id, to);
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (min, max) = (self.bounds().min(), self.bounds().max());
        let files = (max.x() - min.x()) as usize + 1;
        let separator = format!("\n     +{}", "---+".repeat(files));

        writeln!(f, "{}", separator)?;

        for y in (min.y()..=max.y()).rev() {
            write!(f, " {:<3} |", y as u32 + 1)?;

            for x in min.x()..=max.x() {
                let cell = Point::new(x, y)
                    .ok()
                    .and_then(|point| self.piece_at(point))
                    .map(|piece| {
                        let c = match &piece.kind {
                            PieceKind::Standard(pt) => pt.code(),
                            PieceKind::Custom(custom) => custom.code().chars().next().unwrap_or('?'),
                        };
                        match piece.colour {
                            Colour::White => c.to_ascii_uppercase(),
                            Colour::Black => c.to_ascii_lowercase(),
                        }
                    })
                    .unwrap_or(' ');
                write!(f, " {} |", cell)?;
            }

            writeln!(f, "{}", separator)?;
        }

        writeln!(f)?;
        write!(f, "      ")?;
        for x in min.x()..=max.x() {
            let file = Point::new(x, 0).map(|p| p.to_string()).unwrap_or_default();
            write!(f, " {:<3}", file.trim_end_matches(char::is_numeric).to_uppercase())?;
        }
        writeln!(f)
    }
}
