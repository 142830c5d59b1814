use std::collections::BTreeMap;
use std::sync::Arc;

use super::*;
use crate::core::*;
use crate::core::piece::validate_custom_code;

/******************************************\
|==========================================|
|              Piece Factory               |
|==========================================|
\******************************************/

/// # Piece Factory
///
/// Owns the movement specifications of every piece kind: the standard six,
/// built once by [`PieceFactory::standard`], plus any registered custom
/// pieces. Built by the caller and handed to whatever creates pieces; there is
/// no process-wide instance.

#[derive(Debug, Clone)]
pub struct PieceFactory {
    standard: [Vec<Movement>; PieceType::NUM],
    custom: BTreeMap<String, Arc<CustomPiece>>,
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::standard()
    }
}

impl PieceFactory {
    /// The standard piece set, every piece expressed as movement specifications
    pub fn standard() -> Self {
        Self {
            standard: [pawn(), knight(), bishop(), rook(), queen(), king()],
            custom: BTreeMap::new(),
        }
    }

    /// Registers a custom piece. Registering a code again replaces it.
    pub fn register(&mut self, code: &str, value: i32, movements: Vec<Movement>) -> Result<PieceKind, ParsePieceError> {
        validate_custom_code(code)?;
        let custom = Arc::new(CustomPiece::new(code.to_string(), value, movements));
        self.custom.insert(code.to_string(), Arc::clone(&custom));
        Ok(PieceKind::Custom(custom))
    }

    pub fn custom(&self, code: &str) -> Option<PieceKind> {
        self.custom.get(code).map(|custom| PieceKind::Custom(Arc::clone(custom)))
    }

    /// Every registered custom piece, ordered by code
    pub fn custom_pieces(&self) -> impl Iterator<Item = &CustomPiece> {
        self.custom.values().map(|custom| custom.as_ref())
    }

    /// The movement specifications of a kind, in priority order
    pub fn movements<'a>(&'a self, kind: &'a PieceKind) -> &'a [Movement] {
        match kind {
            PieceKind::Standard(pt) => &self.standard[pt.index()],
            PieceKind::Custom(custom) => custom.movements(),
        }
    }

    pub fn kind(&self, token: &KindToken) -> Result<PieceKind, ParsePieceError> {
        match token {
            KindToken::Standard(pt) => Ok(PieceKind::Standard(*pt)),
            KindToken::Custom(code) => self
                .custom(code)
                .ok_or_else(|| ParsePieceError::UnknownCustom(code.clone())),
        }
    }

    /// Builds a piece from its encoding, e.g. `wPe2*` or `b~amazon~d8`
    pub fn parse_piece(&self, s: &str) -> Result<Piece, ParsePieceError> {
        let encoded: EncodedPiece = s.parse()?;
        let mut piece = Piece::new(encoded.colour, self.kind(&encoded.kind)?, encoded.point);
        piece.moved = !encoded.unmoved;
        Ok(piece)
    }
}

/******************************************\
|==========================================|
|             Standard Pieces              |
|==========================================|
\******************************************/

/// Longest slide any board can hold
const RAY: u8 = Point::MAX;

fn template(offsets: &[(u8, u8)]) -> Path {
    Path::template(offsets).expect("standard templates never contain the origin")
}

fn ray(dx: u8, dy: u8) -> Path {
    Path::ray(dx, dy, RAY).expect("standard rays never contain the origin")
}

fn pawn() -> Vec<Movement> {
    let ahead = Location::destination().offset(0, 1);
    let behind = Location::destination().offset(0, -1);
    let victim = Reference::At(behind);

    let step = || Movement::jump(template(&[(0, 1)])).specific_quadrant().move_only();
    let diagonal = || Movement::jump(template(&[(1, 1)])).mirrored(false, true).attack_only();

    vec![
        step().when(Conditional::in_bounds(ahead, true)),
        step()
            .when(Conditional::in_bounds(ahead, false))
            .then(FollowUp::Promote(PieceType::Queen)),
        Movement::jump(template(&[(0, 2)]))
            .specific_quadrant()
            .move_only()
            .when(Conditional::is(Reference::Mover, Property::Moved, false))
            .when(Conditional::empty(Reference::Path(Location::origin(), Location::destination()))),
        diagonal().when(Conditional::in_bounds(ahead, true)),
        diagonal()
            .when(Conditional::in_bounds(ahead, false))
            .then(FollowUp::Promote(PieceType::Queen)),
        // en passant
        Movement::jump(template(&[(1, 1)]))
            .mirrored(false, true)
            .move_only()
            .when(Conditional::kind(victim, "P"))
            .when(Conditional::is(victim, Property::Friendly, false))
            .when(Conditional::same(victim, Reference::LastMoved))
            .when(Conditional::log(LogQuery::FirstOccurrence, Comparator::True, None))
            .when(Conditional::log(LogQuery::Distance, Comparator::Equal, Some(Value::Int(2))))
            .then(FollowUp::Remove { at: behind }),
    ]
}

fn knight() -> Vec<Movement> {
    vec![Movement::jump(template(&[(1, 2), (2, 1)])).mirrored(true, true)]
}

fn bishop() -> Vec<Movement> {
    vec![Movement::slide(ray(1, 1)).mirrored(true, true)]
}

fn rook() -> Vec<Movement> {
    vec![
        Movement::slide(ray(0, 1)).mirrored(true, false),
        Movement::slide(ray(1, 0)).mirrored(false, true),
    ]
}

fn queen() -> Vec<Movement> {
    let mut movements = rook();
    movements.extend(bishop());
    movements
}

fn king() -> Vec<Movement> {
    vec![
        Movement::jump(template(&[(0, 1), (1, 1), (1, 0)])).mirrored(true, true),
        castle(Side::King),
        castle(Side::Queen),
    ]
}

#[derive(Clone, Copy)]
enum Side {
    King,
    Queen,
}

/// King moves two files towards an unmoved rook; the rook lands on the
/// square the king crossed
fn castle(side: Side) -> Movement {
    let (dir, rook_dx) = match side {
        Side::King => (1, 3),
        Side::Queen => (-1, -4),
    };

    let origin = Location::origin();
    let rook_at = origin.offset(rook_dx, 0);
    let crossed = origin.offset(dir, 0);
    let rook = Reference::At(rook_at);

    let movement = Movement::jump(template(&[(2, 0)]));
    let movement = match side {
        Side::King => movement,
        Side::Queen => movement.mirrored(false, true),
    };

    movement
        .specific_quadrant()
        .move_only()
        .when(Conditional::is(Reference::Mover, Property::Moved, false))
        .when(Conditional::kind(rook, "R"))
        .when(Conditional::is(rook, Property::Friendly, true))
        .when(Conditional::is(rook, Property::Moved, false))
        .when(Conditional::empty(Reference::Path(origin, rook_at)))
        .when(Conditional::threatened(origin, false))
        .when(Conditional::threatened(crossed, false))
        .then(FollowUp::Relocate {
            from: rook_at,
            to: crossed,
        })
}
