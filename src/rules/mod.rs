// Movement rule interpreter

pub mod conditional;
pub mod factory;
pub mod movement;
pub mod reference;

pub use conditional::{Comparator, Conditional, LogQuery, Property, Value};
pub use factory::PieceFactory;
pub use movement::{FollowUp, Mode, MoveType, Movement};
pub use reference::{Anchor, Location, Reference};

use crate::board::Board;
use crate::core::{Colour, PieceId, Point};
use crate::game::{Log, ThreatMap};

/******************************************\
|==========================================|
|               Move Context               |
|==========================================|
\******************************************/

/// Everything a rule may look at while it is evaluated for one piece.
///
/// `opponent_threats` is `None` while threat maps themselves are being
/// built. `destination` is only set while a candidate is being checked.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub board: &'a Board,
    pub log: &'a Log,
    pub opponent_threats: Option<&'a ThreatMap>,
    pub piece: PieceId,
    pub colour: Colour,
    pub origin: Point,
    pub destination: Option<Point>,
}

impl<'a> MoveContext<'a> {
    /// Context for `piece` standing where it stands now
    pub fn new(board: &'a Board, log: &'a Log, opponent_threats: Option<&'a ThreatMap>, piece: PieceId) -> Self {
        let owner = board.piece(piece);
        Self {
            board,
            log,
            opponent_threats,
            piece,
            colour: owner.colour,
            origin: owner.point,
            destination: None,
        }
    }

    /// The same context with a candidate destination
    #[inline]
    pub fn at(&self, destination: Point) -> Self {
        Self {
            destination: Some(destination),
            ..*self
        }
    }
}
