use super::MoveContext;
use crate::core::*;

/******************************************\
|==========================================|
|                 Location                 |
|==========================================|
\******************************************/

/// What a [`Location`] is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Fixed(Point),
    Origin,
    Destination,
}

/// # Location
///
/// An anchor plus an offset. The `dx` component is absolute (files), the
/// `dy` component follows the mover's forward orientation, so
/// `Location::destination().offset(0, -1)` is "the square behind the
/// destination" for either colour.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    anchor: Anchor,
    dx: i32,
    dy: i32,
}

impl Location {
    pub const fn origin() -> Self {
        Self::anchored(Anchor::Origin)
    }

    pub const fn destination() -> Self {
        Self::anchored(Anchor::Destination)
    }

    pub const fn fixed(point: Point) -> Self {
        Self::anchored(Anchor::Fixed(point))
    }

    const fn anchored(anchor: Anchor) -> Self {
        Self { anchor, dx: 0, dy: 0 }
    }

    /// Shifts the location, `dy` counted towards the mover's front
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            anchor: self.anchor,
            dx: self.dx + dx,
            dy: self.dy + dy,
        }
    }

    #[inline]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[inline]
    pub const fn uses_destination(&self) -> bool {
        matches!(self.anchor, Anchor::Destination)
    }

    /// The concrete point, or `None` when the destination is not known yet or
    /// the offset leaves the coordinate range
    pub fn resolve(&self, ctx: &MoveContext) -> Option<Point> {
        let base = match self.anchor {
            Anchor::Fixed(point) => point,
            Anchor::Origin => ctx.origin,
            Anchor::Destination => ctx.destination?,
        };
        base.offset(self.dx, self.dy * ctx.colour.forward()).ok()
    }
}

/******************************************\
|==========================================|
|                Reference                 |
|==========================================|
\******************************************/

/// # Reference
///
/// A resolvable pointer to "the piece(s) at a place". Resolution always runs
/// against the live board and log; no reference stores a piece except
/// [`Reference::Mover`], which names the piece being evaluated.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// The piece standing on a location
    At(Location),
    /// The piece whose movement is being evaluated
    Mover,
    /// The piece moved by the most recent committed ply, if still on the board
    LastMoved,
    /// The pieces strictly between two locations
    Path(Location, Location),
}

impl Reference {
    pub fn uses_destination(&self) -> bool {
        match self {
            Reference::At(location) => location.uses_destination(),
            Reference::Path(from, to) => from.uses_destination() || to.uses_destination(),
            Reference::Mover | Reference::LastMoved => false,
        }
    }

    /// Resolves to zero, one or many pieces
    pub fn resolve(&self, ctx: &MoveContext) -> Vec<PieceId> {
        match self {
            Reference::At(location) => location
                .resolve(ctx)
                .and_then(|point| ctx.board.on(point))
                .into_iter()
                .collect(),

            Reference::Mover => vec![ctx.piece],

            Reference::LastMoved => ctx
                .log
                .last()
                .map(|entry| entry.ply.piece)
                .filter(|id| ctx.board.is_on_board(*id))
                .into_iter()
                .collect(),

            Reference::Path(from, to) => match (from.resolve(ctx), to.resolve(ctx)) {
                (Some(from), Some(to)) => Path::between(from, to)
                    .interior()
                    .iter()
                    .filter_map(|point| ctx.board.on(*point))
                    .collect(),
                _ => Vec::new(),
            },
        }
    }
}
