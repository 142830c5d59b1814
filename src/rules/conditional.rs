use super::{Location, MoveContext, Reference};
use crate::core::*;

/******************************************\
|==========================================|
|                Comparator                |
|==========================================|
\******************************************/

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Exist, DoesNotExist, True, False, Equal, NotEqual,
}

/// A property value read from a piece or the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Colour(Colour),
    Code(String),
    Int(i32),
}

impl Comparator {
    /// Compares one resolved value. `Exist` passes for anything that resolved,
    /// `DoesNotExist` fails for it.
    pub fn test(&self, value: &Value, expected: Option<&Value>) -> bool {
        match self {
            Comparator::Exist => true,
            Comparator::DoesNotExist => false,
            Comparator::True => *value == Value::Bool(true),
            Comparator::False => *value == Value::Bool(false),
            Comparator::Equal => expected == Some(value),
            Comparator::NotEqual => expected != Some(value),
        }
    }
}

/******************************************\
|==========================================|
|                Property                  |
|==========================================|
\******************************************/

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Whether the piece has moved
    Moved,
    /// Whether the piece belongs to the mover
    Friendly,
    /// The bare kind code
    Kind,
    Colour,
}

impl Property {
    fn read(&self, piece: &Piece, ctx: &MoveContext) -> Value {
        match self {
            Property::Moved => Value::Bool(piece.moved),
            Property::Friendly => Value::Bool(piece.colour == ctx.colour),
            Property::Kind => Value::Code(piece.kind.code()),
            Property::Colour => Value::Colour(piece.colour),
        }
    }
}

/// Which fact of the most recent ply a [`Conditional::Log`] inspects
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogQuery {
    /// Whether the ply was the moved piece's first move
    FirstOccurrence,
    /// Chebyshev distance between the ply's start and end
    Distance,
}

/******************************************\
|==========================================|
|               Conditional                |
|==========================================|
\******************************************/

/// # Conditional
///
/// A predicate gating a movement specification.
///
/// - `Property`: every piece resolved by the reference must pass the
///   comparator; an empty resolution passes only for `DoesNotExist`
/// - `Reference`: compares the piece sets of two references
/// - `Log`: inspects the most recent committed ply; fails on an empty log
/// - `Threat`: whether the mover's opponent threatens a location; always
///   fails while threat maps are being built
/// - `InBounds`: whether a location lies on the plane

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditional {
    Property {
        reference: Reference,
        property: Property,
        comparator: Comparator,
        expected: Option<Value>,
    },
    Reference {
        left: Reference,
        right: Reference,
        comparator: Comparator,
    },
    Log {
        query: LogQuery,
        comparator: Comparator,
        expected: Option<Value>,
    },
    Threat {
        location: Location,
        expected: bool,
    },
    InBounds {
        location: Location,
        expected: bool,
    },
}

impl Conditional {
    pub fn property(reference: Reference, property: Property, comparator: Comparator, expected: Option<Value>) -> Self {
        Conditional::Property {
            reference,
            property,
            comparator,
            expected,
        }
    }

    /// `property` of every referenced piece is `value`
    pub fn is(reference: Reference, property: Property, value: bool) -> Self {
        let comparator = if value { Comparator::True } else { Comparator::False };
        Self::property(reference, property, comparator, None)
    }

    /// Every referenced piece has kind `code`
    pub fn kind(reference: Reference, code: &str) -> Self {
        Self::property(reference, Property::Kind, Comparator::Equal, Some(Value::Code(code.to_string())))
    }

    /// Nothing is resolved by the reference
    pub fn empty(reference: Reference) -> Self {
        Self::property(reference, Property::Moved, Comparator::DoesNotExist, None)
    }

    /// Something is resolved by the reference
    pub fn occupied(reference: Reference) -> Self {
        Self::property(reference, Property::Moved, Comparator::Exist, None)
    }

    pub fn same(left: Reference, right: Reference) -> Self {
        Conditional::Reference {
            left,
            right,
            comparator: Comparator::Equal,
        }
    }

    pub fn log(query: LogQuery, comparator: Comparator, expected: Option<Value>) -> Self {
        Conditional::Log {
            query,
            comparator,
            expected,
        }
    }

    pub fn threatened(location: Location, expected: bool) -> Self {
        Conditional::Threat { location, expected }
    }

    pub fn in_bounds(location: Location, expected: bool) -> Self {
        Conditional::InBounds { location, expected }
    }

    /// Whether the outcome depends on the candidate destination
    pub fn uses_destination(&self) -> bool {
        match self {
            Conditional::Property { reference, .. } => reference.uses_destination(),
            Conditional::Reference { left, right, .. } => left.uses_destination() || right.uses_destination(),
            Conditional::Log { .. } => false,
            Conditional::Threat { location, .. } | Conditional::InBounds { location, .. } => {
                location.uses_destination()
            }
        }
    }

    /// Whether the outcome can change without the mover or the squares along
    /// its reach changing. Pieces gated by such conditions have their threats
    /// refreshed after every ply.
    pub fn is_volatile(&self) -> bool {
        !matches!(self, Conditional::InBounds { .. })
    }

    pub fn evaluate(&self, ctx: &MoveContext) -> bool {
        match self {
            Conditional::Property {
                reference,
                property,
                comparator,
                expected,
            } => {
                let pieces = reference.resolve(ctx);
                if pieces.is_empty() {
                    return *comparator == Comparator::DoesNotExist;
                }
                pieces.iter().all(|id| {
                    let value = property.read(ctx.board.piece(*id), ctx);
                    comparator.test(&value, expected.as_ref())
                })
            }

            Conditional::Reference {
                left,
                right,
                comparator,
            } => {
                let (mut left, mut right) = (left.resolve(ctx), right.resolve(ctx));
                left.sort();
                right.sort();
                match comparator {
                    Comparator::Exist => !left.is_empty() && !right.is_empty(),
                    Comparator::DoesNotExist => left.is_empty() && right.is_empty(),
                    Comparator::Equal | Comparator::True => !left.is_empty() && left == right,
                    Comparator::NotEqual | Comparator::False => left != right,
                }
            }

            Conditional::Log {
                query,
                comparator,
                expected,
            } => {
                let Some(entry) = ctx.log.last() else {
                    return false;
                };
                let value = match query {
                    LogQuery::FirstOccurrence => Value::Bool(entry.ply.first_occurrence),
                    LogQuery::Distance => Value::Int(Point::distance(entry.ply.start, entry.ply.end) as i32),
                };
                comparator.test(&value, expected.as_ref())
            }

            Conditional::Threat { location, expected } => {
                let (Some(threats), Some(point)) = (ctx.opponent_threats, location.resolve(ctx)) else {
                    return false;
                };
                threats.has_threats(point) == *expected
            }

            Conditional::InBounds { location, expected } => {
                let inside = location
                    .resolve(ctx)
                    .is_some_and(|point| ctx.board.bounds().contains(point));
                inside == *expected
            }
        }
    }
}
