/******************************************\
|==========================================|
|                 Colours                  |
|==========================================|
\******************************************/

/// # Colour Representation
///
/// Represents the two sides of a game: White and Black.
/// White's forward is increasing `y`, Black's forward is decreasing `y`.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Colour {
    White,
    Black
}

crate::impl_enum_table!(Colour, [White, Black]);

/******************************************\
|==========================================|
|                 Direction                |
|==========================================|
\******************************************/

/// # Direction Representation
///
/// A single step named relative to a colour's orientation. `At` is the null step.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Front, Back, Left, Right, At,
}

crate::impl_enum_table!(Direction, [Front, Back, Left, Right, At]);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Colour {
    /// Sign of the `y` axis that this colour calls "forward"
    #[inline]
    pub const fn forward(&self) -> i32 {
        match self {
            Colour::White => 1,
            Colour::Black => -1,
        }
    }

    /// Single character used by the piece encoding (`w` / `b`)
    #[inline]
    pub const fn code(&self) -> char {
        match self {
            Colour::White => 'w',
            Colour::Black => 'b',
        }
    }

    /// Parses the piece encoding colour character
    pub const fn from_code(c: char) -> Option<Colour> {
        match c {
            'w' => Some(Colour::White),
            'b' => Some(Colour::Black),
            _ => None,
        }
    }
}

impl std::ops::Not for Colour {
    type Output = Self;

    /// Returns the opposite colour
    fn not(self) -> Self::Output {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colour::White => write!(f, "white"),
            Colour::Black => write!(f, "black"),
        }
    }
}

impl Direction {
    /// Returns the `(dx, dy)` step for this direction as seen by `colour`.
    ///
    /// Only the forward axis is reflected for Black; left and right are absolute.
    #[inline]
    pub const fn delta(&self, colour: Colour) -> (i32, i32) {
        match self {
            Direction::Front => (0, colour.forward()),
            Direction::Back => (0, -colour.forward()),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::At => (0, 0),
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Self;

    /// Negate the direction (Front => Back, etc...)
    fn neg(self) -> Self::Output {
        match self {
            Direction::Front => Direction::Back,
            Direction::Back => Direction::Front,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::At => Direction::At,
        }
    }
}
