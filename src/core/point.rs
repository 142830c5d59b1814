use thiserror::Error;

use super::{Colour, Direction};

/******************************************\
|==========================================|
|                  Point                   |
|==========================================|
\******************************************/

/// # Point representation
///
/// - An immutable integer coordinate, `0..=Point::MAX` on both axes
/// - Equality, ordering and hashing depend only on `(x, y)`
/// - Algebraic form uses a letter file (`a` = 0) and a 1-based rank

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    x: u8,
    y: u8,
}

impl Point {
    /// Largest coordinate value on either axis
    pub const MAX: u8 = 31;

    /// The origin, used as the centre of template paths
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    /// Creates a point, checking the coordinate extent
    pub const fn new(x: u8, y: u8) -> Result<Self, PointError> {
        if x > Self::MAX || y > Self::MAX {
            return Err(PointError::OutOfRange(x as i32, y as i32));
        }
        Ok(Point { x, y })
    }

    /// Creates a point from signed coordinates, checking the extent
    pub fn try_from_signed(x: i32, y: i32) -> Result<Self, PointError> {
        let range = 0..=Self::MAX as i32;
        if !range.contains(&x) || !range.contains(&y) {
            return Err(PointError::OutOfRange(x, y));
        }
        Ok(Point {
            x: x as u8,
            y: y as u8,
        })
    }

    #[inline]
    pub const fn x(&self) -> u8 {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> u8 {
        self.y
    }

    /// Returns the point displaced by `(dx, dy)`
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Result<Self, PointError> {
        Self::try_from_signed(self.x as i32 + dx, self.y as i32 + dy)
    }

    /// Shifts one step in `dir` as seen by `colour` (Black's front is White's back)
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess_variant::core::{Colour, Direction, Point};
    ///
    /// let e4: Point = "e4".parse().unwrap();
    /// assert_eq!(e4.shift(Direction::Front, Colour::White).unwrap().to_string(), "e5");
    /// assert_eq!(e4.shift(Direction::Front, Colour::Black).unwrap().to_string(), "e3");
    /// ```
    #[inline]
    pub fn shift(self, dir: Direction, colour: Colour) -> Result<Self, PointError> {
        let (dx, dy) = dir.delta(colour);
        self.offset(dx, dy)
    }

    /// Returns the Chebyshev distance between two points
    #[inline]
    pub const fn distance(a: Point, b: Point) -> u8 {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        if dx > dy { dx } else { dy }
    }

    /// Returns the signed difference `b - a`
    #[inline]
    pub const fn delta(a: Point, b: Point) -> (i32, i32) {
        (b.x as i32 - a.x as i32, b.y as i32 - a.y as i32)
    }
}

/// Points order rank by rank, then by file within a rank
impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/******************************************\
|==========================================|
|                  Bounds                  |
|==========================================|
\******************************************/

/// # Bounds representation
///
/// Inclusive min/max corners of a plane. Bounds checking through
/// [`Bounds::contains`] is the single answer to "is this point on the board".

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Default for Bounds {
    /// The standard 8x8 board, a1..h8
    fn default() -> Self {
        Bounds {
            min: Point::ORIGIN,
            max: Point { x: 7, y: 7 },
        }
    }
}

impl Bounds {
    /// Widest plane whose every point has an algebraic form (`a1` .. `z26`)
    pub const MAX_SIZE: u8 = FILES.len() as u8;

    pub fn new(min: Point, max: Point) -> Result<Self, BoundsError> {
        if min.x > max.x || min.y > max.y {
            return Err(BoundsError::Inverted(min, max));
        }
        if max.x >= Self::MAX_SIZE || max.y >= Self::MAX_SIZE {
            return Err(BoundsError::Unencodable(max));
        }
        Ok(Bounds { min, max })
    }

    /// Bounds `0..width` by `0..height`
    pub fn with_size(width: u8, height: u8) -> Result<Self, BoundsError> {
        if width == 0 || height == 0 {
            return Err(BoundsError::Empty(width, height));
        }
        if width > Self::MAX_SIZE || height > Self::MAX_SIZE {
            return Err(BoundsError::TooLarge(width, height));
        }
        let max = Point::new(width - 1, height - 1).map_err(|_| BoundsError::TooLarge(width, height))?;
        Bounds::new(Point::ORIGIN, max)
    }

    #[inline]
    pub const fn min(&self) -> Point {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> Point {
        self.max
    }

    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Signed variant of [`Bounds::contains`] for reflected template arithmetic
    #[inline]
    pub fn contains_signed(&self, x: i32, y: i32) -> Option<Point> {
        Point::try_from_signed(x, y).ok().filter(|p| self.contains(*p))
    }

    /// Iterates every point inside the bounds, rank by rank
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Point { x, y }))
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

/// Files are letters, so algebraic form stops at `z`
const FILES: &str = "abcdefghijklmnopqrstuvwxyz";

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match FILES.chars().nth(self.x as usize) {
            Some(file) => write!(f, "{}{}", file, self.y as u32 + 1),
            None => write!(f, "({},{})", self.x, self.y),
        }
    }
}

/******************************************\
|==========================================|
|               Parse Point                |
|==========================================|
\******************************************/

impl std::str::FromStr for Point {
    type Err = PointError;

    /// Parses algebraic form (`a1` .. `z26`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file_char = chars.next().ok_or(PointError::InvalidLength(0))?;
        let x = FILES
            .chars()
            .position(|c| c == file_char)
            .ok_or(PointError::InvalidFile(file_char))?;

        let rank_str = chars.as_str();
        if rank_str.is_empty() || rank_str.len() > 2 {
            return Err(PointError::InvalidLength(s.len()));
        }
        if !rank_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PointError::InvalidRank(rank_str.to_string()));
        }
        let rank = rank_str
            .parse::<u8>()
            .map_err(|_| PointError::InvalidRank(rank_str.to_string()))?;
        if rank == 0 || rank as usize > FILES.len() {
            return Err(PointError::InvalidRank(rank_str.to_string()));
        }

        Point::new(x as u8, rank - 1)
    }
}

/******************************************\
|==========================================|
|               Point Errors               |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointError {
    #[error("Coordinate ({0}, {1}) is outside 0..={max}", max = Point::MAX)]
    OutOfRange(i32, i32),
    #[error("Invalid length for point string: {0}")]
    InvalidLength(usize),
    #[error("Invalid file character: '{0}', expected 'a'-'z'")]
    InvalidFile(char),
    #[error("Invalid rank: '{0}', expected 1-26")]
    InvalidRank(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundsError {
    #[error("Minimum corner {0} lies beyond maximum corner {1}")]
    Inverted(Point, Point),
    #[error("Plane of size {0}x{1} has no squares")]
    Empty(u8, u8),
    #[error("Plane of size {0}x{1} exceeds {max}x{max}", max = Bounds::MAX_SIZE)]
    TooLarge(u8, u8),
    #[error("Corner {0} has no algebraic form")]
    Unencodable(Point),
}
