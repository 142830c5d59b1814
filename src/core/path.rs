use thiserror::Error;

use super::Point;

/******************************************\
|==========================================|
|                   Path                   |
|==========================================|
\******************************************/

/// # Path representation
///
/// An ordered, deduplicated sequence of points. Two flavours are built here:
///
/// - **Templates**: origin-relative shapes for movement rules, listed nearest
///   to the origin first. A template never contains the origin itself.
/// - **Lines**: the interpolation between two points, inclusive of both ends,
///   when they share a file, rank or diagonal. Any other pair degenerates to
///   the two end points.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Builds a path from points, dropping repeats while keeping first-seen order
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        let mut path = Path::default();
        for point in points {
            if !path.points.contains(&point) {
                path.points.push(point);
            }
        }
        path
    }

    /// Builds a movement template from `(x, y)` offsets
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess_variant::core::{Path, PathError};
    ///
    /// assert_eq!(Path::template(&[(1, 2), (2, 1)]).unwrap().len(), 2);
    /// assert_eq!(Path::template(&[(0, 0)]), Err(PathError::ContainsOrigin));
    /// ```
    pub fn template(offsets: &[(u8, u8)]) -> Result<Self, PathError> {
        if offsets.is_empty() {
            return Err(PathError::Empty);
        }

        let mut points = Vec::with_capacity(offsets.len());
        for &(x, y) in offsets {
            let point = Point::new(x, y).map_err(|_| PathError::OutOfRange(x, y))?;
            if point == Point::ORIGIN {
                return Err(PathError::ContainsOrigin);
            }
            points.push(point);
        }

        Ok(Path::new(points))
    }

    /// A straight ray of `len` steps along `(dx, dy)`, for slide templates
    pub fn ray(dx: u8, dy: u8, len: u8) -> Result<Self, PathError> {
        let offsets: Vec<_> = (1..=len).map(|k| (dx.saturating_mul(k), dy.saturating_mul(k))).collect();
        Path::template(&offsets)
    }

    /// The line from `from` to `to`, inclusive of both ends
    pub fn between(from: Point, to: Point) -> Self {
        let (dx, dy) = Point::delta(from, to);

        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return Path::new([from, to]);
        }

        let steps = dx.abs().max(dy.abs());
        let (sx, sy) = (dx.signum(), dy.signum());

        // every intermediate point lies between two valid points
        let points = (0..=steps).filter_map(|k| from.offset(sx * k, sy * k).ok());
        Path::new(points)
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    /// The points strictly between the two ends of the path
    pub fn interior(&self) -> &[Point] {
        match self.points.len() {
            0..=2 => &[],
            n => &self.points[1..n - 1],
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Point> + '_ {
        self.points.iter().copied()
    }
}

/******************************************\
|==========================================|
|               Path Errors                |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("A movement template may not contain the origin")]
    ContainsOrigin,
    #[error("A movement template needs at least one point")]
    Empty,
    #[error("Template offset ({0}, {1}) is outside the coordinate extent")]
    OutOfRange(u8, u8),
}
