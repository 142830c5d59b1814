use std::collections::BTreeMap;

use super::{Bounds, Point};

/******************************************\
|==========================================|
|                  Plane                   |
|==========================================|
\******************************************/

/// # Plane representation
///
/// - A bounded, sparse mapping from [`Point`] to an occupant
/// - Iteration is ordered by point (rank first, then file), so anything
///   derived from a plane walk is deterministic
/// - Writing outside the bounds is a caller bug and panics

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane<T> {
    bounds: Bounds,
    cells: BTreeMap<Point, T>,
}

impl<T> Plane<T> {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: BTreeMap::new(),
        }
    }

    #[inline]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub const fn in_bounds(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    #[inline]
    pub fn get(&self, point: Point) -> Option<&T> {
        self.cells.get(&point)
    }

    /// Puts `value` at `point`, returning the previous occupant
    pub fn insert(&mut self, point: Point, value: T) -> Option<T> {
        assert!(
            self.in_bounds(point),
            "{point} is outside the plane bounds {:?}",
            self.bounds
        );
        self.cells.insert(point, value)
    }

    pub fn remove(&mut self, point: Point) -> Option<T> {
        self.cells.remove(&point)
    }

    #[inline]
    pub fn is_occupied(&self, point: Point) -> bool {
        self.cells.contains_key(&point)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.cells.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.cells.iter().map(|(p, v)| (*p, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    #[test]
    fn test_plane_put_get_remove() {
        let mut plane = Plane::new(Bounds::default());
        assert!(plane.is_empty());

        assert_eq!(plane.insert(pt("e4"), 'P'), None);
        assert_eq!(plane.insert(pt("e4"), 'Q'), Some('P'));
        assert_eq!(plane.get(pt("e4")), Some(&'Q'));
        assert!(plane.is_occupied(pt("e4")));
        assert_eq!(plane.len(), 1);

        assert_eq!(plane.remove(pt("e4")), Some('Q'));
        assert_eq!(plane.remove(pt("e4")), None);
        assert!(!plane.is_occupied(pt("e4")));
    }

    #[test]
    fn test_plane_iterates_in_point_order() {
        let mut plane = Plane::new(Bounds::default());
        plane.insert(pt("h8"), 3);
        plane.insert(pt("a1"), 1);
        plane.insert(pt("b1"), 2);

        let points: Vec<_> = plane.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(points, vec!["a1", "b1", "h8"]);
        assert_eq!(plane.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    #[should_panic]
    fn test_plane_rejects_out_of_bounds_insert() {
        let mut plane = Plane::new(Bounds::default());
        plane.insert(pt("i1"), ());
    }
}
