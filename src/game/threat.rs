use std::collections::{BTreeMap, BTreeSet};

use crate::core::*;

/******************************************\
|==========================================|
|                Threat Map                |
|==========================================|
\******************************************/

/// # Threat Map
///
/// Point → pieces of one colour that threaten it, with the reverse index
/// piece → points so a piece can be cleared without scanning the map. Empty
/// sets are never stored, so two maps with the same reach compare equal.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreatMap {
    by_point: BTreeMap<Point, BTreeSet<PieceId>>,
    by_piece: BTreeMap<PieceId, BTreeSet<Point>>,
}

impl ThreatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the reach of `piece`
    pub fn set(&mut self, piece: PieceId, points: impl IntoIterator<Item = Point>) {
        self.clear_piece(piece);

        let points: BTreeSet<Point> = points.into_iter().collect();
        if points.is_empty() {
            return;
        }
        for point in &points {
            self.by_point.entry(*point).or_default().insert(piece);
        }
        self.by_piece.insert(piece, points);
    }

    /// Removes `piece` from every point it threatened
    pub fn clear_piece(&mut self, piece: PieceId) {
        let Some(points) = self.by_piece.remove(&piece) else {
            return;
        };
        for point in points {
            if let Some(pieces) = self.by_point.get_mut(&point) {
                pieces.remove(&piece);
                if pieces.is_empty() {
                    self.by_point.remove(&point);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.by_point.clear();
        self.by_piece.clear();
    }

    /// Pieces threatening `point`
    pub fn threats_at(&self, point: Point) -> impl Iterator<Item = PieceId> + '_ {
        self.by_point.get(&point).into_iter().flatten().copied()
    }

    #[inline]
    pub fn has_threats(&self, point: Point) -> bool {
        self.by_point.contains_key(&point)
    }

    #[inline]
    pub fn has_no_threats(&self, point: Point) -> bool {
        !self.has_threats(point)
    }

    /// Points threatened by `piece`
    pub fn reach(&self, piece: PieceId) -> impl Iterator<Item = Point> + '_ {
        self.by_piece.get(&piece).into_iter().flatten().copied()
    }

    /// Every threatened point with its threatening pieces
    pub fn iter(&self) -> impl Iterator<Item = (Point, &BTreeSet<PieceId>)> {
        self.by_point.iter().map(|(p, s)| (*p, s))
    }

    /// Sum of every piece's reach
    pub fn mobility(&self) -> usize {
        self.by_piece.values().map(BTreeSet::len).sum()
    }
}

/******************************************\
|==========================================|
|                 Move Map                 |
|==========================================|
\******************************************/

/// # Move Map
///
/// Point → pieces of one colour that can legally move there, built from the
/// check-filtered action list.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveMap {
    by_point: BTreeMap<Point, BTreeSet<PieceId>>,
}

impl MoveMap {
    pub(crate) fn insert(&mut self, point: Point, piece: PieceId) {
        self.by_point.entry(point).or_default().insert(piece);
    }

    pub fn movers_to(&self, point: Point) -> impl Iterator<Item = PieceId> + '_ {
        self.by_point.get(&point).into_iter().flatten().copied()
    }

    #[inline]
    pub fn can_reach(&self, point: Point) -> bool {
        self.by_point.contains_key(&point)
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.by_point.keys().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_point.is_empty()
    }

    /// Number of legal (piece, destination) pairs
    pub fn len(&self) -> usize {
        self.by_point.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    #[test]
    fn test_set_and_clear() {
        let mut map = ThreatMap::new();
        map.set(PieceId(0), [pt("e4"), pt("e5")]);
        map.set(PieceId(1), [pt("e5")]);

        assert!(map.has_threats(pt("e4")));
        assert_eq!(map.threats_at(pt("e5")).collect::<Vec<_>>(), vec![PieceId(0), PieceId(1)]);
        assert_eq!(map.mobility(), 3);

        map.set(PieceId(0), [pt("d4")]);
        assert!(map.has_no_threats(pt("e4")));
        assert_eq!(map.threats_at(pt("e5")).collect::<Vec<_>>(), vec![PieceId(1)]);

        map.clear_piece(PieceId(1));
        map.clear_piece(PieceId(7));
        assert!(map.has_no_threats(pt("e5")));
        assert_eq!(map.reach(PieceId(0)).collect::<Vec<_>>(), vec![pt("d4")]);
    }

    #[test]
    fn test_equality_ignores_history() {
        let mut a = ThreatMap::new();
        a.set(PieceId(0), [pt("a1")]);
        a.set(PieceId(0), [pt("b2")]);
        a.set(PieceId(1), []);

        let mut b = ThreatMap::new();
        b.set(PieceId(0), [pt("b2")]);

        assert_eq!(a, b);
    }

    #[test]
    fn test_move_map() {
        let mut map = MoveMap::default();
        assert!(map.is_empty());
        map.insert(pt("e4"), PieceId(3));
        map.insert(pt("e4"), PieceId(4));
        assert!(map.can_reach(pt("e4")));
        assert_eq!(map.len(), 2);
        assert_eq!(map.movers_to(pt("e4")).count(), 2);
    }
}
