use super::GameStatus;
use crate::core::*;

/******************************************\
|==========================================|
|                   Ply                    |
|==========================================|
\******************************************/

/// Secondary mutation recorded with a ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUpEntry {
    Relocate {
        piece: PieceId,
        from: Point,
        to: Point,
        first_occurrence: bool,
    },
    Remove {
        piece: PieceId,
        at: Point,
    },
    Promote {
        from: PieceKind,
        to: PieceKind,
    },
}

/// # Ply
///
/// Exactly what one committed half-move changed, enough to replay it forwards
/// and backwards without consulting any rule.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ply {
    pub piece: PieceId,
    pub start: Point,
    pub end: Point,
    pub captured: Option<PieceId>,
    /// Whether this was the moved piece's first move
    pub first_occurrence: bool,
    pub follow_up: Option<FollowUpEntry>,
}

impl Ply {
    /// Every point whose occupancy the ply changes
    pub fn touched(&self) -> Vec<Point> {
        let mut points = vec![self.start, self.end];
        match &self.follow_up {
            Some(FollowUpEntry::Relocate { from, to, .. }) => points.extend([*from, *to]),
            Some(FollowUpEntry::Remove { at, .. }) => points.push(*at),
            Some(FollowUpEntry::Promote { .. }) | None => {}
        }
        points
    }

    /// Every piece the ply moves, removes or changes
    pub fn pieces(&self) -> Vec<PieceId> {
        let mut pieces = vec![self.piece];
        pieces.extend(self.captured);
        match &self.follow_up {
            Some(FollowUpEntry::Relocate { piece, .. }) | Some(FollowUpEntry::Remove { piece, .. }) => {
                pieces.push(*piece)
            }
            Some(FollowUpEntry::Promote { .. }) | None => {}
        }
        pieces
    }

    /// The piece taken off the board, by capture or by follow-up
    pub fn taken(&self) -> Option<PieceId> {
        match &self.follow_up {
            Some(FollowUpEntry::Remove { piece, .. }) => Some(*piece),
            _ => self.captured,
        }
    }
}

/// A committed ply and the status it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub ply: Ply,
    pub status: GameStatus,
}

/******************************************\
|==========================================|
|                   Log                    |
|==========================================|
\******************************************/

/// # Log
///
/// Append-only history with an undo stack. Redo is only possible straight
/// after undo: pushing or dropping an entry clears the undo stack. Running off
/// either end returns `None`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Log {
    entries: Vec<LogEntry>,
    undone: Vec<LogEntry>,
}

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.undone.clear();
        self.entries.push(entry);
    }

    /// Drops the last entry without keeping it for redo
    pub fn pop(&mut self) -> Option<LogEntry> {
        self.undone.clear();
        self.entries.pop()
    }

    /// Moves the last entry to the undo stack
    pub fn undo(&mut self) -> Option<LogEntry> {
        let entry = self.entries.pop()?;
        self.undone.push(entry.clone());
        Some(entry)
    }

    /// Moves the most recently undone entry back
    pub fn redo(&mut self) -> Option<LogEntry> {
        let entry = self.undone.pop()?;
        self.entries.push(entry.clone());
        Some(entry)
    }

    #[inline]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    #[inline]
    pub(crate) fn last_mut(&mut self) -> Option<&mut LogEntry> {
        self.entries.last_mut()
    }

    #[inline]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of undone entries waiting to be redone
    #[inline]
    pub fn redo_len(&self) -> usize {
        self.undone.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> LogEntry {
        LogEntry {
            ply: Ply {
                piece: PieceId(n),
                start: Point::new(0, n as u8).unwrap(),
                end: Point::new(1, n as u8).unwrap(),
                captured: None,
                first_occurrence: true,
                follow_up: None,
            },
            status: GameStatus::Ongoing,
        }
    }

    #[test]
    fn test_undo_redo() {
        let mut log = Log::new();
        assert_eq!(log.undo(), None);
        assert_eq!(log.redo(), None);

        log.push(entry(0));
        log.push(entry(1));
        assert_eq!(log.undo(), Some(entry(1)));
        assert_eq!(log.len(), 1);
        assert_eq!(log.redo_len(), 1);

        assert_eq!(log.redo(), Some(entry(1)));
        assert_eq!(log.len(), 2);
        assert_eq!(log.redo(), None);
    }

    #[test]
    fn test_push_and_pop_invalidate_redo() {
        let mut log = Log::new();
        log.push(entry(0));
        log.push(entry(1));

        log.undo();
        log.push(entry(2));
        assert_eq!(log.redo(), None);

        log.undo();
        log.pop();
        assert_eq!(log.redo(), None);
        assert!(log.is_empty());
        assert_eq!(log.pop(), None);
    }

    #[test]
    fn test_ply_touched_points() {
        let mut ply = entry(0).ply;
        ply.follow_up = Some(FollowUpEntry::Remove {
            piece: PieceId(9),
            at: Point::new(4, 4).unwrap(),
        });

        assert_eq!(ply.touched().len(), 3);
        assert_eq!(ply.pieces(), vec![PieceId(0), PieceId(9)]);
        assert_eq!(ply.taken(), Some(PieceId(9)));
    }
}
