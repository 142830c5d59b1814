use super::{Conditional, Location, MoveContext};
use crate::core::*;

/******************************************\
|==========================================|
|                Move Type                 |
|==========================================|
\******************************************/

/// How a template is walked.
///
/// - `Slide`: stops at the first occupied point and at the plane edge
/// - `Jump`: every template point is independent of the others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Slide,
    Jump,
}

/// Which reach is being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Destinations the piece may move to this turn
    Moves,
    /// Points the piece threatens, defended pieces included
    Threats,
}

/******************************************\
|==========================================|
|                Follow Up                 |
|==========================================|
\******************************************/

/// A secondary board mutation bundled with a movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Move the piece on `from` to `to` (castling rook)
    Relocate { from: Location, to: Location },
    /// Take the piece on `at` off the board (en passant)
    Remove { at: Location },
    /// Change the mover's kind in place
    Promote(PieceType),
}

/******************************************\
|==========================================|
|                 Movement                 |
|==========================================|
\******************************************/

/// # Movement specification
///
/// A declarative move rule: a template path near the origin, reflected into
/// up to four quadrants, walked by its move type, gated by conditions and
/// optionally carrying a follow-up. Pure rule data, shared by every piece of
/// a kind.
///
/// ## Quadrants
///
/// The template is written for the top right quadrant of its owner, "top"
/// being the owner's front. `mirror_x` also allows the back half and
/// `mirror_y` the left half. With `specific_quadrant` set only one quadrant is
/// used: the flags then select back and left instead of adding them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    template: Path,
    move_type: MoveType,
    mirror_x: bool,
    mirror_y: bool,
    specific_quadrant: bool,
    is_move: bool,
    is_attack: bool,
    conditions: Vec<Conditional>,
    follow_up: Option<FollowUp>,
}

impl Movement {
    fn new(template: Path, move_type: MoveType) -> Self {
        Self {
            template,
            move_type,
            mirror_x: false,
            mirror_y: false,
            specific_quadrant: false,
            is_move: true,
            is_attack: true,
            conditions: Vec::new(),
            follow_up: None,
        }
    }

    pub fn slide(template: Path) -> Self {
        Self::new(template, MoveType::Slide)
    }

    pub fn jump(template: Path) -> Self {
        Self::new(template, MoveType::Jump)
    }

    pub fn mirrored(mut self, x: bool, y: bool) -> Self {
        self.mirror_x = x;
        self.mirror_y = y;
        self
    }

    pub fn specific_quadrant(mut self) -> Self {
        self.specific_quadrant = true;
        self
    }

    /// Only reaches empty points
    pub fn move_only(mut self) -> Self {
        self.is_move = true;
        self.is_attack = false;
        self
    }

    /// Only reaches occupied points (and threatens empty ones)
    pub fn attack_only(mut self) -> Self {
        self.is_move = false;
        self.is_attack = true;
        self
    }

    pub fn when(mut self, condition: Conditional) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn then(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }

    #[inline]
    pub fn template(&self) -> &Path {
        &self.template
    }

    #[inline]
    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    #[inline]
    pub fn mirrors(&self) -> (bool, bool) {
        (self.mirror_x, self.mirror_y)
    }

    #[inline]
    pub fn is_specific_quadrant(&self) -> bool {
        self.specific_quadrant
    }

    #[inline]
    pub fn is_move(&self) -> bool {
        self.is_move
    }

    #[inline]
    pub fn is_attack(&self) -> bool {
        self.is_attack
    }

    #[inline]
    pub fn conditions(&self) -> &[Conditional] {
        &self.conditions
    }

    #[inline]
    pub fn follow_up(&self) -> Option<&FollowUp> {
        self.follow_up.as_ref()
    }

    /// Whether threats generated by this movement can change without its
    /// owner or the squares along its reach changing
    pub fn is_volatile(&self) -> bool {
        self.is_attack && self.conditions.iter().any(Conditional::is_volatile)
    }

    /// The `(sx, sy)` reflection signs used for `colour`
    pub fn quadrants(&self, colour: Colour) -> Vec<(i32, i32)> {
        let forward = colour.forward();

        if self.specific_quadrant {
            let sx = if self.mirror_y { -1 } else { 1 };
            let sy = if self.mirror_x { -forward } else { forward };
            return vec![(sx, sy)];
        }

        let xs: &[i32] = if self.mirror_y { &[1, -1] } else { &[1] };
        let ys: &[i32] = if self.mirror_x { &[1, -1] } else { &[1] };

        ys.iter()
            .flat_map(|&y| xs.iter().map(move |&x| (x, y * forward)))
            .collect()
    }

    /// Candidate destinations from `ctx.origin`.
    ///
    /// Conditions independent of the destination are checked once up front;
    /// the rest are checked per candidate with `ctx.destination` set.
    pub fn candidates(&self, ctx: &MoveContext, mode: Mode) -> Vec<Point> {
        if mode == Mode::Threats && !self.is_attack {
            return Vec::new();
        }

        let (per_point, up_front): (Vec<_>, Vec<_>) =
            self.conditions.iter().partition(|c| c.uses_destination());

        if !up_front.iter().all(|c| c.evaluate(ctx)) {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for point in self.walk(ctx, mode) {
            if candidates.contains(&point) {
                continue;
            }
            let at = ctx.at(point);
            if per_point.iter().all(|c| c.evaluate(&at)) {
                candidates.push(point);
            }
        }
        candidates
    }

    /// Raw reach along every quadrant, conditions ignored
    fn walk(&self, ctx: &MoveContext, mode: Mode) -> Vec<Point> {
        let bounds = ctx.board.bounds();
        let (ox, oy) = (ctx.origin.x() as i32, ctx.origin.y() as i32);
        let mut reach = Vec::new();

        for (sx, sy) in self.quadrants(ctx.colour) {
            for step in self.template.iter() {
                let x = ox + sx * step.x() as i32;
                let y = oy + sy * step.y() as i32;

                let Some(point) = bounds.contains_signed(x, y) else {
                    match self.move_type {
                        MoveType::Slide => break,
                        MoveType::Jump => continue,
                    }
                };

                match ctx.board.piece_at(point) {
                    Some(occupant) => {
                        let hostile = occupant.colour != ctx.colour;
                        if self.is_attack && (hostile || mode == Mode::Threats) {
                            reach.push(point);
                        }

                        // a threat passes through the opposing king so it
                        // cannot retreat along the line of attack
                        let see_through = mode == Mode::Threats && hostile && occupant.is_king();
                        if self.move_type == MoveType::Slide && !see_through {
                            break;
                        }
                    }
                    None => {
                        let reachable = match mode {
                            Mode::Moves => self.is_move,
                            Mode::Threats => self.is_attack,
                        };
                        if reachable {
                            reach.push(point);
                        }
                    }
                }
            }
        }

        reach
    }
}
