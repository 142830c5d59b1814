use crate::core::*;
use crate::game::{Game, GameStatus};

/// Static score of a position, positive favours white
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Eval(pub i32);

crate::impl_ari_ops!(Eval);

impl Eval {
    pub const ZERO: Eval = Eval(0);
    pub const DRAW: Eval = Eval(0);

    /// Score of a won game, beyond any material sum
    pub const WIN: Eval = Eval(100_000);

    pub const INFINITY: Eval = Eval(1_000_000);

    /// Weight of one threatened point
    pub const MOBILITY: Eval = Eval(4);

    pub fn abs(&self) -> Eval {
        Eval(self.0.abs())
    }

    /// Whether the score reports a decided game
    pub fn is_win(&self) -> bool {
        self.abs() >= Eval::WIN
    }
}

impl std::ops::Neg for Eval {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Eval(-self.0)
    }
}

impl std::fmt::Display for Eval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self >= Eval::WIN {
            write!(f, "white wins")
        } else if *self <= -Eval::WIN {
            write!(f, "black wins")
        } else {
            write!(f, "cp {}", self.0)
        }
    }
}

impl Game {
    /// Material plus mobility, from white's point of view. Decided games
    /// score [`Eval::WIN`] for the winner and zero for a stalemate.
    pub fn evaluate_state(&self) -> Eval {
        match self.status() {
            GameStatus::WhiteWin => return Eval::WIN,
            GameStatus::BlackWin => return -Eval::WIN,
            GameStatus::Stalemate => return Eval::DRAW,
            _ => {}
        }

        let mut score = Eval::ZERO;
        for colour in Colour::iter() {
            let material: i32 = self
                .pieces()
                .filter(|piece| piece.colour == colour)
                .map(|piece| piece.kind.value())
                .sum();
            let mobility = Eval(self.threats(colour).mobility() as i32) * Eval::MOBILITY;
            let side = Eval(material) + mobility;

            match colour {
                Colour::White => score += side,
                Colour::Black => score -= side,
            }
        }

        score
    }
}
