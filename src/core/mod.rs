// Core module exports

pub mod macros;
pub mod path;
pub mod piece;
pub mod plane;
pub mod point;
pub mod types;

// Re-export common types for easier access
pub use path::{Path, PathError};
pub use piece::{CustomPiece, EncodedPiece, KindToken, ParsePieceError, Piece, PieceId, PieceKind, PieceType};
pub use plane::Plane;
pub use point::{Bounds, BoundsError, Point, PointError};
pub use types::{Colour, Direction};
