/// # Module: `utils`
///
/// Tools for exercising the rules engine as a whole.
///
/// ## Submodules
///
/// - `perft`: counts the leaves of the legal action tree through the public
///   commit and undo surface of [`crate::game::Game`].
pub mod perft;

pub use perft::{perft, perft_test};
