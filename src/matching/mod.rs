pub mod finder;
pub mod model;

pub use finder::find_matches;
pub use model::{MatchPolicy, MatchResult, TokenMatch};
