pub mod model;
pub mod tokenizer;

pub use model::{TokenMode, TokenSet};
pub use tokenizer::{tokenize, validate_token_size};

/// Smallest token size accepted from user-entered form fields.
pub const MIN_TOKEN_SIZE: usize = 3;

/// Largest token size accepted from user-entered form fields (a whole hash).
pub const MAX_TOKEN_SIZE: usize = 64;
