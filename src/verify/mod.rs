pub mod model;
pub mod pipeline;

pub use model::{Outcome, RefetchPlan, VerificationReport, VerifyMode, VerifyParams, VerifyRequest};
pub use pipeline::{BlockHashSource, Verifier};

/// Maximum number of comparisons in one verification (initial + one refetch).
pub const MAX_ATTEMPTS: u8 = 2;
