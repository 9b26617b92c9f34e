pub mod classifier;
pub mod model;

pub use classifier::{block_distance, classify};
pub use model::{DistanceBucket, Thresholds};
