//! Rating domain: requests, per-ship statistics, the expected-values
//! baseline, and the scoring transform that combines them.

pub mod baseline;
pub mod player;
pub mod rating;
pub mod score;
pub mod stats;

pub use baseline::{Baseline, BaselineEntry};
pub use player::{PlayerRequest, RequestBatch};
pub use rating::{Rating, RatingFailure};
pub use score::{score, ScoreBreakdown};
pub use stats::ShipStats;
