//! Element to component matching.

pub mod category;
mod mapper;
mod score;
pub mod stats;
mod suggest;

pub use category::{Categories, Category};
pub use mapper::{map, Mapper};
pub use score::{breakdown, score, ScoreBreakdown, MAX_SCORE};
pub use stats::{recommendations, ConfidenceDistribution, MappingStatistics, Recommendation};
