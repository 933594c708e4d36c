/// Domain layer - core business models
///
/// These models are platform-agnostic and represent core business entities.
pub mod models;

pub use models::{Session, SessionSnapshot, SessionState, POINTS_PER_ANSWER, TOTAL_ROUNDS};
