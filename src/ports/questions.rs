/// Question service port trait
///
/// Defines the interface for the remote question-generation service.
/// Implementations: HTTP backend, scripted test doubles.
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for the question-generation service
#[async_trait]
pub trait QuestionServicePort: Send + Sync {
    /// Requests the next interview question for the answers given so far,
    /// in order. Exactly one outbound call per invocation; no caching.
    ///
    /// The returned question is non-empty; a transport failure or a
    /// malformed payload surfaces as `AppError::QuestionFetch`.
    async fn next_question(&self, answers: &[String]) -> Result<String>;

    /// Requests a textual evaluation of the complete answer set. Called
    /// once, after the final round.
    async fn evaluate(&self, answers: &[String]) -> Result<String>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
