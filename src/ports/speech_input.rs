/// Speech input port trait
///
/// A capability that converts spoken audio into recognized text, one
/// utterance per activation.
use crate::error::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Port trait for speech recognition capabilities
#[async_trait]
#[cfg_attr(test, automock)]
pub trait SpeechInputPort: Send + Sync {
    /// Captures at most one utterance, then deactivates itself. Resolves
    /// with the recognized text, or `AppError::Recognition` when nothing
    /// was captured.
    async fn capture_utterance(&self) -> Result<String>;

    /// Whether the capability exists in this environment. Probed once at
    /// startup, outside the round loop; absence blocks the session from
    /// starting at all.
    fn is_available(&self) -> bool;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
