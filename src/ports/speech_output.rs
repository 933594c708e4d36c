/// Speech output port trait
///
/// A capability that renders text as spoken audio.
use crate::error::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Port trait for speech synthesis capabilities
#[async_trait]
#[cfg_attr(test, automock)]
pub trait SpeechOutputPort: Send + Sync {
    /// Renders the text as speech. Implementations cancel any in-flight
    /// utterance before starting this one, so at most one utterance plays
    /// at a time. Failure is non-fatal: the session carries on accepting
    /// answers whether or not playback succeeded.
    async fn speak(&self, text: &str) -> Result<()>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
