//! Runtime configuration
//!
//! Precedence: CLI flag, then environment variable, then default. The
//! defaults target a question service running locally.

use crate::error::{AppError, Result};
use std::env;
use std::time::Duration;

const ENV_SERVICE_URL: &str = "INTERVIEW_SERVICE_URL";
const ENV_DOMAIN: &str = "INTERVIEW_DOMAIN";
const ENV_LISTEN_TIMEOUT: &str = "INTERVIEW_LISTEN_TIMEOUT_SECS";

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_DOMAIN: &str = "software engineering";

/// Bound on each question-service call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the question-generation service
    pub service_url: String,
    /// Interview domain the questions are drawn from; static per run,
    /// attached to every service request
    pub domain: String,
    /// Bound on each recognition capture; `None` waits for the speaker
    pub listen_timeout: Option<Duration>,
}

impl AppConfig {
    /// Resolves configuration from optional CLI overrides and the environment
    pub fn resolve(
        service_url: Option<String>,
        domain: Option<String>,
        listen_timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let service_url = service_url
            .or_else(|| env::var(ENV_SERVICE_URL).ok())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        let domain = domain
            .or_else(|| env::var(ENV_DOMAIN).ok())
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string());

        let listen_timeout_secs = match listen_timeout_secs {
            Some(secs) => Some(secs),
            None => match env::var(ENV_LISTEN_TIMEOUT) {
                Ok(raw) => Some(raw.parse::<u64>().map_err(|_| {
                    AppError::Config(format!(
                        "{} must be a number of seconds, got '{}'",
                        ENV_LISTEN_TIMEOUT, raw
                    ))
                })?),
                Err(_) => None,
            },
        };

        if service_url.trim().is_empty() {
            return Err(AppError::Config(
                "service URL must not be empty".to_string(),
            ));
        }

        Ok(Self {
            service_url,
            domain,
            listen_timeout: listen_timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        REQUEST_TIMEOUT
    }
}
