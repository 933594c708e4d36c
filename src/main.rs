mod adapters;
mod config;
mod console;
mod domain;
mod error;
mod ports;
mod session;
mod utils;

use adapters::services::HttpQuestionService;
use adapters::speech::{ConsoleSpeechInput, ConsoleSpeechOutput};
use clap::Parser;
use config::AppConfig;
use console::ConsoleApp;
use error::AppError;
use ports::SpeechInputPort;
use session::InterviewSession;
use std::sync::Arc;
use utils::term::LineReader;

/// Voice-driven interview practice for the terminal
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the question-generation service
    #[arg(long)]
    service_url: Option<String>,

    /// Interview domain the questions are drawn from
    #[arg(long)]
    domain: Option<String>,

    /// Abort a listen that captures nothing within this many seconds
    #[arg(long)]
    listen_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.service_url, cli.domain, cli.listen_timeout)?;
    log::info!(
        "Question service at {}, interview domain '{}'",
        config.service_url,
        config.domain
    );

    let questions = Arc::new(HttpQuestionService::new(
        &config.service_url,
        &config.domain,
        config.request_timeout(),
    ));

    let lines = LineReader::new();
    let speech_in = Arc::new(ConsoleSpeechInput::new(lines.clone()));
    let speech_out = Arc::new(ConsoleSpeechOutput::new());

    // The capability is probed once, before any round begins.
    if !speech_in.is_available() {
        return Err(AppError::CapabilityUnavailable(
            "speech input requires an interactive terminal".to_string(),
        )
        .into());
    }

    let (session, handle) =
        InterviewSession::new(questions, speech_in, speech_out, config.listen_timeout);
    let session_task = tokio::spawn(session.run());

    ConsoleApp::new(handle, lines).run().await?;

    session_task.await.ok();
    Ok(())
}
