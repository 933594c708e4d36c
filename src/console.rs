//! Terminal presentation layer
//!
//! A view over the session's published events: renders loading, the
//! current question, the listening indicator, and the final score, and
//! relays user intents back in. Fetch and recognition failures get their
//! own retry affordances, distinct from the normal indicators.

use crate::domain::{SessionState, SessionSnapshot, POINTS_PER_ANSWER, TOTAL_ROUNDS};
use crate::error::Result;
use crate::session::{SessionCommand, SessionEvent, SessionHandle};
use crate::utils::term::LineReader;

pub struct ConsoleApp {
    handle: SessionHandle,
    lines: LineReader,
}

impl ConsoleApp {
    pub fn new(handle: SessionHandle, lines: LineReader) -> Self {
        Self { handle, lines }
    }

    /// Runs the interview frontend until the user quits
    pub async fn run(mut self) -> Result<()> {
        self.intro();
        if !self
            .wait_for_enter("Press Enter to start the interview (q to quit)")
            .await?
        {
            return self.shutdown().await;
        }
        self.handle.send(SessionCommand::Start).await?;

        while let Some(event) = self.handle.next_event().await {
            let keep_going = match event {
                SessionEvent::StateChanged(snapshot) => self.render(&snapshot).await?,
                SessionEvent::QuestionFailed { message } => {
                    println!("\n  Could not fetch the next question: {}", message);
                    if self
                        .wait_for_enter("Press Enter to retry (q to quit)")
                        .await?
                    {
                        self.handle.send(SessionCommand::Retry).await?;
                        true
                    } else {
                        false
                    }
                }
                SessionEvent::RecognitionFailed { message } => {
                    println!("\n  Didn't catch that ({})", message);
                    true
                }
                SessionEvent::EvaluationReady(text) => {
                    println!("\n  Feedback:");
                    println!("  {}", text);
                    self.offer_restart().await?
                }
                SessionEvent::EvaluationFailed { .. } => {
                    println!("\n  (No feedback available for this session.)");
                    self.offer_restart().await?
                }
            };
            if !keep_going {
                break;
            }
        }

        self.shutdown().await
    }

    async fn render(&mut self, snapshot: &SessionSnapshot) -> Result<bool> {
        match snapshot.state {
            SessionState::NotStarted => {}
            SessionState::AwaitingQuestion => {
                if snapshot.loading() {
                    println!(
                        "\n  Thinking of question {} of {}...",
                        snapshot.rounds_completed + 1,
                        TOTAL_ROUNDS
                    );
                }
            }
            SessionState::Presenting => {
                if let Some(question) = &snapshot.current_question {
                    println!(
                        "\n  Question {} of {}: {}",
                        snapshot.rounds_completed + 1,
                        TOTAL_ROUNDS,
                        question
                    );
                }
                if !self
                    .wait_for_enter("Press Enter when you are ready to answer (q to quit)")
                    .await?
                {
                    return Ok(false);
                }
                self.handle.send(SessionCommand::Listen).await?;
            }
            SessionState::Listening => {
                println!("  Listening... speak your answer, then press Enter.");
            }
            SessionState::Finished => {
                println!("\n  Interview complete!");
                println!(
                    "  Score: {} / {}",
                    snapshot.score,
                    POINTS_PER_ANSWER * TOTAL_ROUNDS as u32
                );
            }
        }
        Ok(true)
    }

    async fn offer_restart(&mut self) -> Result<bool> {
        if self
            .wait_for_enter("\n  Press Enter for another interview (q to quit)")
            .await?
        {
            self.handle.send(SessionCommand::Start).await?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Prompts and waits for a line; false means the user quit (or EOF)
    async fn wait_for_enter(&self, prompt: &str) -> Result<bool> {
        println!("  {}", prompt);
        match self.lines.next_line().await? {
            Some(line) if line.trim().eq_ignore_ascii_case("q") => Ok(false),
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    fn intro(&self) {
        println!("=========================================");
        println!("          AI Interview Coach");
        println!("=========================================");
        println!(
            "  The coach asks {} questions. Answer each one by voice.",
            TOTAL_ROUNDS
        );
    }

    async fn shutdown(&self) -> Result<()> {
        // The task may already be gone; shutting down twice is harmless.
        let _ = self.handle.send(SessionCommand::Shutdown).await;
        Ok(())
    }
}
