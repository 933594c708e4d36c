//! Interview session orchestration
//!
//! `InterviewSession` owns the state machine and the three capability
//! ports. It runs as a single task: user intents arrive on a command
//! channel, port results on an internal outcome channel, and the
//! presentation layer receives a snapshot after every transition. All
//! session mutation happens on this one task, so no locking is needed.

mod machine;

use crate::domain::{SessionSnapshot, TOTAL_ROUNDS};
use crate::error::{AppError, Result};
use crate::ports::{QuestionServicePort, SpeechInputPort, SpeechOutputPort};
use machine::{Effect, Event, Machine};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// User intents relayed by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Begin a fresh interview, discarding any previous one
    Start,
    /// Capture the answer to the current question
    Listen,
    /// Re-issue a failed question fetch
    Retry,
    /// Stop the session task
    Shutdown,
}

/// What the presentation layer observes
#[derive(Debug, Clone)]
pub enum SessionEvent {
    StateChanged(SessionSnapshot),
    QuestionFailed { message: String },
    RecognitionFailed { message: String },
    EvaluationReady(String),
    EvaluationFailed { message: String },
}

/// Handle for controlling the session from the presentation layer
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionCommand>,
    event_rx: mpsc::Receiver<SessionEvent>,
}

impl SessionHandle {
    /// Sends a user intent to the session task
    pub async fn send(&self, command: SessionCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| AppError::Config("session task is not running".to_string()))
    }

    /// Receives the next session event; `None` once the task has stopped
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.event_rx.recv().await
    }
}

/// Coordinates the question service and the speech ports for one candidate
pub struct InterviewSession {
    machine: Machine,
    questions: Arc<dyn QuestionServicePort>,
    speech_in: Arc<dyn SpeechInputPort>,
    speech_out: Arc<dyn SpeechOutputPort>,
    /// Bound on each recognition capture; `None` waits indefinitely
    listen_timeout: Option<Duration>,
    command_rx: mpsc::Receiver<SessionCommand>,
    outcome_tx: mpsc::Sender<Event>,
    outcome_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<SessionEvent>,
}

impl InterviewSession {
    /// Creates the session task and the handle the presentation layer
    /// drives it with
    pub fn new(
        questions: Arc<dyn QuestionServicePort>,
        speech_in: Arc<dyn SpeechInputPort>,
        speech_out: Arc<dyn SpeechOutputPort>,
        listen_timeout: Option<Duration>,
    ) -> (Self, SessionHandle) {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(64);
        let (outcome_tx, outcome_rx) = mpsc::channel(16);

        let session = Self {
            machine: Machine::new(),
            questions,
            speech_in,
            speech_out,
            listen_timeout,
            command_rx,
            outcome_tx,
            outcome_rx,
            event_tx,
        };

        let handle = SessionHandle {
            command_tx,
            event_rx,
        };

        (session, handle)
    }

    /// Drives the session until `Shutdown` or the presentation hangs up
    pub async fn run(mut self) {
        log::info!(
            "Interview session started (question service: {})",
            self.questions.provider_name()
        );
        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(SessionCommand::Start) => self.dispatch(Event::StartRequested).await,
                    Some(SessionCommand::Listen) => self.dispatch(Event::ListenRequested).await,
                    Some(SessionCommand::Retry) => self.dispatch(Event::RetryRequested).await,
                    Some(SessionCommand::Shutdown) | None => break,
                },
                Some(outcome) = self.outcome_rx.recv() => self.dispatch(outcome).await,
            }
        }
        log::info!("Interview session stopped");
    }

    /// Applies one event, runs its effects, then publishes the new snapshot
    async fn dispatch(&mut self, event: Event) {
        let effects = self.machine.apply(event);
        for effect in effects {
            self.perform(effect).await;
        }
        self.publish(SessionEvent::StateChanged(
            self.machine.session().snapshot(),
        ))
        .await;
    }

    async fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::FetchQuestion { epoch, history } => {
                log::info!(
                    "Requesting question {} of {}",
                    history.len() + 1,
                    TOTAL_ROUNDS
                );
                let service = Arc::clone(&self.questions);
                let outcome_tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let event = match service.next_question(&history).await {
                        Ok(question) => Event::QuestionReceived { epoch, question },
                        Err(e) => Event::QuestionFailed {
                            epoch,
                            reason: e.to_string(),
                        },
                    };
                    let _ = outcome_tx.send(event).await;
                });
            }
            Effect::BeginCapture { epoch } => {
                let input = Arc::clone(&self.speech_in);
                let outcome_tx = self.outcome_tx.clone();
                let limit = self.listen_timeout;
                tokio::spawn(async move {
                    let captured = match limit {
                        Some(limit) => {
                            match tokio::time::timeout(limit, input.capture_utterance()).await {
                                Ok(result) => result,
                                Err(_) => Err(AppError::Recognition(format!(
                                    "no speech within {} seconds",
                                    limit.as_secs()
                                ))),
                            }
                        }
                        None => input.capture_utterance().await,
                    };
                    let event = match captured {
                        Ok(text) => Event::UtteranceReceived { epoch, text },
                        Err(e) => Event::RecognitionFailed {
                            epoch,
                            reason: e.to_string(),
                        },
                    };
                    let _ = outcome_tx.send(event).await;
                });
            }
            Effect::Speak(text) => {
                let output = Arc::clone(&self.speech_out);
                tokio::spawn(async move {
                    // Playback failure never blocks the round.
                    if let Err(e) = output.speak(&text).await {
                        log::warn!("Speech output failed: {}", e);
                    }
                });
            }
            Effect::FetchEvaluation { epoch, answers } => {
                let service = Arc::clone(&self.questions);
                let outcome_tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let event = match service.evaluate(&answers).await {
                        Ok(text) => Event::EvaluationReceived { epoch, text },
                        Err(e) => Event::EvaluationFailed {
                            epoch,
                            reason: e.to_string(),
                        },
                    };
                    let _ = outcome_tx.send(event).await;
                });
            }
            Effect::ReportFetchFailure(message) => {
                log::error!("Question fetch failed: {}", message);
                self.publish(SessionEvent::QuestionFailed { message }).await;
            }
            Effect::ReportRecognitionFailure(message) => {
                log::warn!("Recognition failed: {}", message);
                self.publish(SessionEvent::RecognitionFailed { message })
                    .await;
            }
            Effect::PublishEvaluation(text) => {
                self.publish(SessionEvent::EvaluationReady(text)).await;
            }
            Effect::ReportEvaluationFailure(message) => {
                self.publish(SessionEvent::EvaluationFailed { message })
                    .await;
            }
        }
    }

    async fn publish(&self, event: SessionEvent) {
        if self.event_tx.send(event).await.is_err() {
            log::debug!("Presentation side hung up");
        }
    }
}
