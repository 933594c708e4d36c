//! Interview round state machine
//!
//! The next state is a pure function of (current state, received event);
//! the work that has to happen next comes back to the caller as `Effect`
//! values. Results from the capability ports carry the epoch that issued
//! them, so a result belonging to an earlier session can never mutate a
//! newer one.

use crate::domain::models::{Session, SessionState};
use crate::error::AppError;

/// Everything that can happen to a running interview
#[derive(Debug, Clone)]
pub enum Event {
    /// User intent: begin a fresh session (valid in every state)
    StartRequested,
    /// User intent: capture the answer to the current question
    ListenRequested,
    /// User intent: re-issue a failed question fetch
    RetryRequested,
    QuestionReceived { epoch: u64, question: String },
    QuestionFailed { epoch: u64, reason: String },
    UtteranceReceived { epoch: u64, text: String },
    RecognitionFailed { epoch: u64, reason: String },
    EvaluationReceived { epoch: u64, text: String },
    EvaluationFailed { epoch: u64, reason: String },
}

/// Work the runtime performs on behalf of the machine
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchQuestion { epoch: u64, history: Vec<String> },
    Speak(String),
    BeginCapture { epoch: u64 },
    FetchEvaluation { epoch: u64, answers: Vec<String> },
    ReportFetchFailure(String),
    ReportRecognitionFailure(String),
    PublishEvaluation(String),
    ReportEvaluationFailure(String),
}

/// Drives one interview attempt after another over a single owned `Session`
pub struct Machine {
    session: Session,
    epoch: u64,
    fetch_pending: bool,
}

impl Machine {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            epoch: 0,
            fetch_pending: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Applies one event and returns the effects the runtime must execute
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::StartRequested => self.on_start(),
            Event::ListenRequested => self.on_listen(),
            Event::RetryRequested => self.on_retry(),
            Event::QuestionReceived { epoch, question } => self.on_question(epoch, question),
            Event::QuestionFailed { epoch, reason } => self.on_question_failed(epoch, reason),
            Event::UtteranceReceived { epoch, text } => self.on_utterance(epoch, text),
            Event::RecognitionFailed { epoch, reason } => self.on_recognition_failed(epoch, reason),
            Event::EvaluationReceived { epoch, text } => self.on_evaluation(epoch, text),
            Event::EvaluationFailed { epoch, reason } => self.on_evaluation_failed(epoch, reason),
        }
    }

    /// A result from a previous session: log and drop it
    fn stale(&self, epoch: u64) -> bool {
        if epoch != self.epoch {
            log::debug!(
                "Dropping result from epoch {} (current epoch {})",
                epoch,
                self.epoch
            );
            return true;
        }
        false
    }

    fn on_start(&mut self) -> Vec<Effect> {
        self.epoch += 1;
        self.session = Session::new();
        self.session.state = SessionState::AwaitingQuestion;
        self.fetch_pending = true;
        log::info!("Session started (epoch {})", self.epoch);
        vec![Effect::FetchQuestion {
            epoch: self.epoch,
            history: Vec::new(),
        }]
    }

    fn on_listen(&mut self) -> Vec<Effect> {
        if self.session.state != SessionState::Presenting {
            log::warn!(
                "{}",
                AppError::InvalidState {
                    action: "listen",
                    state: self.session.state,
                }
            );
            return Vec::new();
        }
        self.session.state = SessionState::Listening;
        vec![Effect::BeginCapture { epoch: self.epoch }]
    }

    fn on_retry(&mut self) -> Vec<Effect> {
        // Only one outstanding question request at a time.
        if self.session.state != SessionState::AwaitingQuestion || self.fetch_pending {
            return Vec::new();
        }
        self.fetch_pending = true;
        vec![Effect::FetchQuestion {
            epoch: self.epoch,
            history: self.session.answers.clone(),
        }]
    }

    fn on_question(&mut self, epoch: u64, question: String) -> Vec<Effect> {
        if self.stale(epoch) {
            return Vec::new();
        }
        self.fetch_pending = false;
        if self.session.state != SessionState::AwaitingQuestion {
            log::warn!("Question arrived in state {}", self.session.state);
            return Vec::new();
        }
        self.session.current_question = Some(question.clone());
        self.session.state = SessionState::Presenting;
        vec![Effect::Speak(question)]
    }

    fn on_question_failed(&mut self, epoch: u64, reason: String) -> Vec<Effect> {
        if self.stale(epoch) {
            return Vec::new();
        }
        self.fetch_pending = false;
        // The session stays in AwaitingQuestion with answers and score
        // untouched; the same round can be retried.
        vec![Effect::ReportFetchFailure(reason)]
    }

    fn on_utterance(&mut self, epoch: u64, text: String) -> Vec<Effect> {
        if self.stale(epoch) {
            return Vec::new();
        }
        if self.session.state != SessionState::Listening {
            log::warn!("Utterance arrived in state {}", self.session.state);
            return Vec::new();
        }
        // The completion check uses the post-append count: the fifth answer
        // scores and finalizes in the same transition, with no sixth fetch.
        if self.session.record_answer(text) {
            self.session.finish();
            log::info!("Interview finished with score {}", self.session.score);
            return vec![Effect::FetchEvaluation {
                epoch: self.epoch,
                answers: self.session.answers.clone(),
            }];
        }
        self.session.state = SessionState::AwaitingQuestion;
        self.fetch_pending = true;
        vec![Effect::FetchQuestion {
            epoch: self.epoch,
            history: self.session.answers.clone(),
        }]
    }

    fn on_recognition_failed(&mut self, epoch: u64, reason: String) -> Vec<Effect> {
        if self.stale(epoch) {
            return Vec::new();
        }
        if self.session.state == SessionState::Listening {
            // Back to the question so listen can be re-issued; nothing is
            // recorded for a failed capture.
            self.session.state = SessionState::Presenting;
        }
        vec![Effect::ReportRecognitionFailure(reason)]
    }

    fn on_evaluation(&mut self, epoch: u64, text: String) -> Vec<Effect> {
        if self.stale(epoch) {
            return Vec::new();
        }
        vec![Effect::PublishEvaluation(text)]
    }

    fn on_evaluation_failed(&mut self, epoch: u64, reason: String) -> Vec<Effect> {
        if self.stale(epoch) {
            return Vec::new();
        }
        // The score summary stands on its own; the evaluation is extra.
        log::warn!("Evaluation failed: {}", reason);
        vec![Effect::ReportEvaluationFailure(reason)]
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
