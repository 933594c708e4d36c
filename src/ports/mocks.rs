//! Scripted doubles for session tests
//!
//! Hand-rolled implementations of the port traits that record every call
//! and replay pre-queued outcomes, so multi-round flows can be driven
//! deterministically without a network or a microphone.

use crate::error::{AppError, Result};
use crate::ports::{QuestionServicePort, SpeechInputPort, SpeechOutputPort};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type Scripted = std::result::Result<String, String>;

/// Question-service double: records every history it is called with and
/// pops pre-queued outcomes. Calls can be held back behind a gate so tests
/// can interleave a restart with an in-flight fetch.
#[derive(Clone, Default)]
pub struct ScriptedQuestionService {
    questions: Arc<Mutex<VecDeque<Scripted>>>,
    evaluations: Arc<Mutex<VecDeque<Scripted>>>,
    histories: Arc<Mutex<Vec<Vec<String>>>>,
    gates: Arc<Mutex<VecDeque<Arc<Notify>>>>,
}

impl ScriptedQuestionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_question(&self, question: &str) {
        self.questions
            .lock()
            .unwrap()
            .push_back(Ok(question.to_string()));
    }

    pub fn push_question_failure(&self, reason: &str) {
        self.questions
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
    }

    pub fn push_evaluation(&self, text: &str) {
        self.evaluations
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
    }

    pub fn push_evaluation_failure(&self, reason: &str) {
        self.evaluations
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
    }

    /// Holds the next `next_question` call until the returned gate is
    /// notified. Gates apply in call order.
    pub fn hold_next_call(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().push_back(Arc::clone(&gate));
        gate
    }

    /// Every answer history `next_question` has been called with, in order
    pub fn histories(&self) -> Vec<Vec<String>> {
        self.histories.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionServicePort for ScriptedQuestionService {
    async fn next_question(&self, answers: &[String]) -> Result<String> {
        self.histories.lock().unwrap().push(answers.to_vec());
        // Claim the scripted outcome before waiting, so outcomes pair with
        // calls in call order even when gates release out of order.
        let planned = self.questions.lock().unwrap().pop_front();
        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match planned {
            Some(Ok(question)) => Ok(question),
            Some(Err(reason)) => Err(AppError::QuestionFetch(reason)),
            None => Ok(format!("scripted question {}", answers.len() + 1)),
        }
    }

    async fn evaluate(&self, answers: &[String]) -> Result<String> {
        match self.evaluations.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(AppError::QuestionFetch(reason)),
            None => Ok(format!("scripted evaluation of {} answers", answers.len())),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Speech-input double replaying queued utterances and failures
#[derive(Clone, Default)]
pub struct ScriptedSpeechInput {
    utterances: Arc<Mutex<VecDeque<Scripted>>>,
    activations: Arc<Mutex<usize>>,
}

impl ScriptedSpeechInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_utterance(&self, text: &str) {
        self.utterances
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
    }

    pub fn push_failure(&self, reason: &str) {
        self.utterances
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
    }

    /// How many times the capability was activated
    pub fn activations(&self) -> usize {
        *self.activations.lock().unwrap()
    }
}

#[async_trait]
impl SpeechInputPort for ScriptedSpeechInput {
    async fn capture_utterance(&self) -> Result<String> {
        *self.activations.lock().unwrap() += 1;
        match self.utterances.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(AppError::Recognition(reason)),
            None => Err(AppError::Recognition("script exhausted".to_string())),
        }
    }

    fn is_available(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Speech-output double that records everything it was asked to say
#[derive(Clone, Default)]
pub struct RecordingSpeechOutput {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingSpeechOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechOutputPort for RecordingSpeechOutput {
    async fn speak(&self, text: &str) -> Result<()> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}
