/// Domain models for Interview Coach
///
/// These models represent core business entities and are platform-agnostic.
use serde::{Deserialize, Serialize};

/// Number of question/answer rounds in one interview attempt
pub const TOTAL_ROUNDS: usize = 5;

/// Points awarded for each recorded answer
pub const POINTS_PER_ANSWER: u32 = 20;

/// Lifecycle state of an interview session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    AwaitingQuestion,
    Presenting,
    Listening,
    Finished,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not_started"),
            SessionState::AwaitingQuestion => write!(f, "awaiting_question"),
            SessionState::Presenting => write!(f, "presenting"),
            SessionState::Listening => write!(f, "listening"),
            SessionState::Finished => write!(f, "finished"),
        }
    }
}

/// Represents one interview attempt, from start to finish or abandonment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub state: SessionState,
    /// Recognized utterances in answer order, append-only
    pub answers: Vec<String>,
    /// The most recently received question, absent before the first round
    pub current_question: Option<String>,
    pub score: u32,
    pub started_at: i64, // Unix timestamp
    pub finished_at: Option<i64>,
}

impl Session {
    /// Creates a fresh session with nothing answered yet
    pub fn new() -> Self {
        Self {
            state: SessionState::NotStarted,
            answers: Vec::new(),
            current_question: None,
            score: 0,
            started_at: chrono::Utc::now().timestamp(),
            finished_at: None,
        }
    }

    /// Completed rounds so far
    pub fn rounds_completed(&self) -> usize {
        self.answers.len()
    }

    /// Records a recognized answer and awards its points.
    ///
    /// Returns true when this answer completed the final round.
    pub fn record_answer(&mut self, text: String) -> bool {
        self.answers.push(text);
        self.score += POINTS_PER_ANSWER;
        self.answers.len() >= TOTAL_ROUNDS
    }

    /// Marks the session as finished
    pub fn finish(&mut self) {
        self.state = SessionState::Finished;
        self.finished_at = Some(chrono::Utc::now().timestamp());
    }

    /// Read-only view handed to the presentation layer
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            current_question: self.current_question.clone(),
            score: self.score,
            rounds_completed: self.rounds_completed(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// What the presentation layer sees after every transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub current_question: Option<String>,
    pub score: u32,
    pub rounds_completed: usize,
}

impl SessionSnapshot {
    /// True while the next question is being fetched
    pub fn loading(&self) -> bool {
        self.state == SessionState::AwaitingQuestion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.state, SessionState::NotStarted);
        assert!(session.answers.is_empty());
        assert!(session.current_question.is_none());
        assert_eq!(session.score, 0);
        assert!(session.finished_at.is_none());
    }

    #[test]
    fn test_record_answer_awards_points() {
        let mut session = Session::new();
        assert!(!session.record_answer("first".to_string()));
        assert_eq!(session.score, POINTS_PER_ANSWER);
        assert_eq!(session.rounds_completed(), 1);
    }

    #[test]
    fn test_fifth_answer_completes() {
        let mut session = Session::new();
        for i in 1..TOTAL_ROUNDS {
            assert!(!session.record_answer(format!("answer {}", i)));
        }
        assert!(session.record_answer("last answer".to_string()));
        assert_eq!(session.score, POINTS_PER_ANSWER * TOTAL_ROUNDS as u32);
    }

    #[test]
    fn test_snapshot_loading_flag() {
        let mut session = Session::new();
        assert!(!session.snapshot().loading());
        session.state = SessionState::AwaitingQuestion;
        assert!(session.snapshot().loading());
    }
}
