/// Port trait definitions (interfaces)
///
/// These traits define the contracts for adapters to implement.
/// Following the ports-and-adapters (hexagonal) architecture pattern.
pub mod questions;
pub mod speech_input;
pub mod speech_output;

#[cfg(test)]
pub mod mocks;

pub use questions::QuestionServicePort;
pub use speech_input::SpeechInputPort;
pub use speech_output::SpeechOutputPort;
