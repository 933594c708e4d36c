/// Speech capability adapters
pub mod console;

pub use console::{ConsoleSpeechInput, ConsoleSpeechOutput};
