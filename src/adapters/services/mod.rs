/// Remote service adapters
pub mod questions;

pub use questions::HttpQuestionService;
