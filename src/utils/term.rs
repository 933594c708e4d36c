//! Shared terminal line input
//!
//! Both the presentation layer and the console speech adapter read lines
//! from stdin. They must share one buffered reader: two independent
//! BufReaders over the same stream would steal each other's buffered bytes.

use crate::error::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Cloneable handle to the single buffered stdin reader
#[derive(Clone)]
pub struct LineReader {
    inner: Arc<Mutex<BufReader<Stdin>>>,
}

impl LineReader {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()))),
        }
    }

    /// Reads the next line without its trailing newline; `None` on EOF
    pub async fn next_line(&self) -> Result<Option<String>> {
        let mut reader = self.inner.lock().await;
        let mut line = String::new();
        let read = reader.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}
