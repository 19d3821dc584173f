//! In-memory gateway for tests. Counts calls and records the last prompt.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmError, LlmGateway, RawModelOutput};

enum StubReply {
    Text(String),
    Blocked(String),
    Unavailable,
}

pub struct StubGateway {
    reply: StubReply,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubGateway {
    fn with_reply(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(StubReply::Text(text.into()))
    }

    pub fn blocking(reason: impl Into<String>) -> Self {
        Self::with_reply(StubReply::Blocked(reason.into()))
    }

    pub fn unavailable() -> Self {
        Self::with_reply(StubReply::Unavailable)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for StubGateway {
    async fn generate(&self, prompt: &str) -> Result<RawModelOutput, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        match &self.reply {
            StubReply::Text(text) => Ok(RawModelOutput::text(text.clone())),
            StubReply::Blocked(reason) => Ok(RawModelOutput::blocked(reason.clone())),
            StubReply::Unavailable => Err(LlmError::Api {
                status: 503,
                message: "The model is overloaded. Please try again later.".to_string(),
            }),
        }
    }
}
