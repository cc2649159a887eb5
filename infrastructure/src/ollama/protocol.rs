//! Wire format of Ollama's `/api/chat` endpoint.
//!
//! Request:
//!
//! ```json
//! {"model": "qwen3:14b", "messages": [{"role": "user", "content": "hi"}], "stream": true}
//! ```
//!
//! Response body: one JSON object per line,
//! `{"message": {"content": "..."}, "done": false, ...}`, ending with a record
//! whose `done` is `true`. Failures after the headers are reported as
//! `{"error": "..."}`.

use chat_application::ChatRequest;
use chat_domain::{StreamEvent, Turn};
use serde::{Deserialize, Serialize};

/// Request body for a streaming chat call
#[derive(Debug, Serialize)]
pub struct ChatRequestBody<'a> {
    pub model: &'a str,
    pub messages: &'a [Turn],
    pub stream: bool,
}

impl<'a> ChatRequestBody<'a> {
    pub fn streaming(request: &'a ChatRequest) -> Self {
        Self {
            model: request.model.as_str(),
            messages: &request.messages,
            stream: true,
        }
    }
}

/// `message` object inside a stream record
#[derive(Debug, Default, Deserialize)]
pub struct RecordMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// One line of the response body. Unknown fields (timings, token counts) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRecord {
    #[serde(default)]
    pub message: Option<RecordMessage>,
    #[serde(default)]
    pub done: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatRecord {
    /// Translate the record into stream events, in the order they apply.
    ///
    /// A record may carry both a final delta and the completion signal.
    pub fn into_events(self) -> Vec<StreamEvent> {
        if let Some(error) = self.error {
            return vec![StreamEvent::Error(error)];
        }

        let mut events = Vec::with_capacity(2);
        if let Some(content) = self.message.and_then(|m| m.content)
            && !content.is_empty()
        {
            events.push(StreamEvent::Delta(content));
        }
        if self.done.unwrap_or(false) {
            events.push(StreamEvent::Completed);
        }
        events
    }
}

/// Body of a non-2xx response, e.g. `{"error": "model 'x' not found"}`
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Extract the server's error text, if the body has one
    pub fn parse(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|e| !e.trim().is_empty())
    }
}
