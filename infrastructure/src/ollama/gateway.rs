//! Ollama Chat Gateway implementation

use crate::ollama::decoder::LineDecoder;
use crate::ollama::error::{OllamaError, Result};
use crate::ollama::protocol::{ChatRecord, ChatRequestBody, ErrorBody};
use async_trait::async_trait;
use chat_application::{ChatGateway, ChatRequest, GatewayError, StreamHandle};
use chat_domain::StreamEvent;
use futures::StreamExt;
use reqwest::{Client, Response, StatusCode};
use std::ops::ControlFlow;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Events buffered between the body reader task and the controller
const EVENT_BUFFER: usize = 64;

/// Chat gateway for a local Ollama server
pub struct OllamaChatGateway {
    client: Client,
    base_url: String,
    chat_url: String,
}

impl OllamaChatGateway {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";

    /// Create a gateway for the server at `base_url` (e.g. `http://localhost:11434`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a gateway with a preconfigured HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(OllamaError::InvalidBaseUrl(base_url));
        }

        let chat_url = format!("{}/api/chat", base_url);
        info!("OllamaChatGateway initialized for {}", chat_url);

        Ok(Self {
            client,
            base_url,
            chat_url,
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    async fn open(&self, request: &ChatRequest) -> Result<Response> {
        let body = ChatRequestBody::streaming(request);
        debug!(
            "POST {} (model {}, {} messages)",
            self.chat_url,
            body.model,
            body.messages.len()
        );

        let response = self.client.post(&self.chat_url).json(&body).send().await?;
        Ok(response)
    }
}

#[async_trait]
impl ChatGateway for OllamaChatGateway {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn stream_chat(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> std::result::Result<StreamHandle, GatewayError> {
        let response = self.open(&request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(read_body(response, tx, cancel));
        Ok(StreamHandle::new(rx))
    }
}

/// Map a non-2xx response to a gateway error. 404 from `/api/chat` means
/// the requested model is not available locally.
fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let detail = ErrorBody::parse(body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "unknown status".to_string());

    warn!("Ollama responded {}: {}", status, detail);

    if status == StatusCode::NOT_FOUND {
        GatewayError::ModelNotFound(detail)
    } else {
        GatewayError::HttpStatus {
            status: status.as_u16(),
            detail,
        }
    }
}

/// Read the response body, forwarding decoded events until the completion
/// signal, end of body, or cancellation. Dropping `tx` closes the stream.
async fn read_body(
    response: Response,
    tx: mpsc::Sender<StreamEvent>,
    cancel: CancellationToken,
) {
    let mut body = response.bytes_stream();
    let mut decoder = LineDecoder::new();

    loop {
        let chunk = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Response body dropped after cancellation");
                return;
            }
            chunk = body.next() => chunk,
        };

        match chunk {
            Some(Ok(bytes)) => {
                for line in decoder.push(&bytes) {
                    if forward_line(&line, &tx).await.is_break() {
                        return;
                    }
                }
            }
            Some(Err(e)) => {
                let _ = tx
                    .send(StreamEvent::Error(format!("Failed to read response: {}", e)))
                    .await;
                return;
            }
            None => break,
        }
    }

    if let Some(line) = decoder.finish() {
        let _ = forward_line(&line, &tx).await;
    }
    debug!("Response body ended");
}

/// Decode one record and forward its events. Breaks after a terminal event
/// or when the receiver has gone away.
async fn forward_line(line: &[u8], tx: &mpsc::Sender<StreamEvent>) -> ControlFlow<()> {
    let record = match serde_json::from_slice::<ChatRecord>(line) {
        Ok(record) => record,
        Err(e) => {
            debug!(
                "Skipping malformed stream record ({}): {}",
                e,
                String::from_utf8_lossy(line)
            );
            return ControlFlow::Continue(());
        }
    };

    for event in record.into_events() {
        let terminal = event.is_terminal();
        if tx.send(event).await.is_err() || terminal {
            return ControlFlow::Break(());
        }
    }
    ControlFlow::Continue(())
}
