//! Stream controller use case
//!
//! Owns the conversation and the single in-flight response. The state
//! machine is small:
//!
//! | From      | Event          | To        | Side effect                          |
//! |-----------|----------------|-----------|--------------------------------------|
//! | idle      | `send_turn`    | streaming | user turn appended, request issued   |
//! | streaming | `done` record  | idle      | assistant turn appended              |
//! | streaming | `cancel`       | idle      | partial text discarded, notice       |
//! | streaming | failure        | idle      | partial text discarded, standing error |
//! | streaming | body ends      | idle      | [`UnfinishedStreamPolicy`] applied   |
//!
//! All mutable state sits behind one mutex that is never held across an
//! `.await`. Every stream carries a session id; a read loop that wakes up
//! after its session was cancelled or reset sees a different id and leaves
//! the state alone.

use crate::config::ChatConfig;
use crate::ports::chat_gateway::{ChatGateway, ChatRequest, GatewayError};
use crate::ports::chat_observer::{ChatObserver, NoChatObserver};
use chat_domain::{
    ChatFailure, Conversation, Model, Notice, StreamEvent, StreamStatus, Turn,
    UnfinishedStreamPolicy,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Reasons a send is refused without touching any state
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("A response is already streaming")]
    AlreadyStreaming,
}

/// How a single `send_turn` attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Completion signal received; the assistant turn was appended.
    Completed(Turn),
    /// Stopped by `cancel()` or `reset()`; nothing was appended.
    Cancelled,
    /// The body ended without a completion signal. `kept` holds the
    /// truncated assistant turn when the policy kept the partial text.
    Unfinished { kept: Option<Turn> },
    /// The request or the read loop failed; the failure is now the standing error.
    Failed(ChatFailure),
}

/// Read-only copy of the controller state for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub turns: Vec<Turn>,
    pub status: StreamStatus,
    pub partial: String,
    pub error: Option<ChatFailure>,
}

struct ActiveSession {
    id: u64,
    token: CancellationToken,
}

#[derive(Default)]
struct ControllerState {
    conversation: Conversation,
    status: StreamStatus,
    partial: String,
    error: Option<ChatFailure>,
    session: Option<ActiveSession>,
    next_session_id: u64,
}

impl ControllerState {
    fn owns(&self, session_id: u64) -> bool {
        self.session.as_ref().is_some_and(|s| s.id == session_id)
    }

    /// Leave the streaming state, returning to idle with no partial text.
    fn settle(&mut self) -> Option<ActiveSession> {
        self.status = StreamStatus::Idle;
        self.partial.clear();
        self.session.take()
    }
}

/// Use case driving one conversation against a [`ChatGateway`]
pub struct StreamController<G: ChatGateway + 'static> {
    gateway: Arc<G>,
    config: ChatConfig,
    observer: Arc<dyn ChatObserver>,
    state: Mutex<ControllerState>,
}

impl<G: ChatGateway + 'static> StreamController<G> {
    pub fn new(gateway: Arc<G>, config: ChatConfig) -> Self {
        Self {
            gateway,
            config,
            observer: Arc::new(NoChatObserver),
            state: Mutex::new(ControllerState::default()),
        }
    }

    /// Set the observer notified of every state change
    pub fn with_observer(mut self, observer: Arc<dyn ChatObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn model(&self) -> &Model {
        &self.config.model
    }

    pub fn endpoint(&self) -> &str {
        self.gateway.endpoint()
    }

    pub fn status(&self) -> StreamStatus {
        self.state().status
    }

    pub fn error(&self) -> Option<ChatFailure> {
        self.state().error.clone()
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        let state = self.state();
        ChatSnapshot {
            turns: state.conversation.turns().to_vec(),
            status: state.status,
            partial: state.partial.clone(),
            error: state.error.clone(),
        }
    }

    /// Send a user turn and stream the assistant's reply until it settles.
    ///
    /// Refuses blank text and concurrent sends. Network and stream failures
    /// are not returned as errors: they become the standing error and the
    /// outcome is [`SendOutcome::Failed`].
    pub async fn send_turn(&self, text: &str) -> Result<SendOutcome, ControllerError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(ControllerError::EmptyMessage);
        }

        let (session_id, token, request) = self.open_session(content)?;

        info!(
            "Stream {} started: {} turn(s) to model {}",
            session_id,
            request.messages.len(),
            request.model
        );

        let stream = tokio::select! {
            biased;
            _ = token.cancelled() => return Ok(SendOutcome::Cancelled),
            result = self.gateway.stream_chat(request, token.clone()) => result,
        };

        let mut handle = match stream {
            Ok(handle) => handle,
            Err(e) => return Ok(self.fail(session_id, self.classify(e))),
        };

        loop {
            let event = tokio::select! {
                biased;
                _ = token.cancelled() => return Ok(SendOutcome::Cancelled),
                event = handle.next_event() => event,
            };

            match event {
                Some(StreamEvent::Delta(chunk)) => {
                    if !self.publish_delta(session_id, &chunk) {
                        return Ok(SendOutcome::Cancelled);
                    }
                }
                Some(StreamEvent::Completed) => return Ok(self.finalize(session_id)),
                Some(StreamEvent::Error(message)) => {
                    return Ok(self.fail(session_id, ChatFailure::Other(message)));
                }
                None => return Ok(self.end_unfinished(session_id)),
            }
        }
    }

    /// Stop the active stream, discarding its partial text.
    ///
    /// Returns `false` (and changes nothing) when no stream is active.
    pub fn cancel(&self) -> bool {
        let mut state = self.state();
        self.cancel_locked(&mut state)
    }

    /// Start a new conversation: cancel any stream, drop every turn and the
    /// standing error.
    pub fn reset(&self) {
        let mut state = self.state();
        self.cancel_locked(&mut state);
        state.conversation.clear();
        state.error = None;
        info!("Conversation reset");
        self.observer.on_reset();
    }

    /// Clear the standing error, if any
    pub fn dismiss_error(&self) {
        self.state().error = None;
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open_session(
        &self,
        content: &str,
    ) -> Result<(u64, CancellationToken, ChatRequest), ControllerError> {
        let mut state = self.state();
        if state.status.is_streaming() {
            return Err(ControllerError::AlreadyStreaming);
        }

        let turn = Turn::user(content);
        state.error = None;
        state.conversation.push(turn.clone());

        state.next_session_id += 1;
        let id = state.next_session_id;
        let token = CancellationToken::new();
        state.session = Some(ActiveSession {
            id,
            token: token.clone(),
        });
        state.status = StreamStatus::Streaming;
        state.partial.clear();

        let request = ChatRequest::new(
            self.config.model.clone(),
            state.conversation.turns().to_vec(),
        );

        self.observer.on_turn_appended(&turn);
        self.observer.on_stream_start();

        Ok((id, token, request))
    }

    fn cancel_locked(&self, state: &mut ControllerState) -> bool {
        if !state.status.is_streaming() {
            return false;
        }

        if let Some(session) = state.settle() {
            session.token.cancel();
            info!("Stream {} cancelled by user", session.id);
        }

        self.observer.on_stream_end();
        self.observer.on_notice(Notice::Cancelled);
        true
    }

    /// Append a delta to the partial text. Returns `false` if the session is gone.
    fn publish_delta(&self, session_id: u64, chunk: &str) -> bool {
        let mut state = self.state();
        if !state.owns(session_id) {
            return false;
        }
        if chunk.is_empty() {
            return true;
        }

        state.partial.push_str(chunk);
        self.observer.on_partial(&state.partial, chunk);
        true
    }

    fn finalize(&self, session_id: u64) -> SendOutcome {
        let mut state = self.state();
        if !state.owns(session_id) {
            return SendOutcome::Cancelled;
        }

        let turn = Turn::assistant(std::mem::take(&mut state.partial));
        state.settle();
        state.conversation.push(turn.clone());

        debug!(
            "Stream {} completed with {} chars",
            session_id,
            turn.content().len()
        );
        self.observer.on_stream_end();
        self.observer.on_turn_appended(&turn);
        SendOutcome::Completed(turn)
    }

    fn end_unfinished(&self, session_id: u64) -> SendOutcome {
        let mut state = self.state();
        if !state.owns(session_id) {
            return SendOutcome::Cancelled;
        }

        let partial = std::mem::take(&mut state.partial);
        state.settle();

        let kept = match self.config.unfinished_stream {
            UnfinishedStreamPolicy::Keep if !partial.is_empty() => {
                let turn = Turn::assistant(partial);
                state.conversation.push(turn.clone());
                Some(turn)
            }
            _ => None,
        };

        warn!(
            "Stream {} ended without a completion signal ({} policy)",
            session_id, self.config.unfinished_stream
        );
        self.observer.on_stream_end();
        if let Some(ref turn) = kept {
            self.observer.on_turn_appended(turn);
        }
        SendOutcome::Unfinished { kept }
    }

    fn fail(&self, session_id: u64, failure: ChatFailure) -> SendOutcome {
        let mut state = self.state();
        if !state.owns(session_id) {
            return SendOutcome::Cancelled;
        }

        state.settle();
        state.error = Some(failure.clone());

        warn!("Stream {} failed: {}", session_id, failure);
        self.observer.on_stream_end();
        self.observer.on_error(&failure);
        SendOutcome::Failed(failure)
    }

    fn classify(&self, error: GatewayError) -> ChatFailure {
        match error {
            GatewayError::ConnectionRefused(_) => ChatFailure::ConnectionRefused {
                endpoint: self.gateway.endpoint().to_string(),
            },
            GatewayError::ModelNotFound(_) => ChatFailure::ModelMissing {
                model: self.config.model.clone(),
            },
            other => ChatFailure::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::StreamHandle;
    use async_trait::async_trait;
    use chat_domain::Role;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::mpsc;

    // ==================== Mocks ====================

    enum Script {
        /// Deliver these events, then close the channel.
        Events(Vec<StreamEvent>),
        /// Deliver these events and keep the channel open.
        Hang(Vec<StreamEvent>),
        /// Fail before any body is read.
        Fail(GatewayError),
        /// Never answer, like a server that accepts the request but sends no headers.
        Stall,
    }

    struct ScriptedGateway {
        scripts: Mutex<VecDeque<Script>>,
        requests: Mutex<Vec<ChatRequest>>,
        tokens: Mutex<Vec<CancellationToken>>,
        held: Mutex<Vec<mpsc::Sender<StreamEvent>>>,
    }

    impl ScriptedGateway {
        fn new(scripts: Vec<Script>) -> Arc<Self> {
            Arc::new(Self {
                scripts: Mutex::new(VecDeque::from(scripts)),
                requests: Mutex::new(Vec::new()),
                tokens: Mutex::new(Vec::new()),
                held: Mutex::new(Vec::new()),
            })
        }

        fn reply(text: &str) -> Script {
            Script::Events(vec![
                StreamEvent::Delta(text.to_string()),
                StreamEvent::Completed,
            ])
        }
    }

    #[async_trait]
    impl ChatGateway for ScriptedGateway {
        fn endpoint(&self) -> &str {
            "http://localhost:11434"
        }

        async fn stream_chat(
            &self,
            request: ChatRequest,
            cancel: CancellationToken,
        ) -> Result<StreamHandle, GatewayError> {
            self.requests.lock().unwrap().push(request);
            self.tokens.lock().unwrap().push(cancel);

            let script = self
                .scripts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Script::Events(Vec::new()));

            let (events, hang) = match script {
                Script::Events(events) => (events, false),
                Script::Hang(events) => (events, true),
                Script::Fail(error) => return Err(error),
                Script::Stall => std::future::pending().await,
            };

            let (tx, rx) = mpsc::channel(events.len() + 1);
            for event in events {
                tx.send(event).await.unwrap();
            }
            if hang {
                self.held.lock().unwrap().push(tx);
            }
            Ok(StreamHandle::new(rx))
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        partials: Mutex<Vec<String>>,
        notices: Mutex<Vec<Notice>>,
        errors: Mutex<Vec<ChatFailure>>,
        appended: Mutex<Vec<Turn>>,
        resets: Mutex<usize>,
    }

    impl ChatObserver for RecordingObserver {
        fn on_turn_appended(&self, turn: &Turn) {
            self.appended.lock().unwrap().push(turn.clone());
        }

        fn on_partial(&self, partial: &str, _delta: &str) {
            self.partials.lock().unwrap().push(partial.to_string());
        }

        fn on_error(&self, failure: &ChatFailure) {
            self.errors.lock().unwrap().push(failure.clone());
        }

        fn on_notice(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }

        fn on_reset(&self) {
            *self.resets.lock().unwrap() += 1;
        }
    }

    fn controller(gateway: Arc<ScriptedGateway>) -> Arc<StreamController<ScriptedGateway>> {
        Arc::new(StreamController::new(gateway, ChatConfig::default()))
    }

    async fn wait_for_partial(
        controller: &StreamController<ScriptedGateway>,
        expected: &str,
    ) {
        for _ in 0..200 {
            if controller.snapshot().partial == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("partial text never reached {:?}", expected);
    }

    // ==================== Sending ====================

    #[tokio::test]
    async fn test_deltas_accumulate_into_one_turn() {
        let gateway = ScriptedGateway::new(vec![Script::Events(vec![
            StreamEvent::Delta("a".to_string()),
            StreamEvent::Delta("b".to_string()),
            StreamEvent::Completed,
        ])]);
        let observer = Arc::new(RecordingObserver::default());
        let controller = StreamController::new(gateway, ChatConfig::default())
            .with_observer(observer.clone());

        let outcome = controller.send_turn("hi").await.unwrap();

        assert_eq!(outcome, SendOutcome::Completed(Turn::assistant("ab")));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.turns, vec![Turn::user("hi"), Turn::assistant("ab")]);
        assert_eq!(snapshot.status, StreamStatus::Idle);
        assert!(snapshot.partial.is_empty());
        assert_eq!(*observer.partials.lock().unwrap(), vec!["a", "ab"]);
    }

    #[tokio::test]
    async fn test_n_sends_produce_alternating_turns() {
        let gateway = ScriptedGateway::new(vec![
            ScriptedGateway::reply("one"),
            ScriptedGateway::reply("two"),
            ScriptedGateway::reply("three"),
        ]);
        let controller = controller(gateway.clone());

        for question in ["q1", "q2", "q3"] {
            let outcome = controller.send_turn(question).await.unwrap();
            assert!(matches!(outcome, SendOutcome::Completed(_)));
        }

        let turns = controller.snapshot().turns;
        assert_eq!(turns.len(), 6);
        for (i, turn) in turns.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(turn.role(), expected);
        }
        assert_eq!(turns[2].content(), "q2");
        assert_eq!(turns[5].content(), "three");
    }

    #[tokio::test]
    async fn test_request_carries_full_history_oldest_first() {
        let gateway = ScriptedGateway::new(vec![
            ScriptedGateway::reply("first answer"),
            ScriptedGateway::reply("second answer"),
        ]);
        let controller = controller(gateway.clone());

        controller.send_turn("first").await.unwrap();
        controller.send_turn("  second  ").await.unwrap();

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].model, Model::default());
        assert_eq!(
            requests[1].messages,
            vec![
                Turn::user("first"),
                Turn::assistant("first answer"),
                Turn::user("second"),
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_message_rejected_without_state_change() {
        let gateway = ScriptedGateway::new(vec![]);
        let controller = controller(gateway.clone());

        let result = controller.send_turn("   \n").await;

        assert_eq!(result, Err(ControllerError::EmptyMessage));
        assert!(controller.snapshot().turns.is_empty());
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_events_after_completion_are_ignored() {
        let gateway = ScriptedGateway::new(vec![Script::Events(vec![
            StreamEvent::Delta("done".to_string()),
            StreamEvent::Completed,
            StreamEvent::Delta(" extra".to_string()),
            StreamEvent::Completed,
        ])]);
        let controller = controller(gateway);

        let outcome = controller.send_turn("hi").await.unwrap();

        assert_eq!(outcome, SendOutcome::Completed(Turn::assistant("done")));
        assert_eq!(controller.snapshot().turns.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_send_rejected() {
        let gateway = ScriptedGateway::new(vec![Script::Hang(vec![StreamEvent::Delta(
            "x".to_string(),
        )])]);
        let controller = controller(gateway.clone());

        let running = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send_turn("first").await })
        };
        wait_for_partial(&controller, "x").await;

        let second = controller.send_turn("second").await;
        assert_eq!(second, Err(ControllerError::AlreadyStreaming));
        assert_eq!(controller.snapshot().turns, vec![Turn::user("first")]);

        assert!(controller.cancel());
        assert_eq!(running.await.unwrap(), Ok(SendOutcome::Cancelled));
    }

    // ==================== Cancellation ====================

    #[tokio::test]
    async fn test_cancel_mid_stream_discards_partial() {
        let gateway = ScriptedGateway::new(vec![Script::Hang(vec![StreamEvent::Delta(
            "partial".to_string(),
        )])]);
        let observer = Arc::new(RecordingObserver::default());
        let controller = Arc::new(
            StreamController::new(gateway.clone(), ChatConfig::default())
                .with_observer(observer.clone()),
        );

        let running = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send_turn("hi").await })
        };
        wait_for_partial(&controller, "partial").await;

        assert!(controller.cancel());

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, StreamStatus::Idle);
        assert!(snapshot.partial.is_empty());
        assert_eq!(snapshot.turns, vec![Turn::user("hi")]);
        assert!(snapshot.error.is_none());

        assert_eq!(running.await.unwrap(), Ok(SendOutcome::Cancelled));
        assert!(gateway.tokens.lock().unwrap()[0].is_cancelled());
        assert_eq!(*observer.notices.lock().unwrap(), vec![Notice::Cancelled]);
        assert!(observer.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_before_response_headers() {
        let gateway = ScriptedGateway::new(vec![Script::Stall]);
        let observer = Arc::new(RecordingObserver::default());
        let controller = Arc::new(
            StreamController::new(gateway.clone(), ChatConfig::default())
                .with_observer(observer.clone()),
        );

        let running = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send_turn("hi").await })
        };
        while gateway.tokens.lock().unwrap().is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert!(controller.cancel());

        let outcome = tokio::time::timeout(Duration::from_secs(2), running)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome, Ok(SendOutcome::Cancelled));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, StreamStatus::Idle);
        assert_eq!(snapshot.turns, vec![Turn::user("hi")]);
        assert!(snapshot.error.is_none());
        assert!(observer.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_when_idle_is_noop() {
        let gateway = ScriptedGateway::new(vec![ScriptedGateway::reply("ok")]);
        let observer = Arc::new(RecordingObserver::default());
        let controller = StreamController::new(gateway, ChatConfig::default())
            .with_observer(observer.clone());
        controller.send_turn("hi").await.unwrap();
        let before = controller.snapshot();

        assert!(!controller.cancel());
        assert!(!controller.cancel());

        assert_eq!(controller.snapshot(), before);
        assert!(observer.notices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_controller_usable_after_cancel() {
        let gateway = ScriptedGateway::new(vec![
            Script::Hang(vec![StreamEvent::Delta("stale".to_string())]),
            ScriptedGateway::reply("fresh"),
        ]);
        let controller = controller(gateway);

        let running = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send_turn("first").await })
        };
        wait_for_partial(&controller, "stale").await;
        controller.cancel();
        running.await.unwrap().unwrap();

        let outcome = controller.send_turn("second").await.unwrap();
        assert_eq!(outcome, SendOutcome::Completed(Turn::assistant("fresh")));
        assert_eq!(
            controller.snapshot().turns,
            vec![
                Turn::user("first"),
                Turn::user("second"),
                Turn::assistant("fresh"),
            ]
        );
    }

    // ==================== Failures ====================

    #[tokio::test]
    async fn test_not_found_surfaces_model_missing() {
        let gateway = ScriptedGateway::new(vec![Script::Fail(GatewayError::ModelNotFound(
            "model 'qwen3:14b' not found".to_string(),
        ))]);
        let controller = controller(gateway);

        let outcome = controller.send_turn("hi").await.unwrap();

        let SendOutcome::Failed(failure) = outcome else {
            panic!("expected failure, got {:?}", outcome);
        };
        assert!(failure.message().contains("qwen3:14b"));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.error, Some(failure));
        assert_eq!(snapshot.status, StreamStatus::Idle);
        assert_eq!(snapshot.turns, vec![Turn::user("hi")]);
    }

    #[tokio::test]
    async fn test_connection_refused_names_endpoint() {
        let gateway = ScriptedGateway::new(vec![Script::Fail(GatewayError::ConnectionRefused(
            "tcp connect error".to_string(),
        ))]);
        let observer = Arc::new(RecordingObserver::default());
        let controller = StreamController::new(gateway, ChatConfig::default())
            .with_observer(observer.clone());

        controller.send_turn("hi").await.unwrap();

        let errors = observer.errors.lock().unwrap();
        assert_eq!(
            errors[0],
            ChatFailure::ConnectionRefused {
                endpoint: "http://localhost:11434".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_mid_stream_error_discards_partial() {
        let gateway = ScriptedGateway::new(vec![Script::Events(vec![
            StreamEvent::Delta("half".to_string()),
            StreamEvent::Error("model crashed".to_string()),
        ])]);
        let controller = controller(gateway);

        let outcome = controller.send_turn("hi").await.unwrap();

        assert_eq!(
            outcome,
            SendOutcome::Failed(ChatFailure::Other("model crashed".to_string()))
        );
        let snapshot = controller.snapshot();
        assert!(snapshot.partial.is_empty());
        assert_eq!(snapshot.turns.len(), 1);
    }

    #[tokio::test]
    async fn test_next_send_clears_standing_error() {
        let gateway = ScriptedGateway::new(vec![
            Script::Fail(GatewayError::Other("boom".to_string())),
            ScriptedGateway::reply("recovered"),
        ]);
        let controller = controller(gateway);

        controller.send_turn("one").await.unwrap();
        assert!(controller.error().is_some());

        controller.send_turn("two").await.unwrap();
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn test_dismiss_error() {
        let gateway = ScriptedGateway::new(vec![Script::Fail(GatewayError::HttpStatus {
            status: 500,
            detail: "Internal Server Error".to_string(),
        })]);
        let controller = controller(gateway);

        controller.send_turn("hi").await.unwrap();
        assert_eq!(
            controller.error().map(|e| e.message()),
            Some("Ollama returned HTTP 500: Internal Server Error".to_string())
        );

        controller.dismiss_error();
        assert!(controller.error().is_none());
    }

    // ==================== Unfinished streams ====================

    #[tokio::test]
    async fn test_unfinished_stream_discarded_by_default() {
        let gateway = ScriptedGateway::new(vec![Script::Events(vec![StreamEvent::Delta(
            "cut off".to_string(),
        )])]);
        let controller = controller(gateway);

        let outcome = controller.send_turn("hi").await.unwrap();

        assert_eq!(outcome, SendOutcome::Unfinished { kept: None });
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, StreamStatus::Idle);
        assert_eq!(snapshot.turns, vec![Turn::user("hi")]);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_unfinished_stream_kept_when_configured() {
        let gateway = ScriptedGateway::new(vec![Script::Events(vec![StreamEvent::Delta(
            "cut off".to_string(),
        )])]);
        let config = ChatConfig::default().with_unfinished_stream(UnfinishedStreamPolicy::Keep);
        let controller = StreamController::new(gateway, config);

        let outcome = controller.send_turn("hi").await.unwrap();

        assert_eq!(
            outcome,
            SendOutcome::Unfinished {
                kept: Some(Turn::assistant("cut off"))
            }
        );
        assert_eq!(controller.snapshot().turns.len(), 2);
    }

    // ==================== Reset ====================

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let gateway = ScriptedGateway::new(vec![
            ScriptedGateway::reply("ok"),
            Script::Fail(GatewayError::Other("boom".to_string())),
        ]);
        let observer = Arc::new(RecordingObserver::default());
        let controller = StreamController::new(gateway, ChatConfig::default())
            .with_observer(observer.clone());
        controller.send_turn("one").await.unwrap();
        controller.send_turn("two").await.unwrap();

        controller.reset();

        assert_eq!(controller.snapshot(), ChatSnapshot::default());
        assert_eq!(*observer.resets.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reset_mid_stream_cancels() {
        let gateway = ScriptedGateway::new(vec![Script::Hang(vec![StreamEvent::Delta(
            "partial".to_string(),
        )])]);
        let controller = controller(gateway.clone());

        let running = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send_turn("hi").await })
        };
        wait_for_partial(&controller, "partial").await;

        controller.reset();

        assert_eq!(controller.snapshot(), ChatSnapshot::default());
        assert_eq!(running.await.unwrap(), Ok(SendOutcome::Cancelled));
        assert!(gateway.tokens.lock().unwrap()[0].is_cancelled());
    }
}
