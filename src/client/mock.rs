//! Scripted transport for deterministic tests.

use super::{HttpTransport, TransportRequest};
use crate::DuoAuthError;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted response for one call.
#[derive(Debug, Clone)]
enum Scripted {
    Json(Value),
    Fail(String),
}

/// Transport that records every request and replays scripted outcomes.
///
/// Queued outcomes are consumed in order. When the queue is empty the
/// transport answers with `{"stat": "OK"}`.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    seen: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response.
    pub fn respond_with(self, body: Value) -> Self {
        self.lock_script().push_back(Scripted::Json(body));
        self
    }

    /// Queue a transport failure with the given message.
    pub fn fail_with(self, message: impl Into<String>) -> Self {
        self.lock_script().push_back(Scripted::Fail(message.into()));
        self
    }

    /// Requests seen so far, in dispatch order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Scripted>> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HttpTransport for MockTransport {
    fn execute(&self, request: &TransportRequest) -> Result<Value, DuoAuthError> {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match self.lock_script().pop_front() {
            Some(Scripted::Json(body)) => Ok(body),
            Some(Scripted::Fail(message)) => Err(DuoAuthError::Transport(message)),
            None => Ok(serde_json::json!({ "stat": "OK" })),
        }
    }
}
