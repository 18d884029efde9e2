//! A driver that replays scripted replies and records every request.

use async_trait::async_trait;
use showrunner_core::{GenerateRequest, GenerateResponse};
use showrunner_error::{ModelError, ModelErrorKind, ShowrunnerError, ShowrunnerResult};
use showrunner_interface::ModelDriver;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Replies are taken from the queue in order. Once the queue is empty the
/// driver answers structured requests with a one-shot list and free-text
/// requests with `reply {n}`, where `n` is the zero-based call index.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    queue: Mutex<VecDeque<String>>,
    failures: Mutex<HashMap<usize, ModelErrorKind>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue replies, in order.
    pub fn with_replies<I, S>(self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue
            .lock()
            .unwrap()
            .extend(replies.into_iter().map(Into::into));
        self
    }

    /// Fail call `index` (zero-based) with `kind`.
    pub fn fail_at(self, index: usize, kind: ModelErrorKind) -> Self {
        self.failures.lock().unwrap().insert(index, kind);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn user_prompt(&self, index: usize) -> String {
        self.requests()[index]
            .user_prompt()
            .unwrap_or_default()
            .to_string()
    }

    pub fn system_prompt(&self, index: usize) -> String {
        self.requests()[index]
            .system_prompt()
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl ModelDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> ShowrunnerResult<GenerateResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(req.clone());
            requests.len() - 1
        };

        if let Some(kind) = self.failures.lock().unwrap().remove(&index) {
            return Err(ShowrunnerError::from(ModelError::new(kind)));
        }

        let queued = self.queue.lock().unwrap().pop_front();
        let text = match queued {
            Some(text) => text,
            None if req.response_format().is_some() => super::shot_json(&["auto"]),
            None => format!("reply {}", index),
        };
        Ok(GenerateResponse::from_text(text))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}
