use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use ddd_core::{ContentGenerator, Error, GenerationRequest, Result};

/// Offline generator that replays scripted answers in order and records every call.
///
/// Once the script runs out each call fails with a retrieval error, so an
/// unscripted model drives the pipelines to their bundled fallbacks.
#[derive(Default)]
pub struct DummyModel {
    script: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel")
            .field("calls", &self.call_count())
            .finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: impl IntoIterator<Item = Result<String>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_text(&self, text: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Ok(text.into()));
        }
    }

    pub fn push_error(&self, error: Error) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(error));
        }
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ContentGenerator for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }

        let next = self.script.lock().ok().and_then(|mut script| script.pop_front());
        next.unwrap_or_else(|| Err(Error::Retrieval("dummy model has no scripted answer".to_string())))
    }
}
