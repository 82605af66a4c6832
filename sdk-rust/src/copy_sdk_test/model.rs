use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

use crate::{BilingualText, CopyModel, CopyModelError, CopyModelResult, GenerationRequest};

/// Result for a mocked `generate` call.
/// It can either be a full response or an error to return.
pub enum MockGenerateResult {
    Response(BilingualText),
    Error(CopyModelError),
}

impl MockGenerateResult {
    /// Construct a result that yields the provided response.
    pub fn response(response: BilingualText) -> Self {
        Self::Response(response)
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: CopyModelError) -> Self {
        Self::Error(error)
    }
}

impl From<BilingualText> for MockGenerateResult {
    fn from(response: BilingualText) -> Self {
        Self::response(response)
    }
}

impl From<CopyModelError> for MockGenerateResult {
    fn from(error: CopyModelError) -> Self {
        Self::error(error)
    }
}

impl From<CopyModelResult<BilingualText>> for MockGenerateResult {
    fn from(result: CopyModelResult<BilingualText>) -> Self {
        match result {
            Ok(response) => Self::Response(response),
            Err(error) => Self::Error(error),
        }
    }
}

#[derive(Default)]
struct MockCopyModelState {
    mocked_generate_results: VecDeque<MockGenerateResult>,
    tracked_requests: Vec<GenerationRequest>,
}

/// A mock copy model for testing that tracks requests and yields predefined
/// outputs in FIFO order.
pub struct MockCopyModel {
    provider: &'static str,
    model_id: String,
    state: Mutex<MockCopyModelState>,
}

impl Default for MockCopyModel {
    fn default() -> Self {
        Self {
            provider: "mock",
            model_id: "mock-model".to_string(),
            state: Mutex::new(MockCopyModelState::default()),
        }
    }
}

impl MockCopyModel {
    /// Construct a new mock copy model instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the model identifier returned by the mock.
    pub fn set_model_id<S: Into<String>>(&mut self, model_id: S) {
        self.model_id = model_id.into();
    }

    /// Enqueue one or more mocked generate results.
    pub fn enqueue_generate_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockGenerateResult>,
    {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.mocked_generate_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked generate result.
    pub fn enqueue_generate<R>(&self, result: R) -> &Self
    where
        R: Into<MockGenerateResult>,
    {
        self.enqueue_generate_results(std::iter::once(result.into()))
    }

    /// Retrieve the requests received so far.
    pub fn tracked_requests(&self) -> Vec<GenerationRequest> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.tracked_requests.clone()
    }

    /// Clear both tracked requests and enqueued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.mocked_generate_results.clear();
        state.tracked_requests.clear();
    }
}

#[async_trait::async_trait]
impl CopyModel for MockCopyModel {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, request: GenerationRequest) -> CopyModelResult<BilingualText> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.tracked_requests.push(request);

        let result = state.mocked_generate_results.pop_front().ok_or_else(|| {
            CopyModelError::Invariant(self.provider, "no mocked generate results available".into())
        })?;

        match result {
            MockGenerateResult::Response(response) => Ok(response),
            MockGenerateResult::Error(error) => Err(error),
        }
    }
}
