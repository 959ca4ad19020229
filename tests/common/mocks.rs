use async_openai::error::{ApiError, OpenAIError};
use async_trait::async_trait;
use snapcode_backend::{
    Error, Result,
    llm::{
        AssistantMessage, ChatCompletionRequest, ChatCompletionResponse, Choice, CompletionClient,
    },
};
use std::sync::{Arc, Mutex};

/// Mock completion client for testing. Records every request it sees and
/// hands out queued responses; a configured error is returned once.
pub struct MockCompletionClient {
    pub responses: Arc<Mutex<Vec<ChatCompletionResponse>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Arc<Mutex<Option<Error>>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_response(self, content: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(create_mock_completion(content));
        self
    }

    pub fn with_error(self, error: Error) -> Self {
        *self.error.lock().unwrap() = Some(error);
        self
    }

    pub fn get_requests(&self) -> Arc<Mutex<Vec<ChatCompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(error) = self.error.lock().unwrap().take() {
            return Err(error);
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

pub fn create_mock_completion(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-test".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        choices: vec![Choice {
            index: 0,
            message: AssistantMessage {
                role: "assistant".to_string(),
                content: content.to_string(),
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: None,
    }
}

/// Builds the error variant the real client produces for an upstream API
/// failure, so handler-level classification can be exercised without a
/// network call.
pub fn upstream_api_error(message: &str, code: Option<&str>) -> Error {
    Error::OpenAi(OpenAIError::ApiError(ApiError {
        message: message.to_string(),
        r#type: Some("invalid_request_error".to_string()),
        param: None,
        code: code.map(|c| c.to_string()),
    }))
}
