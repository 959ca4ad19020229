use super::types::*;
use crate::{Result, config::OpenAiConfig};
use async_openai::{Client, config::OpenAIConfig, types::CreateChatCompletionRequestArgs};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url);
        }

        let client = Client::with_config(openai_config);

        Self {
            client,
            model: config.model,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            "Creating chat completion with {} messages",
            request.messages.len()
        );

        let mut messages = Vec::new();
        for msg in &request.messages {
            messages.push(msg.to_openai_message()?);
        }

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.model)
            .messages(messages)
            .temperature(request.temperature.unwrap_or(0.7));

        if let Some(max_tokens) = request.max_tokens {
            request_builder.max_tokens(max_tokens);
        }

        let openai_request = request_builder.build()?;

        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let choices: Vec<Choice> = response
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                message: AssistantMessage {
                    role: choice.message.role.to_string(),
                    content: choice.message.content.unwrap_or_default(),
                },
                finish_reason: choice.finish_reason.map(|fr| format!("{fr:?}")),
            })
            .collect();

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::types::ChatCompletionRequestMessage;
    use pretty_assertions::assert_eq;

    fn create_test_config() -> OpenAiConfig {
        OpenAiConfig {
            base_url: String::new(),
            api_key: "test-api-key".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        }
    }

    #[test]
    fn test_openai_client_creation() {
        let client = OpenAiClient::new(create_test_config());
        assert_eq!(client.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_openai_client_with_custom_base_url() {
        let mut config = create_test_config();
        config.base_url = "https://custom.api.com/v1".to_string();

        let client = OpenAiClient::new(config);
        assert_eq!(client.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_system_message_conversion() {
        let msg = ChatMessage::system("You are an expert front-end developer.");

        let openai_msg = msg.to_openai_message().unwrap();
        assert!(matches!(
            openai_msg,
            ChatCompletionRequestMessage::System(_)
        ));
    }

    #[test]
    fn test_user_message_conversion() {
        let msg = ChatMessage::user("a login form with email and password fields");

        let openai_msg = msg.to_openai_message().unwrap();
        assert!(matches!(openai_msg, ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_user_message_with_image_conversion() {
        let msg = ChatMessage::user_with_image(
            "Recreate this UI",
            "data:image/png;base64,aGVsbG8=",
        );

        let openai_msg = msg.to_openai_message().unwrap();
        assert!(matches!(openai_msg, ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_system_message_rejects_image() {
        let msg = ChatMessage {
            role: "system".to_string(),
            content: MessageContent::TextWithImage {
                text: "text".to_string(),
                image_url: "data:image/png;base64,aGVsbG8=".to_string(),
            },
        };

        let result = msg.to_openai_message();
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let msg = ChatMessage {
            role: "tool".to_string(),
            content: MessageContent::Text("output".to_string()),
        };

        let result = msg.to_openai_message();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Unknown message role")
        );
    }

    #[test]
    fn test_first_content() {
        let response = ChatCompletionResponse {
            id: "chatcmpl-123".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            choices: vec![Choice {
                index: 0,
                message: AssistantMessage {
                    role: "assistant".to_string(),
                    content: "<html></html>".to_string(),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        };

        assert_eq!(response.first_content(), Some("<html></html>"));
    }

    #[test]
    fn test_first_content_with_no_choices() {
        let response = ChatCompletionResponse {
            id: "chatcmpl-123".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            choices: vec![],
            usage: None,
        };

        assert_eq!(response.first_content(), None);
    }
}
