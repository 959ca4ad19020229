use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ImageUrlArgs,
};
use serde::{Deserialize, Serialize};

/// An outbound chat message. User messages may carry an image alongside the
/// text; system messages are text only.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

#[derive(Debug, Clone)]
pub enum MessageContent {
    Text(String),
    TextWithImage { text: String, image_url: String },
}

#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AssistantMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::TextWithImage {
                text: text.into(),
                image_url: image_url.into(),
            },
        }
    }

    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage, crate::Error> {
        match self.role.as_str() {
            "system" => {
                let text = match &self.content {
                    MessageContent::Text(text) => text.clone(),
                    MessageContent::TextWithImage { .. } => {
                        return Err(crate::Error::llm("System messages cannot carry images"));
                    }
                };
                let msg = ChatCompletionRequestSystemMessageArgs::default()
                    .content(ChatCompletionRequestSystemMessageContent::Text(text))
                    .build()
                    .map_err(|e| {
                        crate::Error::llm(format!("Failed to build system message: {}", e))
                    })?;
                Ok(msg.into())
            }
            "user" => {
                let mut builder = ChatCompletionRequestUserMessageArgs::default();
                match &self.content {
                    MessageContent::Text(text) => {
                        builder.content(ChatCompletionRequestUserMessageContent::Text(
                            text.clone(),
                        ));
                    }
                    MessageContent::TextWithImage { text, image_url } => {
                        let text_part = ChatCompletionRequestMessageContentPartTextArgs::default()
                            .text(text.clone())
                            .build()
                            .map_err(|e| {
                                crate::Error::llm(format!("Failed to build text part: {}", e))
                            })?;
                        let image_part = ChatCompletionRequestMessageContentPartImageArgs::default()
                            .image_url(
                                ImageUrlArgs::default()
                                    .url(image_url.clone())
                                    .build()
                                    .map_err(|e| {
                                        crate::Error::llm(format!(
                                            "Failed to build image url: {}",
                                            e
                                        ))
                                    })?,
                            )
                            .build()
                            .map_err(|e| {
                                crate::Error::llm(format!("Failed to build image part: {}", e))
                            })?;
                        builder.content(ChatCompletionRequestUserMessageContent::Array(vec![
                            text_part.into(),
                            image_part.into(),
                        ]));
                    }
                }
                let msg = builder.build().map_err(|e| {
                    crate::Error::llm(format!("Failed to build user message: {}", e))
                })?;
                Ok(msg.into())
            }
            _ => Err(crate::Error::llm(format!(
                "Unknown message role: {}",
                self.role
            ))),
        }
    }
}

impl ChatCompletionResponse {
    /// Text of the first returned choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}
