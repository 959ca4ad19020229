use super::types::{
    ApiDescriptor, ErrorResponse, GenerateRequest, GenerateResponse, UploadResponse,
};
use crate::{
    Error,
    llm::{ChatCompletionRequest, ChatMessage, CompletionClient},
    prompt,
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::sync::Arc;
use tracing::{error, info};

const GENERATE_MAX_TOKENS: u32 = 2000;
const GENERATE_TEMPERATURE: f32 = 0.7;
const UPLOAD_MAX_TOKENS: u32 = 1000;
const UPLOAD_TEMPERATURE: f32 = 0.3;

#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn CompletionClient>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn reject(err: Error) -> ApiError {
    (
        err.status(),
        Json(ErrorResponse {
            detail: err.to_string(),
        }),
    )
}

pub async fn root() -> Json<ApiDescriptor> {
    Json(ApiDescriptor {
        message: "SnapCode API",
        endpoints: vec!["POST /generate"],
    })
}

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.description.trim().is_empty() {
        return Err(reject(Error::invalid_request(
            "description must not be empty",
        )));
    }

    info!(
        "Received generation request ({} chars)",
        request.description.len()
    );

    let completion = ChatCompletionRequest {
        messages: vec![
            ChatMessage::system(prompt::GENERATE_SYSTEM),
            ChatMessage::user(prompt::generate_user(&request.description)),
        ],
        max_tokens: Some(GENERATE_MAX_TOKENS),
        temperature: Some(GENERATE_TEMPERATURE),
    };

    let response = state
        .llm
        .create_chat_completion(completion)
        .await
        .map_err(|e| {
            error!("OpenAI API error: {}", e);
            reject(e.classify_upstream())
        })?;

    match response.first_content() {
        Some(code) if !code.is_empty() => Ok(Json(GenerateResponse {
            code: code.to_string(),
        })),
        _ => Err(reject(Error::EmptyGeneration)),
    }
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut description: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(Error::invalid_request(e.to_string())))?
    {
        match field.name() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| reject(Error::invalid_request(e.to_string())))?;
                image = Some((content_type, data.to_vec()));
            }
            Some("description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| reject(Error::invalid_request(e.to_string())))?;
                description = Some(text);
            }
            _ => {}
        }
    }

    let (content_type, data) =
        image.ok_or_else(|| reject(Error::invalid_request("missing 'file' field")))?;
    let description = description.unwrap_or_default();

    info!(
        "Received upload ({}, {} bytes, {} description chars)",
        content_type,
        data.len(),
        description.len()
    );

    let data_url = format!("data:{};base64,{}", content_type, STANDARD.encode(&data));

    let completion = ChatCompletionRequest {
        messages: vec![
            ChatMessage::system(prompt::UPLOAD_SYSTEM),
            ChatMessage::user_with_image(prompt::upload_user(&description), data_url),
        ],
        max_tokens: Some(UPLOAD_MAX_TOKENS),
        temperature: Some(UPLOAD_TEMPERATURE),
    };

    // Unlike /generate, upstream failures here are not classified: the raw
    // error text goes back as a plain 500 detail.
    match state.llm.create_chat_completion(completion).await {
        Ok(response) => match response.first_content() {
            Some(html_css) if !html_css.is_empty() => Ok(Json(UploadResponse {
                description,
                html_css: html_css.to_string(),
            })),
            _ => Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: "Failed to generate HTML/CSS".to_string(),
                }),
            )),
        },
        Err(Error::OpenAi(e)) => {
            error!("OpenAI API error: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: e.to_string(),
                }),
            ))
        }
        Err(e) => {
            error!("Upload generation failed: {}", e);
            Err(reject(e))
        }
    }
}
