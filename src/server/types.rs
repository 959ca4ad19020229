use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub description: String,
    pub html_css: String,
}

#[derive(Debug, Serialize)]
pub struct ApiDescriptor {
    pub message: &'static str,
    pub endpoints: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
