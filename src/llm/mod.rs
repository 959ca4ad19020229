mod client;
mod types;

pub use client::{CompletionClient, OpenAiClient};
pub use types::*;
