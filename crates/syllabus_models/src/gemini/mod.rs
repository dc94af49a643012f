//! Google Gemini integration.

mod client;
mod dto;

pub use client::{GEMINI_API_KEY_VAR, GeminiClient, classify_error};
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiErrorBody, GeminiErrorDetail, GeminiPart, GeminiRequest,
    GeminiRequestBuilder, GeminiResponse,
};
