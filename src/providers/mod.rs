//! Oracle implementations.
//!
//! `openai` speaks the OpenAI-compatible Chat Completions protocol (OpenRouter
//! by default); `find_service` targets the local classification endpoint.

pub mod find_service;
pub mod openai;

pub use find_service::FindServiceClient;
pub use openai::OpenAIProvider;
