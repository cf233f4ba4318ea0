//! Oracle abstraction layer.
//!
//! The runners only see these traits, so the scoring loop can be driven by the
//! real HTTP clients in [`crate::providers`] or by scripted oracles in tests.

use crate::error::Result;

// ============================================================================
// Oracle Traits
// ============================================================================

/// A chat-completion oracle answering one system + user instruction pair.
pub trait ChatOracle {
    /// Model identifier requested from the oracle.
    fn model_id(&self) -> &str;

    /// Run one completion and return its trimmed text.
    fn complete(&self, system: &str, user: &str) -> Result<Completion>;
}

/// A classification service mapping an intent straight to a service.
pub trait ClassificationOracle {
    /// Endpoint being exercised, for logs and reports.
    fn endpoint(&self) -> &str;

    fn classify(&self, intent: &str) -> Result<Classification>;
}

// ============================================================================
// Results
// ============================================================================

/// Output of a single chat completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Model name the provider reports having used (may differ from the request).
    pub model: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Usage,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Successful answer from the classification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Kept as reported; the service is not bound to the local catalog.
    pub service_id: i64,
    pub service_name: String,
}
