use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Instruction sent as the system turn on every completion request.
pub const REMIX_INSTRUCTION: &str =
    "Remix the text you are given creatively, but preserve the core message.";

/// One submission headed to the backend. The generation tag ties the eventual
/// response back to the attempt that issued it.
pub struct RemixPrompt {
    pub text: String,
    pub generation: u64,
}

impl RemixPrompt {
    pub fn new(text: String, generation: u64) -> RemixPrompt {
        return RemixPrompt { text, generation };
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemixError {
    /// The request completed, but no content could be extracted from it.
    #[error("No response from AI")]
    NoContent,
    /// Transport or API failure, carrying the underlying message verbatim.
    #[error("{0}")]
    Request(String),
}

pub struct RemixResponse {
    pub generation: u64,
    pub result: Result<String, RemixError>,
}

pub type BackendBox = Arc<dyn Backend + Send + Sync>;

#[async_trait]
pub trait Backend {
    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single non-streaming completion for the given text. A
    /// response with no extractable content is reported as
    /// [`RemixError::NoContent`] rather than a transport failure.
    async fn get_completion(&self, text: &str) -> Result<String, RemixError>;
}
