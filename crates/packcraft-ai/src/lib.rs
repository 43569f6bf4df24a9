//! Advisor boundary: the external generative-AI capabilities
//!
//! The planner consumes the model as seven narrow capabilities behind the
//! [`GearAdvisor`] trait. Transport and API failures surface as [`AiError`];
//! the session layer recovers every one of them to a safe default, so
//! nothing here is fatal to the application.

pub mod gemini;
pub mod parse;
pub mod prompt;

use async_trait::async_trait;
use packcraft_core::{ChatMessage, GearItem, PackAnalysis, SuggestedItem, TripSettings};
use thiserror::Error;

pub use gemini::GeminiAdvisor;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Advisor not configured: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty response from model")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, AiError>;

/// The seven advisor capabilities
///
/// Shapes are contractual; prompting strategy is an implementation detail.
#[async_trait]
pub trait GearAdvisor: Send + Sync {
    /// Short free-text assessment of the loadout
    async fn quick_feedback(&self, pack: &[GearItem], settings: &TripSettings) -> Result<String>;

    /// Longer Markdown review with fixed section headers
    async fn deep_review(&self, pack: &[GearItem], settings: &TripSettings) -> Result<String>;

    /// Conversational turn, prior turns supplied in order
    async fn chat(
        &self,
        history: &[ChatMessage],
        message: &str,
        pack: &[GearItem],
        settings: &TripSettings,
    ) -> Result<String>;

    /// Free-text summary grounded in external search
    async fn search(&self, query: &str) -> Result<String>;

    /// Structured analysis; malformed JSON degrades to the all-empty default
    async fn analyze_pack(&self, pack: &[GearItem], settings: &TripSettings)
        -> Result<PackAnalysis>;

    /// Structured suggestions; parse failure yields an empty list
    async fn suggest_items(
        &self,
        pack: &[GearItem],
        settings: &TripSettings,
    ) -> Result<Vec<SuggestedItem>>;

    /// Weight estimate in grams for a named item; 0 when unparseable
    async fn estimate_weight(&self, item_name: &str) -> Result<f64>;
}
