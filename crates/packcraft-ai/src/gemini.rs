//! Gemini-backed advisor
//!
//! Talks to the Generative Language API with plain request/response calls
//! (no streaming). The API key comes from `GEMINI_API_KEY`.

use async_trait::async_trait;
use packcraft_core::{ChatMessage, GearItem, PackAnalysis, Role, SuggestedItem, TripSettings};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use tracing::debug;

use crate::{parse, prompt, AiError, GearAdvisor, Result};

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fast model for quick checks, structured analysis and suggestions
const DEFAULT_FAST_MODEL: &str = "gemini-2.5-flash-lite";
/// Deep model for reviews and chat
const DEFAULT_DEEP_MODEL: &str = "gemini-3-pro-preview";
/// Search-grounded model
const DEFAULT_SEARCH_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "systemInstruction")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GenerateRequest {
    fn user_prompt(text: String) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text }],
            }],
            system_instruction: None,
            generation_config: None,
            tools: None,
        }
    }

    fn json_output(mut self) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
        });
        self
    }
}

/// Production advisor backed by the Gemini API
pub struct GeminiAdvisor {
    client: Client,
    api_key: String,
    fast_model: String,
    deep_model: String,
    search_model: String,
}

impl GeminiAdvisor {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("packcraft/0.1 (gear loadout planner)")
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            fast_model: DEFAULT_FAST_MODEL.to_string(),
            deep_model: DEFAULT_DEEP_MODEL.to_string(),
            search_model: DEFAULT_SEARCH_MODEL.to_string(),
        })
    }

    /// Build from the `GEMINI_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV)
            .map_err(|_| AiError::Config(format!("{} environment variable not set", API_KEY_ENV)))?;
        Self::new(api_key)
    }

    pub fn with_models(
        mut self,
        fast: impl Into<String>,
        deep: impl Into<String>,
        search: impl Into<String>,
    ) -> Self {
        self.fast_model = fast.into();
        self.deep_model = deep.into();
        self.search_model = search.into();
        self
    }

    fn build_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE_URL, model, self.api_key
        )
    }

    async fn generate(&self, model: &str, request: GenerateRequest) -> Result<String> {
        debug!(model, "sending advisor request");

        let response = self
            .client
            .post(self.build_url(model))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<GenerateResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|_| AiError::EmptyResponse)?;

        if let Some(error) = parsed.error {
            return Err(AiError::Api {
                status: status.as_u16(),
                message: error.message,
            });
        }

        parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl GearAdvisor for GeminiAdvisor {
    async fn quick_feedback(&self, pack: &[GearItem], settings: &TripSettings) -> Result<String> {
        let request = GenerateRequest::user_prompt(prompt::quick_feedback(pack, settings));
        self.generate(&self.fast_model, request).await
    }

    async fn deep_review(&self, pack: &[GearItem], settings: &TripSettings) -> Result<String> {
        let request = GenerateRequest::user_prompt(prompt::deep_review(pack, settings));
        self.generate(&self.deep_model, request).await
    }

    async fn chat(
        &self,
        history: &[ChatMessage],
        message: &str,
        pack: &[GearItem],
        settings: &TripSettings,
    ) -> Result<String> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                role: Some(
                    match turn.role {
                        Role::User => "user",
                        Role::Model => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: turn.content.clone(),
                }],
            })
            .collect();
        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: message.to_string(),
            }],
        });

        let request = GenerateRequest {
            contents,
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: prompt::chat_system_instruction(pack, settings),
                }],
            }),
            generation_config: None,
            tools: None,
        };
        self.generate(&self.deep_model, request).await
    }

    async fn search(&self, query: &str) -> Result<String> {
        let mut request = GenerateRequest::user_prompt(prompt::search(query));
        request.tools = Some(vec![serde_json::json!({ "google_search": {} })]);
        self.generate(&self.search_model, request).await
    }

    async fn analyze_pack(
        &self,
        pack: &[GearItem],
        settings: &TripSettings,
    ) -> Result<PackAnalysis> {
        let request =
            GenerateRequest::user_prompt(prompt::analyze_pack(pack, settings)).json_output();
        let text = self.generate(&self.fast_model, request).await?;
        Ok(parse::analysis(&text))
    }

    async fn suggest_items(
        &self,
        pack: &[GearItem],
        settings: &TripSettings,
    ) -> Result<Vec<SuggestedItem>> {
        let request =
            GenerateRequest::user_prompt(prompt::suggest_items(pack, settings)).json_output();
        let text = self.generate(&self.fast_model, request).await?;
        Ok(parse::suggestions(&text))
    }

    async fn estimate_weight(&self, item_name: &str) -> Result<f64> {
        let request = GenerateRequest::user_prompt(prompt::estimate_weight(item_name));
        let text = self.generate(&self.fast_model, request).await?;
        Ok(parse::grams(&text))
    }
}

impl Debug for GeminiAdvisor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiAdvisor")
            .field("fast_model", &self.fast_model)
            .field("deep_model", &self.deep_model)
            .field("search_model", &self.search_model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case_fields() {
        let request = GenerateRequest::user_prompt("hello".to_string()).json_output();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["contents"][0]["role"], "user");
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn response_text_extraction() {
        let body = r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "hi"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        let text = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text);
        assert_eq!(text.as_deref(), Some("hi"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let advisor = GeminiAdvisor::new("secret").unwrap();
        let rendered = format!("{:?}", advisor);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
