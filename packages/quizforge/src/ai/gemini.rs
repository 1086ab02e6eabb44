//! Gemini generateContent client.
//!
//! Reference [`AI`] implementation over the Gemini HTTP API. The
//! orchestrator treats it like any other untrusted generation service;
//! no retry logic lives here.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::traits::ai::AI;
use crate::types::page::DocumentBlob;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini text-generation API.
pub struct GeminiClient {
    api_key: SecretString,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    #[serde(rename_all = "camelCase")]
    InlineData {
        mime_type: String,
        data: String,
    },
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a client with the default model.
    pub fn new(api_key: SecretString) -> Result<Self> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a client for a specific model.
    pub fn with_model(api_key: SecretString, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(GenerateError::service)?;

        Ok(Self {
            api_key,
            model: model.into(),
            client,
        })
    }
}

#[async_trait]
impl AI for GeminiClient {
    async fn generate(&self, prompt: &str, document: Option<&DocumentBlob>) -> Result<String> {
        let mut parts = Vec::with_capacity(2);
        if let Some(doc) = document {
            parts.push(Part::InlineData {
                mime_type: doc.mime.clone(),
                data: STANDARD.encode(&doc.bytes),
            });
        }
        parts.push(Part::Text(prompt.to_string()));

        let request = GeminiRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let url = format!(
            "{API_BASE}/{}:generateContent?key={}",
            self.model,
            self.api_key.expose_secret()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(GenerateError::service)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Service(
                format!("Gemini API error {status}: {body}").into(),
            ));
        }

        let payload: GeminiResponse = response.json().await.map_err(GenerateError::service)?;

        let text = payload
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }
}
