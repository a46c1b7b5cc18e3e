//! # Generative-language chat client
//!
//! Thin wrapper over the `generateContent` endpoint. Each request carries the
//! fixed PharmaGuard system prompt, the caller's history and the new user
//! message; the reply is the concatenated text of the first candidate.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::ChatTurn;
use crate::config::AppConfig;

pub const SYSTEM_PROMPT: &str = r#"You are PharmaGuard AI, an expert pharmacogenomics assistant embedded in the PharmaGuard precision medicine platform. Your role is to help patients, doctors, and admins understand:

1. **Pharmacogenomics**: How genetic variants (SNPs, alleles) affect drug metabolism and response
2. **Drug-Gene Interactions**: Specific genes like CYP2C9, CYP2C19, CYP2D6, SLCO1B1, VKORC1, TPMT, DPYD, UGT1A1 and their clinical significance
3. **CPIC Guidelines**: Clinical Pharmacogenomics Implementation Consortium recommendations for dosing
4. **Drug Risk Levels**: Understanding "safe", "adjust dose", "avoid", and "toxic" risk classifications
5. **Genetic Phenotypes**: Poor, Intermediate, Normal, Rapid and Ultrarapid Metabolizer
6. **Platform Usage**: How to use PharmaGuard dashboards (patient analysis, doctor review, admin controls)
7. **Common Medications**: Warfarin, Clopidogrel, Simvastatin, SSRIs, Codeine, Tamoxifen, etc.

Be concise, accurate, and compassionate. Always remind users that AI responses are informational and that clinical decisions should always involve a qualified healthcare professional.

If asked about unrelated topics, politely redirect: "I'm specialized in pharmacogenomics and precision medicine. I'd be happy to help with drug-gene interactions, CPIC guidelines, or how to use PharmaGuard!"

Format responses with markdown when helpful. Keep responses to 2-4 paragraphs."#;

const MAX_OUTPUT_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Gemini API key not configured.")]
    NotConfigured,
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error("Chat request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("The model returned an empty reply")]
    EmptyReply,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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

/// Client for the generative-language API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            http,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send `message` after `history` and return the model's reply.
    pub async fn reply(&self, message: &str, history: &[ChatTurn]) -> Result<String, ChatError> {
        let api_key = self.api_key.as_deref().ok_or(ChatError::NotConfigured)?;

        let mut contents: Vec<ChatTurn> = history.to_vec();
        contents.push(ChatTurn::user(message));

        let body = json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_PROMPT }] },
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
                "temperature": TEMPERATURE,
            },
        });

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let payload: serde_json::Value = response.json().await.unwrap_or_default();
            let message = payload["error"]["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Gemini API returned {status}"));
            tracing::warn!(status = status.as_u16(), "Gemini request rejected");
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ChatError::EmptyReply);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = GeminiClient::new(Client::new(), &AppConfig::default());
        assert!(!client.is_configured());
        let err = client.reply("hello", &[]).await.unwrap_err();
        assert!(matches!(err, ChatError::NotConfigured));
        assert_eq!(err.to_string(), "Gemini API key not configured.");
    }

    #[test]
    fn test_candidate_parsing() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"there"}],"role":"model"}}]}"#,
        )
        .unwrap();
        let text: String = parsed.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "Hello there");
    }
}
