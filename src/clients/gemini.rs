//! Gemini `generateContent` client.
//!
//! Sends the assembled parts as one multi-part request and extracts the
//! response text. An empty or text-less response is a valid (if
//! unhelpful) result, not an error; only transport failures and non-2xx
//! statuses become [`GenerationError::Provider`].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clients::{GenerationClient, RequestPart};
use crate::config::Config;
use crate::error::{GenerationError, Result};

/// HTTP client for the generation endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model_name: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GenerationError::Provider(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model_name: config.model_name.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url, self.model_name
        )
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, parts: &[RequestPart]) -> Result<String> {
        let request = GenerateContentRequest::from_parts(parts);
        debug!(
            "calling {} with {} part(s), model: {}",
            self.endpoint(),
            parts.len(),
            self.model_name
        );

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("generation request failed: {}", e);
                GenerationError::Provider(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("generation endpoint returned {}: {}", status, body);
            return Err(GenerationError::Provider(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Provider(format!("malformed response: {e}")))?;

        debug!("generation call succeeded");
        Ok(body.into_text())
    }
}

// ========== wire format ==========

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_parts(parts: &'a [RequestPart]) -> Self {
        let parts = parts
            .iter()
            .map(|part| match part {
                RequestPart::Text(text) => Part::Text { text },
                RequestPart::InlineData { mime_type, data } => Part::InlineData {
                    inline_data: InlineData { mime_type, data },
                },
            })
            .collect();

        Self {
            contents: vec![Content { parts }],
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; empty when the model
    /// returned nothing.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_provider_wire_format() {
        let parts = vec![
            RequestPart::Text("make an exam".to_string()),
            RequestPart::InlineData {
                mime_type: "application/pdf".to_string(),
                data: "QUJD".to_string(),
            },
        ];

        let json = serde_json::to_value(GenerateContentRequest::from_parts(&parts)).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "make an exam");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "application/pdf"
        );
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["data"], "QUJD");
    }

    #[test]
    fn response_text_is_concatenated_from_parts() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"\\documentclass"},{"text":"{article}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.into_text(), "\\documentclass{article}");
    }

    #[test]
    fn empty_response_yields_empty_text() {
        let body: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_text(), "");

        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":null}]}"#).unwrap();
        assert_eq!(body.into_text(), "");
    }
}
