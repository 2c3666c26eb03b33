//! # Gemini Suggester
//!
//! `WaypointSuggester` backed by the Gemini `generateContent` REST endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::{SuggesterError, WaypointRequest};
use crate::ports::WaypointSuggester;

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Gemini client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Model name, e.g. `gemini-1.5-flash`.
    pub model: String,
    /// Service root, without a trailing slash.
    pub base_url: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Result<String, SuggesterError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(SuggesterError::EmptyResponse)?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.trim().is_empty() {
            return Err(SuggesterError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Prompt asking for stops in the JSON shape `parse_suggestion` reads.
pub fn build_prompt(request: &WaypointRequest) -> String {
    format!(
        r#"You are a travel recommendation AI. Given two coordinates, find interesting stops along or near the route.

START COORDINATE: {:.6}, {:.6}
END COORDINATE: {:.6}, {:.6}
STOP TYPE: {}
MAX STOPS: {}

Please recommend stops of type "{}" between or near these coordinates. For each stop, provide the name of the location and its exact latitude and longitude.

Return your response in the following JSON format only (no additional text):
{{
  "stops": [
    {{
      "latitude": 0.0,
      "longitude": 0.0,
      "name": "Location Name"
    }}
  ],
  "route_description": "Brief description of the route and recommendations"
}}

Important guidelines:
- Provide real, existing locations with accurate coordinates
- Consider the geographical path between start and end points
- Limit to {} stops maximum"#,
        request.start.latitude,
        request.start.longitude,
        request.end.latitude,
        request.end.longitude,
        request.stop_type,
        request.max_stops,
        request.stop_type,
        request.max_stops,
    )
}

/// Gemini-backed waypoint suggester.
pub struct GeminiSuggester {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiSuggester {
    /// Create a suggester. Fails if no API key is configured.
    pub fn new(config: GeminiConfig) -> Result<Self, SuggesterError> {
        if config.api_key.trim().is_empty() {
            return Err(SuggesterError::NotConfigured("GEMINI_API_KEY is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(5)))
            .build()
            .map_err(|e| SuggesterError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl WaypointSuggester for GeminiSuggester {
    async fn suggest(&self, request: &WaypointRequest) -> Result<String, SuggesterError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(request)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        };

        tracing::debug!(
            "[wf-02] Requesting {} stops from {}",
            request.max_stops,
            self.config.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SuggesterError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut text = response.text().await.unwrap_or_default();
            if text.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                text.truncate(cut);
            }
            return Err(SuggesterError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SuggesterError::Decode(e.to_string()))?;

        envelope.into_text()
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
