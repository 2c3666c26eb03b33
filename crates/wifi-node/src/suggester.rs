//! Suggester selection.
//!
//! Without an API key the node still serves the directory; the fan-out
//! routes then fail with an upstream error instead of blocking startup.

use async_trait::async_trait;
use tracing::warn;
use wf_02_waypoint_fanout::{
    GeminiConfig, GeminiSuggester, SuggesterError, WaypointRequest, WaypointSuggester,
};

/// Suggester chosen at startup.
pub enum NodeSuggester {
    Gemini(GeminiSuggester),
    Disabled(String),
}

impl NodeSuggester {
    pub fn from_config(config: GeminiConfig) -> Self {
        match GeminiSuggester::new(config) {
            Ok(suggester) => Self::Gemini(suggester),
            Err(e) => {
                warn!("[wf-02] Waypoint suggestions disabled: {}", e);
                Self::Disabled(e.to_string())
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Gemini(_))
    }
}

#[async_trait]
impl WaypointSuggester for NodeSuggester {
    async fn suggest(&self, request: &WaypointRequest) -> Result<String, SuggesterError> {
        match self {
            Self::Gemini(inner) => inner.suggest(request).await,
            Self::Disabled(reason) => Err(SuggesterError::NotConfigured(reason.clone())),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Gemini(inner) => inner.name(),
            Self::Disabled(_) => "disabled",
        }
    }
}
