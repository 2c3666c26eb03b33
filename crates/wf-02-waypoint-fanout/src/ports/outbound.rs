//! # Outbound Ports
//!
//! The external waypoint suggester.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{SuggesterError, WaypointRequest};

/// Waypoint suggester - outbound port.
///
/// Returns the raw generated text. Locating and decoding the structured
/// payload inside it is the caller's job.
#[async_trait]
pub trait WaypointSuggester: Send + Sync {
    /// Ask for up to `request.max_stops` stops between the endpoints.
    async fn suggest(&self, request: &WaypointRequest) -> Result<String, SuggesterError>;

    /// Identifier for logs.
    fn name(&self) -> &str;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Suggester returning a canned reply and recording every request.
pub struct MockSuggester {
    reply: Result<String, SuggesterError>,
    requests: Mutex<Vec<WaypointRequest>>,
}

impl MockSuggester {
    /// Always answer with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: SuggesterError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<WaypointRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl WaypointSuggester for MockSuggester {
    async fn suggest(&self, request: &WaypointRequest) -> Result<String, SuggesterError> {
        self.requests.lock().push(request.clone());
        self.reply.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
