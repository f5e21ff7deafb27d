use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A bearer token issued by the token endpoint.
///
/// Besides the token itself, we hold on to whatever else the provider
/// returned alongside it. We don't interpret any of it; it's simply carried
/// along so it can be persisted and inspected.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    access_token: String,
    #[serde(flatten)]
    metadata: Map<String, Value>,
}

impl AccessToken {
    /// Wraps a token string obtained elsewhere.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            metadata: Map::new(),
        }
    }

    /// The raw token, as sent within `Authorization: Bearer <token>`.
    pub fn secret(&self) -> &str {
        &self.access_token
    }

    /// Every other field from the token endpoint response.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.metadata.get(field)
    }

    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("metadata", &self.metadata)
            .finish()
    }
}
