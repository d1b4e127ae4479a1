//! Outcome codes carried through redirects back to the catalog page

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of a write action, round-tripped as the `status` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Create,
    Update,
    Delete,
    Error,
}

impl Outcome {
    pub fn code(self) -> &'static str {
        match self {
            Outcome::Create => "create",
            Outcome::Update => "update",
            Outcome::Delete => "delete",
            Outcome::Error => "error",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "create" => Some(Outcome::Create),
            "update" => Some(Outcome::Update),
            "delete" => Some(Outcome::Delete),
            "error" => Some(Outcome::Error),
            _ => None,
        }
    }

    /// Fixed banner text; `Error` has none and shows the raw message instead
    pub fn display_message(self) -> Option<&'static str> {
        match self {
            Outcome::Create => Some("📖 Book added successfully!"),
            Outcome::Update => Some("✍️ Book updated successfully!"),
            Outcome::Delete => Some("🗑️ Book deleted successfully!"),
            Outcome::Error => None,
        }
    }

    /// Choose the banner for a page request from its `status` and `message`
    /// parameters. Unknown codes fall back to the raw message.
    pub fn resolve_message(status: Option<&str>, message: Option<&str>) -> Option<String> {
        status
            .and_then(Outcome::from_code)
            .and_then(Outcome::display_message)
            .map(str::to_string)
            .or_else(|| message.filter(|m| !m.is_empty()).map(str::to_string))
    }

    /// Location of the catalog page tagged with this outcome
    pub fn location(self, message: Option<&str>) -> String {
        let mut params = vec![("status", self.code())];
        if let Some(message) = message {
            params.push(("message", message));
        }
        match serde_urlencoded::to_string(&params) {
            Ok(query) => format!("/?{}", query),
            Err(e) => {
                tracing::warn!("Could not encode redirect message: {}", e);
                format!("/?status={}", self.code())
            }
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
