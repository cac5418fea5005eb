use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::null_as_default;

pub const PUSH_EVENT: &str = "PushEvent";

/// One entry of `/users/{username}/events`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: EventPayload,
    #[serde(default)]
    pub repo: Option<EventRepo>,
}

/// Only the commit list of a push is read; everything else is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default, deserialize_with = "lenient_commits")]
    pub commits: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRepo {
    #[serde(default)]
    pub name: Option<String>,
}

impl Event {
    pub fn is_push(&self) -> bool {
        self.event_type.as_deref() == Some(PUSH_EVENT)
    }

    /// Commits carried by a push; zero for every other event type.
    pub fn commit_count(&self) -> u64 {
        if self.is_push() {
            self.payload.commits.len() as u64
        } else {
            0
        }
    }

    pub fn repo_name(&self) -> Option<&str> {
        self.repo.as_ref().and_then(|r| r.name.as_deref())
    }
}

// Non-push payloads may reuse the `commits` key with another shape.
fn lenient_commits<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}
