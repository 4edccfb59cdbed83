use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Purpose {
    pub value: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub last_set: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Topic {
    pub value: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub last_set: i64,
}

/// Public channel as returned by `conversations.list`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub created: i64,
    pub creator: String,
    pub is_archived: bool,
    pub is_channel: bool,
    pub is_general: bool,
    pub is_member: bool,
    pub is_mpim: bool,
    pub is_org_shared: bool,
    pub is_private: bool,
    pub is_shared: bool,
    pub name_normalized: String,
    pub num_members: i64,
    pub purpose: Option<Purpose>,
    pub topic: Option<Topic>,
}

/// Private channel, listed separately from public ones
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub created: i64,
    pub creator: String,
    pub is_archived: bool,
    pub is_group: bool,
    pub is_mpim: bool,

    /// Only present for legacy `groups.list` payloads
    pub members: Vec<String>,

    pub purpose: Option<Purpose>,
    pub topic: Option<Topic>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub channels: Vec<T>,
    pub response_metadata: Option<ResponseMetadata>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            response_metadata: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct PostMessageResponse {
    pub channel: Option<String>,

    /// Timestamp
    pub ts: Option<String>,
}

/// Renders a Slack unix timestamp as a local date.
pub fn format_created(created: i64) -> String {
    match Local.timestamp_opt(created, 0).single() {
        Some(datetime) => datetime.format("%Y-%m-%d").to_string(),
        None => "Invalid timestamp".to_string(),
    }
}
