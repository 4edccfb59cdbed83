//! Slack Web API access.
//!
//! Everything the sidebar needs from Slack goes through [`Directory`], so the
//! flows can run against [`SlackClient`] in the binary and a scripted fake in
//! tests. Every call takes the [`Session`] explicitly.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::auth::Session;
use crate::conversations::{Channel, Group, ListResponse, PostMessageResponse, ResponseMetadata};
use crate::error::{Error, Result};
use crate::team::{InfoResponse, Team};
use crate::user::{User, UserListResponse};
use crate::view_model::MessageType;

pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

const PAGE_LIMIT: u32 = 200;

pub trait Directory: Sync {
    fn list_users(&self, session: &Session) -> impl Future<Output = Result<Vec<User>>> + Send;

    fn list_channels(&self, session: &Session)
        -> impl Future<Output = Result<Vec<Channel>>> + Send;

    fn list_groups(&self, session: &Session) -> impl Future<Output = Result<Vec<Group>>> + Send;

    fn team_info(&self, session: &Session) -> impl Future<Output = Result<Team>> + Send;

    fn send_message(
        &self,
        session: &Session,
        text: &str,
        kind: MessageType,
        name: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Common `{ ok, error, ... }` wrapper around every Web API response
#[derive(Deserialize, Debug)]
struct Envelope<T> {
    ok: bool,
    error: Option<String>,
    #[serde(flatten)]
    body: T,
}

impl<T> Envelope<T> {
    fn into_result(self, method: &str) -> Result<T> {
        if self.ok {
            Ok(self.body)
        } else {
            Err(Error::Api {
                method: method.to_string(),
                message: self.error.unwrap_or_else(|| "unknown_error".to_string()),
            })
        }
    }
}

trait Page: DeserializeOwned + Send {
    type Item: Send;

    fn into_parts(self) -> (Vec<Self::Item>, Option<ResponseMetadata>);
}

impl Page for UserListResponse {
    type Item = User;

    fn into_parts(self) -> (Vec<User>, Option<ResponseMetadata>) {
        (self.members, self.response_metadata)
    }
}

impl<T: DeserializeOwned + Send> Page for ListResponse<T> {
    type Item = T;

    fn into_parts(self) -> (Vec<T>, Option<ResponseMetadata>) {
        (self.channels, self.response_metadata)
    }
}

#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    base: String,
}

impl SlackClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.base)
    }

    pub(crate) async fn get(
        &self,
        session: &Session,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let response = self
            .http
            .get(self.url(method))
            .headers(session.headers()?)
            .query(params)
            .send()
            .await?;

        Ok(response)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        session: &Session,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        self.get(session, method, params)
            .await?
            .json::<Envelope<T>>()
            .await?
            .into_result(method)
    }

    async fn list_all<P: Page>(
        &self,
        session: &Session,
        method: &str,
        types: Option<&str>,
    ) -> Result<Vec<P::Item>> {
        let limit = PAGE_LIMIT.to_string();
        let mut all_items = Vec::new();
        let mut next_cursor: Option<String> = None;

        let mut page = 1;

        loop {
            let mut params = vec![("limit", limit.as_str())];
            if let Some(types) = types {
                params.push(("types", types));
            }
            if let Some(cursor) = &next_cursor {
                params.push(("cursor", cursor.as_str()));
            }

            let (items, response_metadata) =
                self.call::<P>(session, method, &params).await?.into_parts();
            all_items.extend(items);

            let Some(response_metadata) = response_metadata else {
                break;
            };

            match response_metadata.next_cursor.as_str() {
                "" => break,
                cursor => next_cursor = Some(cursor.to_string()),
            }

            page += 1;
            log::debug!("{method}: fetching page {page}");
        }

        Ok(all_items)
    }
}

impl Default for SlackClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl Directory for SlackClient {
    async fn list_users(&self, session: &Session) -> Result<Vec<User>> {
        self.list_all::<UserListResponse>(session, "users.list", None)
            .await
    }

    async fn list_channels(&self, session: &Session) -> Result<Vec<Channel>> {
        self.list_all::<ListResponse<Channel>>(session, "conversations.list", Some("public_channel"))
            .await
    }

    async fn list_groups(&self, session: &Session) -> Result<Vec<Group>> {
        self.list_all::<ListResponse<Group>>(session, "conversations.list", Some("private_channel"))
            .await
    }

    async fn team_info(&self, session: &Session) -> Result<Team> {
        self.call::<InfoResponse>(session, "team.info", &[])
            .await?
            .team
            .ok_or(Error::MissingField("team"))
    }

    async fn send_message(
        &self,
        session: &Session,
        text: &str,
        kind: MessageType,
        name: &str,
    ) -> Result<()> {
        let channel = kind.address(name);

        let posted = self
            .http
            .post(self.url("chat.postMessage"))
            .headers(session.headers()?)
            .json(&json!({ "channel": channel, "text": text, "as_user": true }))
            .send()
            .await?
            .json::<Envelope<PostMessageResponse>>()
            .await?
            .into_result("chat.postMessage")?;

        log::info!(
            "posted message to {channel} (ts {})",
            posted.ts.unwrap_or_default()
        );

        Ok(())
    }
}
