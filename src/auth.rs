use std::fmt;
use std::mem;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::client::SlackClient;
use crate::error::{Error, Result};

/// Authentication context handed to every directory call.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    pub fn headers(&self) -> Result<HeaderMap> {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            Error::InvalidInput("token contains characters not allowed in a header".to_string())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.token.is_empty() {
            "<none>"
        } else {
            "<redacted>"
        };
        f.debug_struct("Session").field("token", &shown).finish()
    }
}

/// Swaps a candidate token into a session for the lifetime of the guard.
///
/// Dropping the guard without calling [`TokenSwap::commit`] puts the previous
/// token back, so every early return, `?` and cancelled future rolls back.
pub struct TokenSwap<'a> {
    session: &'a mut Session,
    previous: Option<String>,
}

impl<'a> TokenSwap<'a> {
    pub fn new(session: &'a mut Session, candidate: impl Into<String>) -> Self {
        let previous = mem::replace(&mut session.token, candidate.into());
        Self {
            session,
            previous: Some(previous),
        }
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    /// Keeps the candidate token.
    pub fn commit(mut self) {
        self.previous = None;
    }
}

impl Drop for TokenSwap<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            log::debug!("restoring previous session token");
            self.session.token = previous;
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
struct TestResponse {
    ok: bool,
    error: Option<String>,
    team: Option<String>,
}

/// Checks the session token against `auth.test` and returns the team name.
pub async fn validate_token(client: &SlackClient, session: &Session) -> Result<String> {
    let test_response = client
        .get(session, "auth.test", &[])
        .await?
        .json::<TestResponse>()
        .await?;

    test_response
        .ok
        .then(|| test_response.team.clone().unwrap_or_default())
        .ok_or_else(|| Error::Api {
            method: "auth.test".to_string(),
            message: test_response
                .error
                .map_or_else(|| "Could not validate auth token".to_string(), |e| e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_restores_previous_token_on_drop() {
        let mut session = Session::new("xoxp-old");
        {
            let swap = TokenSwap::new(&mut session, "xoxp-new");
            assert_eq!(swap.session().token(), "xoxp-new");
        }
        assert_eq!(session.token(), "xoxp-old");
    }

    #[test]
    fn committed_swap_keeps_candidate() {
        let mut session = Session::new("xoxp-old");
        TokenSwap::new(&mut session, "xoxp-new").commit();
        assert_eq!(session.token(), "xoxp-new");
    }

    #[test]
    fn debug_output_hides_token() {
        let session = Session::new("xoxp-secret");
        assert!(!format!("{session:?}").contains("secret"));
    }

    #[test]
    fn headers_carry_bearer_token() {
        let headers = Session::new("xoxp-1").headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer xoxp-1");
    }

    #[test]
    fn headers_reject_newlines() {
        assert!(matches!(
            Session::new("bad\ntoken").headers(),
            Err(Error::InvalidInput(_))
        ));
    }
}
