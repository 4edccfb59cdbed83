use serde::{Deserialize, Serialize};

use crate::conversations::ResponseMetadata;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_owner: bool,
    pub real_name: Option<String>,
    pub profile: Option<Profile>,
}

impl User {
    /// Profile display name, falling back to the real name and then the handle.
    pub fn display_name(&self) -> &str {
        let profile = self.profile.as_ref();

        [
            profile.map(|p| p.display_name.as_str()),
            profile.map(|p| p.real_name.as_str()),
            self.real_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or(self.name.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UserListResponse {
    #[serde(default)]
    pub members: Vec<User>,
    pub response_metadata: Option<ResponseMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(profile: Option<Profile>, real_name: Option<&str>) -> User {
        User {
            id: "U1".to_string(),
            name: "alice".to_string(),
            real_name: real_name.map(str::to_string),
            profile,
            ..User::default()
        }
    }

    #[test]
    fn display_name_prefers_profile_display_name() {
        let profile = Profile {
            real_name: "Alice Liddell".to_string(),
            display_name: "ali".to_string(),
        };
        assert_eq!(user(Some(profile), None).display_name(), "ali");
    }

    #[test]
    fn display_name_skips_empty_fields() {
        let profile = Profile {
            real_name: String::new(),
            display_name: String::new(),
        };
        assert_eq!(
            user(Some(profile), Some("Alice Liddell")).display_name(),
            "Alice Liddell"
        );
        assert_eq!(user(None, None).display_name(), "alice");
    }

    #[test]
    fn parses_users_list_page() {
        let page: UserListResponse = serde_json::from_str(
            r#"{
                "members": [
                    {"id": "U1", "name": "alice", "is_bot": false, "profile": {"display_name": "ali"}},
                    {"id": "U2", "name": "slackbot", "is_bot": true}
                ],
                "response_metadata": {"next_cursor": "dXNlcjpVMDYxTkZUVDI="}
            }"#,
        )
        .unwrap();

        assert_eq!(page.members.len(), 2);
        assert!(page.members[1].is_bot);
        assert_eq!(
            page.response_metadata.unwrap().next_cursor,
            "dXNlcjpVMDYxTkZUVDI="
        );
    }
}
