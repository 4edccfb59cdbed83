use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TeamIcon {
    pub image_34: Option<String>,
    pub image_44: Option<String>,
    pub image_68: Option<String>,
    pub image_88: Option<String>,
    pub image_102: Option<String>,
    pub image_132: Option<String>,
    pub image_230: Option<String>,

    /// Set when the team never uploaded an icon
    pub image_default: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub domain: String,
    pub email_domain: Option<String>,
    pub icon: Option<TeamIcon>,
}

impl Team {
    /// Largest icon image available for the team.
    pub fn icon_url(&self) -> Option<&str> {
        let icon = self.icon.as_ref()?;

        [
            &icon.image_230,
            &icon.image_132,
            &icon.image_102,
            &icon.image_88,
            &icon.image_68,
            &icon.image_44,
            &icon.image_34,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|url| !url.is_empty())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct InfoResponse {
    pub team: Option<Team>,
}
