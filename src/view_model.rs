//! Display rows built from Slack directory entities.
//!
//! Each row remembers which kind of conversation it came from, so the
//! addressing scheme used when sending is fixed at projection time.

use derive_more::Display;
use strum::EnumProperty;
use strum_macros::{EnumIter, EnumProperty};

use crate::conversations::{Channel, Group};
use crate::user::User;

#[derive(Display, EnumIter, EnumProperty, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    #[strum(props(Prefix = "@", Friendly = "user"))]
    User,

    #[strum(props(Prefix = "#", Friendly = "channel"))]
    Channel,

    #[strum(props(Prefix = "", Friendly = "group"))]
    Group,
}

impl MessageType {
    /// The `channel` argument `chat.postMessage` expects for this kind.
    pub fn address(self, name: &str) -> String {
        format!("{}{name}", self.get_str("Prefix").unwrap_or_default())
    }

    pub fn friendly(self) -> &'static str {
        self.get_str("Friendly").unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserViewModel {
    pub user: User,
}

impl UserViewModel {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelViewModel {
    pub channel: Channel,
}

impl ChannelViewModel {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupViewModel {
    pub group: Group,
}

impl GroupViewModel {
    pub fn new(group: Group) -> Self {
        Self { group }
    }
}

/// Anything a message can be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channelable {
    User(UserViewModel),
    Channel(ChannelViewModel),
    Group(GroupViewModel),
}

impl Channelable {
    pub fn name(&self) -> &str {
        match self {
            Self::User(view_model) => &view_model.user.name,
            Self::Channel(view_model) => &view_model.channel.name,
            Self::Group(view_model) => &view_model.group.name,
        }
    }

    pub fn kind(&self) -> MessageType {
        match self {
            Self::User(_) => MessageType::User,
            Self::Channel(_) => MessageType::Channel,
            Self::Group(_) => MessageType::Group,
        }
    }

    /// Row label, e.g. `#general` or `@alice`.
    pub fn label(&self) -> String {
        self.kind().address(self.name())
    }

    pub fn is_archived(&self) -> bool {
        match self {
            Self::User(view_model) => view_model.user.deleted,
            Self::Channel(view_model) => view_model.channel.is_archived,
            Self::Group(view_model) => view_model.group.is_archived,
        }
    }
}

impl From<UserViewModel> for Channelable {
    fn from(view_model: UserViewModel) -> Self {
        Self::User(view_model)
    }
}

impl From<ChannelViewModel> for Channelable {
    fn from(view_model: ChannelViewModel) -> Self {
        Self::Channel(view_model)
    }
}

impl From<GroupViewModel> for Channelable {
    fn from(view_model: GroupViewModel) -> Self {
        Self::Group(view_model)
    }
}

pub fn project_users(users: Vec<User>) -> impl Iterator<Item = Channelable> {
    users
        .into_iter()
        .map(|user| Channelable::from(UserViewModel::new(user)))
}

pub fn project_channels(channels: Vec<Channel>) -> impl Iterator<Item = Channelable> {
    channels
        .into_iter()
        .map(|channel| Channelable::from(ChannelViewModel::new(channel)))
}

pub fn project_groups(groups: Vec<Group>) -> impl Iterator<Item = Channelable> {
    groups
        .into_iter()
        .map(|group| Channelable::from(GroupViewModel::new(group)))
}
