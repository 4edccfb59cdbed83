#![warn(clippy::pedantic)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod add_team;
pub mod aggregate;
pub mod auth;
pub mod client;
pub mod config;
pub mod conversations;
pub mod error;
pub mod sidebar;
pub mod team;
pub mod teams;
pub mod user;
pub mod view_model;

pub use auth::Session;
pub use client::{Directory, SlackClient};
pub use config::Config;
pub use error::{Error, Result};
pub use sidebar::Sidebar;
pub use teams::{TeamRecord, TeamStore};
pub use view_model::{Channelable, MessageType};
