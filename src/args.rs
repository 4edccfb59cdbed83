use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "slackfari",
    version,
    about = "Send links to Slack users, channels and groups from the terminal"
)]
pub struct Args {
    /// Slack token to use instead of a saved team
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Saved team to use
    #[arg(long, global = true)]
    pub team: Option<String>,

    /// Preferences file holding saved teams
    #[arg(long, env = "SLACKFARI_PREFS", global = true)]
    pub prefs: Option<PathBuf>,

    /// Slack Web API base URL
    #[arg(long, env = "SLACKFARI_API_BASE", global = true)]
    pub api_base: Option<String>,

    /// More output, repeat for debug logs
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List users, channels and groups of the active team
    List,

    /// Send a message to a user, channel or group
    Send {
        /// Target such as `#general`, `@alice` or a group name; prompts when omitted
        #[arg(long)]
        to: Option<String>,

        /// Message text, usually a URL
        text: String,
    },

    /// List saved teams
    Teams,

    /// Save a new team after checking its token
    AddTeam {
        /// Team name; prompts when omitted
        #[arg(long)]
        name: Option<String>,
    },
}
