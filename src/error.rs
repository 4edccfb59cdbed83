use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack answered with `ok: false`
    #[error("{method}: {message}")]
    Api { method: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal prompt could not read input
    #[error("prompt failed: {0}")]
    Prompt(std::io::Error),

    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preferences are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidInput(String),

    #[error("no conversation selected")]
    NoSelection,

    #[error("no team token available, add a team or pass --token")]
    NoActiveTeam,

    #[error("no saved team named `{0}`")]
    UnknownTeam(String),

    /// A newer refresh started before this one finished
    #[error("refresh superseded by a newer one")]
    Superseded,
}

pub type Result<T> = std::result::Result<T, Error>;
