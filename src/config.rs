use std::path::PathBuf;

use crate::auth::Session;
use crate::client::DEFAULT_API_BASE;
use crate::error::{Error, Result};
use crate::teams::TeamStore;

const APP_DIR: &str = "slackfari";
const PREFS_FILE: &str = "prefs.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub prefs_path: PathBuf,

    /// Explicit token, wins over any saved team
    pub token: Option<String>,

    /// Saved team to start with
    pub team: Option<String>,
}

impl Config {
    pub fn new(
        api_base: Option<String>,
        prefs_path: Option<PathBuf>,
        token: Option<String>,
        team: Option<String>,
    ) -> Result<Self> {
        let prefs_path = match prefs_path {
            Some(path) => path,
            None => default_prefs_path()?,
        };

        Ok(Self {
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            prefs_path,
            token: token.filter(|token| !token.trim().is_empty()),
            team,
        })
    }

    pub fn store(&self) -> TeamStore {
        TeamStore::new(&self.prefs_path)
    }

    /// Saved team to switch to at startup. An explicit token wins over it.
    pub fn startup_team(&self) -> Option<&str> {
        match self.token {
            Some(_) => None,
            None => self.team.as_deref(),
        }
    }

    /// Picks the default token: `token`, else the first saved team.
    pub fn resolve_session(&self, store: &TeamStore) -> Result<Session> {
        if let Some(token) = &self.token {
            log::debug!("using token from command line or environment");
            return Ok(Session::new(token.clone()));
        }

        let team = store
            .list()?
            .into_iter()
            .next()
            .ok_or(Error::NoActiveTeam)?;

        log::debug!("using saved team `{team}`");
        Ok(Session::new(team.token))
    }
}

pub fn default_prefs_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(PREFS_FILE))
        .ok_or_else(|| Error::Config("could not determine the config directory".to_string()))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::teams::TeamRecord;

    fn record(name: &str, token: &str) -> TeamRecord {
        TeamRecord {
            name: name.to_string(),
            token: token.to_string(),
            image: String::new(),
        }
    }

    fn config(dir: &std::path::Path, token: Option<&str>, team: Option<&str>) -> Config {
        Config::new(
            None,
            Some(dir.join("prefs.json")),
            token.map(str::to_string),
            team.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn explicit_token_wins() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), Some("xoxp-env"), Some("acme"));
        let store = config.store();
        store.append(record("acme", "xoxp-acme")).unwrap();

        assert_eq!(config.resolve_session(&store).unwrap().token(), "xoxp-env");
    }

    #[test]
    fn first_saved_team_is_the_default() {
        let dir = tempdir().unwrap();
        let store = config(dir.path(), None, None).store();
        store.append(record("acme", "xoxp-acme")).unwrap();
        store.append(record("globex", "xoxp-globex")).unwrap();

        let first = config(dir.path(), Some("  "), None);
        assert_eq!(first.resolve_session(&store).unwrap().token(), "xoxp-acme");
    }

    #[test]
    fn startup_team_yields_to_explicit_token() {
        let dir = tempdir().unwrap();

        assert_eq!(
            config(dir.path(), None, Some("globex")).startup_team(),
            Some("globex")
        );
        assert_eq!(
            config(dir.path(), Some("xoxp-env"), Some("globex")).startup_team(),
            None
        );
    }

    #[test]
    fn no_saved_team_is_an_error() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), None, None);

        assert!(matches!(
            config.resolve_session(&config.store()),
            Err(Error::NoActiveTeam)
        ));
    }

    #[test]
    fn api_base_defaults_to_slack() {
        let dir = tempdir().unwrap();
        assert_eq!(config(dir.path(), None, None).api_base, DEFAULT_API_BASE);
    }
}
