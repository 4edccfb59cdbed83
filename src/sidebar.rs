use log::Level;

use crate::add_team::{add_team, AddTeamOutcome};
use crate::aggregate::Aggregator;
use crate::auth::Session;
use crate::client::Directory;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::teams::{TeamRecord, TeamStore};
use crate::view_model::Channelable;

/// State behind the conversation picker: the rows on screen, the selected
/// row, the saved teams and the session used for every request.
pub struct Sidebar<D> {
    client: D,
    session: Session,
    store: TeamStore,
    aggregator: Aggregator,
    rows: Vec<Channelable>,
    selected: Option<usize>,
}

impl<D: Directory> Sidebar<D> {
    pub fn new(client: D, session: Session, store: TeamStore) -> Self {
        Self {
            client,
            session,
            store,
            aggregator: Aggregator::new(),
            rows: Vec::new(),
            selected: None,
        }
    }

    /// Opens on the team `config` asks for: an explicit token, else the
    /// `--team` saved team through [`Sidebar::switch_team`], else the first
    /// saved team.
    pub fn open(client: D, config: &Config) -> Result<Self> {
        let store = config.store();

        if let Some(name) = config.startup_team() {
            let mut sidebar = Self::new(client, Session::default(), store);
            sidebar.switch_team(name)?;
            return Ok(sidebar);
        }

        let session = config.resolve_session(&store)?;
        Ok(Self::new(client, session, store))
    }

    pub fn client(&self) -> &D {
        &self.client
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rows(&self) -> &[Channelable] {
        &self.rows
    }

    pub fn selected(&self) -> Option<&Channelable> {
        self.selected.and_then(|index| self.rows.get(index))
    }

    pub fn teams(&self) -> Result<Vec<TeamRecord>> {
        self.store.list()
    }

    /// Reloads the rows. On failure the previous rows stay on screen.
    pub async fn appear(&mut self) -> Result<&[Channelable]> {
        let refreshed = self.aggregator.refresh(&self.client, &self.session).await;

        match refreshed {
            Ok(rows) => {
                self.rows = rows;
                self.selected = None;
                Ok(&self.rows)
            }
            Err(e) => {
                log::log!(refresh_failure_level(&e), "could not load conversations: {e}");
                Err(e)
            }
        }
    }

    pub fn select(&mut self, index: usize) -> Result<&Channelable> {
        let row = self.rows.get(index).ok_or_else(|| {
            Error::InvalidInput(format!(
                "row {index} is out of range ({} rows)",
                self.rows.len()
            ))
        })?;

        self.selected = Some(index);
        Ok(row)
    }

    /// Selects the first row whose label or bare name is `target`.
    pub fn select_by_name(&mut self, target: &str) -> Result<&Channelable> {
        let index = self
            .rows
            .iter()
            .position(|row| row.label() == target)
            .or_else(|| self.rows.iter().position(|row| row.name() == target))
            .ok_or_else(|| Error::InvalidInput(format!("no conversation named `{target}`")))?;

        self.select(index)
    }

    pub async fn send(&self, text: &str) -> Result<()> {
        let row = self.selected().ok_or(Error::NoSelection)?;

        if text.trim().is_empty() {
            return Err(Error::InvalidInput("message must not be empty".to_string()));
        }

        self.client
            .send_message(&self.session, text, row.kind(), row.name())
            .await
            .map_err(|e| {
                log::error!("could not send message to {}: {e}", row.label());
                e
            })
    }

    pub async fn add_team(&mut self, name: &str, token: &str) -> Result<AddTeamOutcome> {
        add_team(&self.client, &mut self.session, &self.store, name, token).await
    }

    /// Makes the saved team `name` the active one. The previous team's rows
    /// and selection are dropped; call [`Sidebar::appear`] to load the new ones.
    pub fn switch_team(&mut self, name: &str) -> Result<TeamRecord> {
        let team = self
            .store
            .find(name)?
            .ok_or_else(|| Error::UnknownTeam(name.to_string()))?;

        log::info!("switching to team `{}`", team.name);
        self.session.set_token(team.token.clone());
        self.rows.clear();
        self.selected = None;
        Ok(team)
    }
}

// Superseded refreshes are routine, not failures
fn refresh_failure_level(e: &Error) -> Level {
    match e {
        Error::Superseded => Level::Debug,
        _ => Level::Error,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::{tempdir, TempDir};

    use super::*;
    use crate::client::fake::{team, FakeDirectory};

    fn sidebar(client: FakeDirectory) -> (Sidebar<FakeDirectory>, TempDir) {
        let dir = tempdir().unwrap();
        let store = TeamStore::new(dir.path().join("prefs.json"));
        (Sidebar::new(client, Session::new("xoxp-1"), store), dir)
    }

    #[tokio::test]
    async fn appear_renders_merged_rows() {
        let (mut sidebar, _dir) =
            sidebar(FakeDirectory::with_listing(&["alice"], &["general", "random"], &[]));

        let labels: Vec<_> = sidebar
            .appear()
            .await
            .unwrap()
            .iter()
            .map(Channelable::label)
            .collect();

        assert_eq!(labels, vec!["@alice", "#general", "#random"]);
    }

    #[tokio::test]
    async fn failed_appear_keeps_previous_rows() {
        let (mut sidebar, _dir) = sidebar(FakeDirectory::with_listing(&["alice"], &[], &[]));
        sidebar.appear().await.unwrap();

        sidebar.client.fail_groups = true;
        assert!(sidebar.appear().await.is_err());

        assert_eq!(sidebar.rows().len(), 1);
    }

    #[tokio::test]
    async fn send_uses_selected_row_addressing() {
        let (mut sidebar, _dir) =
            sidebar(FakeDirectory::with_listing(&["alice"], &["general"], &["ops"]));
        sidebar.appear().await.unwrap();

        sidebar.select(1).unwrap();
        sidebar.send("https://example.com").await.unwrap();
        sidebar.select_by_name("ops").unwrap();
        sidebar.send("hi").await.unwrap();
        sidebar.select_by_name("@alice").unwrap();
        sidebar.send("hey").await.unwrap();

        let sent = sidebar.client.sent.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![
                ("#general".to_string(), "https://example.com".to_string()),
                ("ops".to_string(), "hi".to_string()),
                ("@alice".to_string(), "hey".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn send_requires_selection_and_text() {
        let (mut sidebar, _dir) = sidebar(FakeDirectory::with_listing(&["alice"], &[], &[]));
        sidebar.appear().await.unwrap();

        assert!(matches!(sidebar.send("hi").await, Err(Error::NoSelection)));

        sidebar.select(0).unwrap();
        assert!(matches!(
            sidebar.send("   ").await,
            Err(Error::InvalidInput(_))
        ));
        assert!(sidebar.client.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_selection_is_rejected() {
        let (mut sidebar, _dir) = sidebar(FakeDirectory::with_listing(&["alice"], &[], &[]));
        sidebar.appear().await.unwrap();

        assert!(matches!(sidebar.select(5), Err(Error::InvalidInput(_))));
        assert!(sidebar.selected().is_none());
    }

    #[tokio::test]
    async fn added_team_can_be_switched_to() {
        let mut client = FakeDirectory::default();
        client.team = Some(team(Some("https://a.slack-edge.com/acme.png")));
        let (mut sidebar, _dir) = sidebar(client);

        sidebar.add_team("acme", "xoxp-acme").await.unwrap();
        sidebar.session.set_token("xoxp-other");

        let switched = sidebar.switch_team("acme").unwrap();

        assert_eq!(switched.token, "xoxp-acme");
        assert_eq!(sidebar.session().token(), "xoxp-acme");
        assert_eq!(sidebar.teams().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn switching_team_drops_previous_selection() {
        let mut client = FakeDirectory::with_listing(&["alice"], &["general"], &[]);
        client.team = Some(team(Some("https://a.slack-edge.com/other.png")));
        let (mut sidebar, _dir) = sidebar(client);
        sidebar.add_team("other", "xoxp-other").await.unwrap();
        sidebar.appear().await.unwrap();
        sidebar.select_by_name("#general").unwrap();

        sidebar.switch_team("other").unwrap();

        assert!(sidebar.rows().is_empty());
        assert!(sidebar.selected().is_none());
        assert!(matches!(sidebar.send("hi").await, Err(Error::NoSelection)));
        assert!(sidebar.client.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn superseded_refresh_is_not_logged_as_failure() {
        assert_eq!(refresh_failure_level(&Error::Superseded), Level::Debug);
        assert_eq!(refresh_failure_level(&Error::NoActiveTeam), Level::Error);
    }

    fn saved(store: &TeamStore, name: &str, token: &str) {
        store
            .append(TeamRecord {
                name: name.to_string(),
                token: token.to_string(),
                image: String::new(),
            })
            .unwrap();
    }

    #[test]
    fn open_switches_to_requested_team() {
        let dir = tempdir().unwrap();
        let config = Config::new(
            None,
            Some(dir.path().join("prefs.json")),
            None,
            Some("globex".to_string()),
        )
        .unwrap();
        saved(&config.store(), "acme", "xoxp-acme");
        saved(&config.store(), "globex", "xoxp-globex");

        let sidebar = Sidebar::open(FakeDirectory::default(), &config).unwrap();

        assert_eq!(sidebar.session().token(), "xoxp-globex");
    }

    #[test]
    fn open_defaults_to_first_team_and_rejects_unknown_one() {
        let dir = tempdir().unwrap();
        let prefs = dir.path().join("prefs.json");
        let default = Config::new(None, Some(prefs.clone()), None, None).unwrap();
        saved(&default.store(), "acme", "xoxp-acme");

        let sidebar = Sidebar::open(FakeDirectory::default(), &default).unwrap();
        assert_eq!(sidebar.session().token(), "xoxp-acme");

        let unknown = Config::new(None, Some(prefs), None, Some("nope".to_string())).unwrap();
        assert!(matches!(
            Sidebar::open(FakeDirectory::default(), &unknown),
            Err(Error::UnknownTeam(name)) if name == "nope"
        ));
    }

    #[test]
    fn switching_to_unknown_team_fails() {
        let (mut sidebar, _dir) = sidebar(FakeDirectory::default());

        assert!(matches!(
            sidebar.switch_team("nope"),
            Err(Error::UnknownTeam(name)) if name == "nope"
        ));
        assert_eq!(sidebar.session().token(), "xoxp-1");
    }
}
