use derive_more::Display;

use crate::auth::{Session, TokenSwap};
use crate::client::Directory;
use crate::error::{Error, Result};
use crate::teams::{TeamRecord, TeamStore};

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddTeamState {
    Idle,
    AuthenticatingWithTempToken,
    FetchingTeamInfo,
    Saved,
    RolledBack,
}

/// How a successful add-team run left the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTeamOutcome {
    /// The candidate was written.
    Saved(TeamRecord),

    /// A team with that name was already stored; holds the stored record,
    /// which was not touched.
    AlreadySaved(TeamRecord),
}

/// Verifies `token` with `team.info` and saves it under `name`.
///
/// The session uses `token` while the team is fetched. It keeps the new token
/// once the team is saved; on any failure the previous token is restored and
/// nothing is written. A team that is already saved under `name` is left as
/// is and reported as [`AddTeamOutcome::AlreadySaved`], but the session still
/// switches to the new token.
pub async fn add_team<D: Directory>(
    client: &D,
    session: &mut Session,
    store: &TeamStore,
    name: &str,
    token: &str,
) -> Result<AddTeamOutcome> {
    let name = name.trim();
    let token = token.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("team name must not be empty".to_string()));
    }
    if token.is_empty() {
        return Err(Error::InvalidInput("team token must not be empty".to_string()));
    }

    let mut state = AddTeamState::Idle;
    let result = run(client, session, store, name, token, &mut state).await;

    if result.is_err() {
        transition(&mut state, AddTeamState::RolledBack);
    }

    result
}

async fn run<D: Directory>(
    client: &D,
    session: &mut Session,
    store: &TeamStore,
    name: &str,
    token: &str,
    state: &mut AddTeamState,
) -> Result<AddTeamOutcome> {
    transition(state, AddTeamState::AuthenticatingWithTempToken);
    let swap = TokenSwap::new(session, token);

    transition(state, AddTeamState::FetchingTeamInfo);
    let team = client.team_info(swap.session()).await.map_err(|e| {
        log::error!("could not fetch team info for `{name}`: {e}");
        e
    })?;

    let image = team.icon_url().ok_or(Error::MissingField("team.icon"))?;

    let record = TeamRecord {
        name: name.to_string(),
        token: token.to_string(),
        image: image.to_string(),
    };
    let outcome = if store.append(record.clone())? {
        AddTeamOutcome::Saved(record)
    } else {
        let stored = store
            .find(name)?
            .ok_or_else(|| Error::UnknownTeam(name.to_string()))?;
        AddTeamOutcome::AlreadySaved(stored)
    };

    swap.commit();
    transition(state, AddTeamState::Saved);

    Ok(outcome)
}

fn transition(state: &mut AddTeamState, next: AddTeamState) {
    log::debug!("add team: {state} -> {next}");
    *state = next;
}
