use std::sync::atomic::{AtomicU64, Ordering};

use crate::auth::Session;
use crate::client::Directory;
use crate::error::{Error, Result};
use crate::view_model::{project_channels, project_groups, project_users, Channelable};

/// Fetches users, channels and groups concurrently and merges them into one
/// list: users first, then channels, then groups, each in the order Slack
/// returned them. Fails as a whole if any of the three listings fails.
pub async fn aggregate<D: Directory>(client: &D, session: &Session) -> Result<Vec<Channelable>> {
    let (users, channels, groups) = tokio::try_join!(
        client.list_users(session),
        client.list_channels(session),
        client.list_groups(session),
    )?;

    log::debug!(
        "fetched {} users, {} channels, {} groups",
        users.len(),
        channels.len(),
        groups.len()
    );

    let mut rows = Vec::with_capacity(users.len() + channels.len() + groups.len());
    rows.extend(project_users(users));
    rows.extend(project_channels(channels));
    rows.extend(project_groups(groups));

    Ok(rows)
}

/// Runs [`aggregate`] so that only the most recently started refresh yields
/// rows. Older refreshes still finish their requests but report
/// [`Error::Superseded`].
#[derive(Debug, Default)]
pub struct Aggregator {
    generation: AtomicU64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<D: Directory>(
        &self,
        client: &D,
        session: &Session,
    ) -> Result<Vec<Channelable>> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let rows = aggregate(client, session).await?;

        if self.generation.load(Ordering::SeqCst) != ticket {
            log::debug!("dropping results of refresh {ticket}");
            return Err(Error::Superseded);
        }

        Ok(rows)
    }
}
