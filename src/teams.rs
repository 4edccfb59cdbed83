//! Saved team credentials.
//!
//! Teams live in a JSON preferences file under the `teams` key as a list of
//! `{name, token, image}` maps. Other keys in the file are left alone.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::Result;

pub const TEAMS_KEY: &str = "teams";

#[derive(Deserialize, Serialize, Display, Debug, Clone, PartialEq, Eq)]
#[display(fmt = "{}", name)]
pub struct TeamRecord {
    pub name: String,
    pub token: String,

    /// Team icon URL
    pub image: String,
}

#[derive(Debug, Clone)]
pub struct TeamStore {
    path: PathBuf,
}

impl TeamStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> Result<Vec<TeamRecord>> {
        let mut preferences = self.read_preferences()?;

        match preferences.remove(TEAMS_KEY) {
            Some(teams) => Ok(serde_json::from_value(teams)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn find(&self, name: &str) -> Result<Option<TeamRecord>> {
        Ok(self.list()?.into_iter().find(|team| team.name == name))
    }

    /// Appends `record` unless a team with the same name is already saved.
    ///
    /// Returns whether the record was written.
    pub fn append(&self, record: TeamRecord) -> Result<bool> {
        let mut preferences = self.read_preferences()?;
        let mut teams: Vec<TeamRecord> = match preferences.remove(TEAMS_KEY) {
            Some(teams) => serde_json::from_value(teams)?,
            None => Vec::new(),
        };

        if teams.iter().any(|team| team.name == record.name) {
            log::info!("team `{}` is already saved, skipping", record.name);
            return Ok(false);
        }

        log::debug!("saving team `{}` to {}", record.name, self.path.display());
        teams.push(record);
        preferences.insert(TEAMS_KEY.to_string(), serde_json::to_value(teams)?);

        self.write_preferences(&preferences)?;
        Ok(true)
    }

    fn read_preferences(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    // Staged next to the target so the final rename never crosses filesystems
    fn write_preferences(&self, preferences: &Map<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let staged = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(staged.as_file());
            serde_json::to_writer_pretty(&mut writer, preferences)?;
            writer.flush()?;
        }
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}
