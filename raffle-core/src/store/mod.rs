use crate::roster::Roster;
use crate::Result;
use std::path::{Path, PathBuf};

/// JSON-backed persistence for the configured roster.
///
/// Only the configuration survives between CLI invocations; draw results are
/// deliberately not stored anywhere.
pub struct RosterFile {
    path: PathBuf,
}

impl RosterFile {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join("roster.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored roster; a missing file is an empty roster.
    pub async fn load(&self) -> Result<Roster> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Roster::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, roster: &Roster) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(roster)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!("roster saved to {}", self.path.display());
        Ok(())
    }
}
