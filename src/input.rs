use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::EngineError;
use crate::model::{Answer, Email, Question, Team};
use crate::store::Competition;

/// Raw competition snapshot as it sits on disk, before validation.
/// All sections are optional so a partial snapshot still parses.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub emails: Vec<Email>,
}

impl Snapshot {
    /// Validate the snapshot and build the queryable competition store.
    pub fn into_competition(self) -> Result<Competition, EngineError> {
        Competition::new(self.teams, self.questions, self.answers, self.emails)
    }
}

/// Load a snapshot from a YAML file, or JSON when the file carries a
/// `.json` extension.
///
/// # Errors
///
/// Returns an error if:
/// - The snapshot file does not exist
/// - The snapshot file cannot be read
/// - The YAML or JSON cannot be parsed
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        anyhow::bail!("Snapshot file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot at {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    let snapshot: Snapshot = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: invalid YAML in {}", path.display()))?
    };

    Ok(snapshot)
}
