use crate::engine::{FacetSelections, SortKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Snapshot persisted across sessions: the four facet selections plus the
/// sort key. The search query is session-local and never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedPreferences {
    pub selections: FacetSelections,
    pub sort_key: SortKey,
}

/// Best-effort preference persistence: one JSON blob under one fixed path,
/// overwritten whole on every save. Load never fails (missing or corrupt
/// storage yields defaults) and save swallows write errors, so persistence
/// can never break the session.
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> PersistedPreferences {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => {
                debug!(path = %self.path.display(), "no stored preferences, using defaults");
                return PersistedPreferences::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "stored preferences unreadable, using defaults");
                PersistedPreferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &PersistedPreferences) {
        let json = match serde_json::to_string_pretty(prefs) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "could not serialize preferences");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), %err, "could not write preferences");
        }
    }
}
