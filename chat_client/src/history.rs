use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Who {
    User,
    Bot,
}

/// Same shape the web page keeps in local storage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub who: Who,
    pub text: String,
    pub time: String,
}

impl HistoryEntry {
    pub fn render(&self) -> String {
        let who = match self.who {
            Who::User => "you",
            Who::Bot => "bot",
        };
        format!("[{}] {}> {}", self.time, who, self.text)
    }
}

#[derive(Debug, Default)]
pub struct History {
    path: Option<PathBuf>,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// A missing or unreadable file yields an empty history.
    pub fn load(path: Option<PathBuf>) -> Self {
        let entries = match &path {
            Some(path) if path.exists() => match read_entries(path) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Ignoring history at {}: {:?}", path.display(), e);
                    Vec::new()
                }
            },
            _ => Vec::new(),
        };
        Self { path, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn push(&mut self, who: Who, text: &str) -> &HistoryEntry {
        self.entries.push(HistoryEntry {
            who,
            text: text.to_owned(),
            time: chrono::Local::now().format("%H:%M").to_string(),
        });
        &self.entries[self.entries.len() - 1]
    }

    /// No-op without a backing file.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string(&self.entries)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write history to {}", path.display()))
    }
}

fn read_entries(path: &Path) -> Result<Vec<HistoryEntry>> {
    let raw = std::fs::read_to_string(path)?;
    let entries = serde_json::from_str(&raw)?;
    Ok(entries)
}
