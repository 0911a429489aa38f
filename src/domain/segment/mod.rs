use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named group of recipient wallets targeted by campaigns.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: Uuid,
    pub name: String,
    pub recipients: Vec<String>,
}

/// Estimated audience size when two segments are merged.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergePreview {
    /// Sum of both segment sizes.
    pub combined: usize,
    /// Distinct wallets across both segments, compared case-insensitively.
    pub unique: usize,
}

impl Segment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            recipients: Vec::new(),
        }
    }

    pub fn with_recipients(mut self, recipients: impl IntoIterator<Item = String>) -> Self {
        self.add_recipients(recipients);
        self
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    /// Appends wallets not already present (case-insensitive). Returns how
    /// many were added.
    pub fn add_recipients(&mut self, recipients: impl IntoIterator<Item = String>) -> usize {
        let mut known: HashSet<String> = self
            .recipients
            .iter()
            .map(|wallet| wallet.to_lowercase())
            .collect();
        let before = self.recipients.len();

        self.recipients.extend(
            recipients
                .into_iter()
                .filter(|wallet| known.insert(wallet.to_lowercase())),
        );

        self.recipients.len() - before
    }

    pub fn merge_preview(&self, other: &Segment) -> MergePreview {
        let unique = self
            .recipients
            .iter()
            .chain(&other.recipients)
            .map(|wallet| wallet.to_lowercase())
            .collect::<HashSet<_>>()
            .len();

        MergePreview {
            combined: self.len() + other.len(),
            unique,
        }
    }
}
