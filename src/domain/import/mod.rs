use std::collections::HashSet;

use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::{
    recipient::{is_wallet_address, parse_allocation, ImportRow, RowStatus},
    table::{Columns, CsvTable},
};
use crate::config::ImportConfig;

/// Outcome of classifying a recipient file, shown to the user before commit.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Every data row in the file, including rows past the preview window.
    pub total_wallets: usize,
    pub valid_wallets: usize,
    pub invalid_wallets: usize,
    pub duplicate_wallets: usize,
    /// Sum of allocations over valid rows, saturating at the `Decimal`
    /// bounds.
    pub valid_allocation: Decimal,
    pub preview_limit: usize,
    pub rows: Vec<ImportRow>,
}

impl ImportSummary {
    pub fn from_rows(total_wallets: usize, preview_limit: usize, rows: Vec<ImportRow>) -> Self {
        let counts = rows.iter().counts_by(|row| row.status);
        let count = |status: RowStatus| counts.get(&status).copied().unwrap_or(0);

        let valid_allocation = rows
            .iter()
            .filter(|row| row.is_valid())
            .map(|row| row.allocation)
            .fold(Decimal::ZERO, |total, allocation| total.saturating_add(allocation));

        Self {
            total_wallets,
            valid_wallets: count(RowStatus::Valid),
            invalid_wallets: count(RowStatus::Invalid),
            duplicate_wallets: count(RowStatus::Duplicate),
            valid_allocation,
            preview_limit,
            rows,
        }
    }

    /// A commit only makes sense with at least one valid recipient.
    pub fn can_commit(&self) -> bool {
        self.valid_wallets > 0
    }

    pub fn is_truncated(&self) -> bool {
        self.total_wallets > self.rows.len()
    }

    pub fn valid_rows(&self) -> impl Iterator<Item = &ImportRow> {
        self.rows.iter().filter(|row| row.is_valid())
    }
}

/// Classifies rows in file order, remembering every valid address seen so
/// far (lower-cased).
#[derive(Debug, Default)]
pub struct Validator {
    columns: Columns,
    seen: HashSet<String>,
}

impl Validator {
    pub fn new(columns: Columns) -> Self {
        Self {
            columns,
            seen: HashSet::new(),
        }
    }

    pub fn classify(&mut self, row: &[String]) -> ImportRow {
        let wallet = self.columns.wallet_cell(row).trim().to_owned();
        let allocation = parse_allocation(self.columns.allocation_cell(row));

        // Format wins over duplication: malformed repeats stay invalid.
        let status = if !is_wallet_address(&wallet) {
            RowStatus::Invalid
        } else if self.seen.insert(wallet.to_lowercase()) {
            RowStatus::Valid
        } else {
            RowStatus::Duplicate
        };

        ImportRow::new(wallet, allocation, status)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn summarize(&self, text: &str) -> ImportSummary {
        self.summarize_table(&CsvTable::parse(text))
    }

    pub fn summarize_table(&self, table: &CsvTable) -> ImportSummary {
        let limit = self.config.preview_limit;
        let mut validator = Validator::new(table.columns());

        let rows = table
            .rows
            .iter()
            .take(limit)
            .map(|row| validator.classify(row))
            .collect();

        let summary = ImportSummary::from_rows(table.rows.len(), limit, rows);
        debug!(
            total = summary.total_wallets,
            valid = summary.valid_wallets,
            invalid = summary.invalid_wallets,
            duplicate = summary.duplicate_wallets,
            "classified recipient file"
        );

        summary
    }
}

/// Classifies `text` with the default preview window.
pub fn summarize(text: &str) -> ImportSummary {
    Importer::default().summarize(text)
}
