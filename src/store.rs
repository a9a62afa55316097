// 🗄️ Grant Store - the CSV snapshot, loaded once and reused
// An explicit data-access object: construct it at startup, pass it by
// reference, call refresh() when a newer snapshot should be picked up.

use crate::normalize::{NormalizationEngine, NormalizedBatch, RejectReason, RowError};
use crate::record::{GrantRecord, RawGrantRow};
use crate::views::{self, DashboardData};
use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct GrantStore {
    /// Snapshot path, when the store is file-backed. Reader-backed stores
    /// (tests, external fetchers handing over CSV text) have none and
    /// cannot refresh.
    path: Option<PathBuf>,

    engine: NormalizationEngine,
    records: Vec<GrantRecord>,
    rejected: Vec<RowError>,
}

impl GrantStore {
    /// Load and normalize the snapshot at `path`.
    ///
    /// Fails only on I/O or CSV-structure problems. Rows that fail to
    /// normalize are kept in `rejected()`, not turned into errors.
    pub fn from_path(path: &Path, engine: NormalizationEngine) -> Result<Self> {
        let reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open snapshot: {}", path.display()))?;
        let batch = read_snapshot(reader, &engine);

        Ok(GrantStore {
            path: Some(path.to_path_buf()),
            engine,
            records: batch.records,
            rejected: batch.rejected,
        })
    }

    /// Load and normalize CSV text from any reader.
    pub fn from_reader<R: Read>(input: R, engine: NormalizationEngine) -> Self {
        let reader = csv::Reader::from_reader(input);
        let batch = read_snapshot(reader, &engine);

        GrantStore {
            path: None,
            engine,
            records: batch.records,
            rejected: batch.rejected,
        }
    }

    /// Re-read the snapshot from disk. Returns the new record count.
    pub fn refresh(&mut self) -> Result<usize> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => bail!("Cannot refresh a reader-backed store"),
        };

        let reader = csv::Reader::from_path(&path)
            .with_context(|| format!("Failed to reopen snapshot: {}", path.display()))?;
        let batch = read_snapshot(reader, &self.engine);

        self.records = batch.records;
        self.rejected = batch.rejected;
        Ok(self.records.len())
    }

    pub fn records(&self) -> &[GrantRecord] {
        &self.records
    }

    pub fn rejected(&self) -> &[RowError] {
        &self.rejected
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Build the four chart views from the cached records.
    /// `None` when the snapshot held no usable rows.
    pub fn dashboard(&self) -> Option<DashboardData> {
        views::build(&self.records)
    }
}

/// Decode and normalize every row. A row the CSV layer cannot decode is
/// rejected with the decode error; everything else goes through the engine.
fn read_snapshot<R: Read>(mut reader: csv::Reader<R>, engine: &NormalizationEngine) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for (i, result) in reader.deserialize::<RawGrantRow>().enumerate() {
        let line = i + 2; // 1-indexed, after the header row
        match result {
            Ok(row) => match engine.normalize_row(&row, line) {
                Ok(record) => batch.records.push(record),
                Err(err) => batch.rejected.push(err),
            },
            Err(err) => batch.rejected.push(RowError {
                line,
                grant: String::new(),
                reason: RejectReason::MalformedRow(err.to_string()),
            }),
        }
    }

    batch
}
