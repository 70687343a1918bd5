//! CSV export of a result set.

use super::result_set::ResultSet;
use crate::core::{AnalysisError, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CsvRow<'a> {
    original: &'a str,
    cleaned: &'a str,
    sentiment: u8,
}

impl ResultSet {
    /// UTF-8 CSV with columns `original,cleaned,sentiment`, one row per post.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for post in self.posts() {
            writer
                .serialize(CsvRow {
                    original: &post.original,
                    cleaned: &post.cleaned,
                    sentiment: post.sentiment.value(),
                })
                .map_err(|e| AnalysisError::Export(e.to_string()))?;
        }
        writer
            .into_inner()
            .map_err(|e| AnalysisError::Export(e.to_string()))
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_csv()?;
        std::fs::write(path, bytes)
            .map_err(|e| AnalysisError::Export(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), rows = self.len(), "exported results");
        Ok(())
    }
}
