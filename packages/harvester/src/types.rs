//! Core data types describing the outcome of a harvest run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::catalog::CatalogItem;

/// One fact sheet saved to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    pub name: String,
    pub document_url: Url,
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// A qualifying item left out because its detail page had no fact sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub name: String,
    pub detail_link: String,
}

/// Everything a run produced.
///
/// Built up by the driver as it walks the catalog and handed back at the end,
/// so nothing about a run lives in global state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
    /// Number of anchors found on the index page, qualifying or not.
    pub catalog_size: usize,
    pub downloaded: Vec<DownloadRecord>,
    pub skipped: Vec<SkippedItem>,
    /// Non-fatal problems: non-success HTTP statuses and length mismatches.
    pub warnings: Vec<String>,
}

impl HarvestReport {
    pub(crate) fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            ..Self::default()
        }
    }

    /// Names in manifest order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.downloaded.iter().map(|d| d.name.clone()).collect()
    }

    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.downloaded.iter().map(|d| d.bytes_written).sum()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, Copy)]
pub enum HarvestEvent<'a> {
    CatalogLoaded { total: usize, qualifying: usize },
    Resolving { item: &'a CatalogItem },
    Downloading { name: &'a str, url: &'a Url },
    Saved { record: &'a DownloadRecord },
    Skipped { item: &'a CatalogItem },
    HttpProblem { message: &'a str },
    /// Bytes on disk differ from the announced `Content-Length`.
    LengthMismatch { name: &'a str, expected: u64, written: u64 },
    Pausing { duration: Duration },
    ManifestWritten { path: &'a Path, entries: usize },
}
