//! Configuration constants and the per-run harvest configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// MedlinePlus index page listing all herbs and supplements.
pub const INDEX_URL: &str = "https://www.nlm.nih.gov/medlineplus/druginfo/herb_All.html";

/// Catalog links must start with this string to be harvested.
pub const TRUSTED_ORIGIN: &str = "https://nccih.nih.gov";

/// Origin that relative fact sheet links are resolved against.
pub const FACT_SHEET_BASE: &str = "https://nccih.nih.gov";

/// Directory (relative to the working directory) receiving all output.
pub const OUTPUT_DIR_NAME: &str = "nccihherbfactsheets";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Pause after resolving a fact sheet, before downloading it.
pub const FIRST_DELAY: Duration = Duration::from_secs(5);

/// Pause after saving a fact sheet, before the next item.
pub const SECOND_DELAY: Duration = Duration::from_secs(10);

/// What to do when a detail page has no fact sheet link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnMissing {
    /// Stop the whole run; the manifest is not written.
    #[default]
    Abort,
    /// Log the item, leave it out of the manifest and carry on.
    Skip,
}

impl OnMissing {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for OnMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnMissing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown policy '{other}', expected 'abort' or 'skip'")),
        }
    }
}

/// Everything a run needs to know about where to read from and write to.
///
/// `Default` reproduces the fixed production behaviour. The `with_*` methods
/// exist so tests can point a run at a mock server and a temporary directory.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub index_url: String,
    pub trusted_origin: String,
    pub fact_sheet_base: String,
    pub output_dir: PathBuf,
    pub first_delay: Duration,
    pub second_delay: Duration,
    pub timeout: Duration,
    pub on_missing: OnMissing,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            index_url: INDEX_URL.to_string(),
            trusted_origin: TRUSTED_ORIGIN.to_string(),
            fact_sheet_base: FACT_SHEET_BASE.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR_NAME),
            first_delay: FIRST_DELAY,
            second_delay: SECOND_DELAY,
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            on_missing: OnMissing::Abort,
        }
    }
}

impl HarvestConfig {
    #[must_use]
    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into();
        self
    }

    #[must_use]
    pub fn with_trusted_origin(mut self, origin: impl Into<String>) -> Self {
        self.trusted_origin = origin.into();
        self
    }

    #[must_use]
    pub fn with_fact_sheet_base(mut self, base: impl Into<String>) -> Self {
        self.fact_sheet_base = base.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_on_missing(mut self, policy: OnMissing) -> Self {
        self.on_missing = policy;
        self
    }
}
