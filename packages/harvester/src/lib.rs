//! Herb Harvester - Download NCCIH herb and supplement fact sheets.
//!
//! This crate walks the MedlinePlus herbs and supplements index, follows the
//! entries published by NCCIH, downloads each fact sheet PDF into a local
//! directory and writes a `herblist.txt` manifest of what was fetched.
//!
//! # Example
//!
//! ```
//! use herb_harvester::catalog::CatalogItem;
//! use herb_harvester::config::TRUSTED_ORIGIN;
//!
//! let item = CatalogItem::new("Ginseng", "https://nccih.nih.gov/health/ginseng");
//! assert!(item.is_from(TRUSTED_ORIGIN));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and the per-run `HarvestConfig`
//! - [`error`]: Error types and Result alias
//! - [`http`]: Blocking HTTP fetcher with status tagging
//! - [`html`]: Lenient HTML parsing and anchor extraction
//! - [`catalog`]: Index page extraction
//! - [`factsheet`]: Detail page fact sheet resolution
//! - [`writer`]: Chunked file writing and file naming
//! - [`manifest`]: `herblist.txt` generation
//! - [`pacing`]: Delay policy between requests
//! - [`types`]: Run report and progress events
//! - [`harvester`]: Run driver
//! - [`cli`]: Command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod factsheet;
pub mod harvester;
pub mod html;
pub mod http;
pub mod manifest;
pub mod pacing;
pub mod types;
pub mod writer;

// Re-export main functions
pub use harvester::{harvest, harvest_with_events};

// Re-export commonly used items
pub use catalog::CatalogItem;
pub use config::{HarvestConfig, OnMissing};
pub use error::{HarvesterError, Result};
pub use factsheet::{FactSheetReference, Resolution};
pub use pacing::{NoPacing, Pacer, SleepPacer};
pub use types::{DownloadRecord, HarvestEvent, HarvestReport, SkippedItem};
