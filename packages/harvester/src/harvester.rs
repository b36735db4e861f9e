//! Main harvester service that ties all components together.
//!
//! A run walks `Init -> FetchCatalog -> process each qualifying item ->
//! WriteManifest`. The manifest is only written once every item has been
//! handled, so a fatal error leaves earlier downloads on disk and no manifest.

use std::fs;
use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::catalog::{fetch_catalog, CatalogItem};
use crate::config::{HarvestConfig, OnMissing};
use crate::error::{HarvesterError, Result};
use crate::factsheet::{parse_base, resolve_fact_sheet, FactSheetReference, Resolution};
use crate::http::{create_client, fetch};
use crate::manifest::write_manifest;
use crate::pacing::Pacer;
use crate::types::{DownloadRecord, HarvestEvent, HarvestReport, SkippedItem};
use crate::writer::{file_name_from_url, write_to_file};

/// Harvest every NCCIH fact sheet listed on the configured index page.
///
/// # Arguments
/// * `config` - Where to read from and write to
/// * `pacer` - Courtesy delay policy between requests
///
/// # Returns
/// A `HarvestReport` describing downloaded files, skipped items and warnings
pub fn harvest(config: &HarvestConfig, pacer: &dyn Pacer) -> Result<HarvestReport> {
    harvest_with_events(config, pacer, &mut |_| {})
}

/// Same as [`harvest`], reporting progress through `on_event`.
pub fn harvest_with_events(
    config: &HarvestConfig,
    pacer: &dyn Pacer,
    on_event: &mut dyn FnMut(&HarvestEvent<'_>),
) -> Result<HarvestReport> {
    // Init
    fs::create_dir_all(&config.output_dir)?;
    let client = create_client(config.timeout)?;
    let base = parse_base(&config.fact_sheet_base)?;
    let mut report = HarvestReport::new(&config.output_dir);

    // FetchCatalog
    let catalog = fetch_catalog(&client, &config.index_url, &mut report.warnings)?;
    emit_new_warnings(&report, 0, on_event);
    report.catalog_size = catalog.len();

    let qualifying = catalog
        .iter()
        .filter(|item| item.is_from(&config.trusted_origin))
        .count();
    on_event(&HarvestEvent::CatalogLoaded {
        total: catalog.len(),
        qualifying,
    });

    // FilterAndProcessEach
    for item in &catalog {
        if !item.is_from(&config.trusted_origin) {
            tracing::debug!(name = %item.name, link = %item.detail_link, "Skipping untrusted source");
            continue;
        }
        process_item(&client, config, &base, pacer, item, &mut report, on_event)?;
    }

    // WriteManifest
    let names = report.names();
    report.manifest_path = write_manifest(&config.output_dir, &names)?;
    on_event(&HarvestEvent::ManifestWritten {
        path: &report.manifest_path,
        entries: names.len(),
    });

    Ok(report)
}

/// Resolve, download and save the fact sheet of one qualifying item.
fn process_item(
    client: &Client,
    config: &HarvestConfig,
    base: &Url,
    pacer: &dyn Pacer,
    item: &CatalogItem,
    report: &mut HarvestReport,
    on_event: &mut dyn FnMut(&HarvestEvent<'_>),
) -> Result<()> {
    on_event(&HarvestEvent::Resolving { item });

    let seen = report.warnings.len();
    let resolution = resolve_fact_sheet(client, item, base, &mut report.warnings)?;
    emit_new_warnings(report, seen, on_event);

    let reference = match resolution {
        Resolution::Found(reference) => reference,
        Resolution::NotFound { detail_link } => match config.on_missing {
            OnMissing::Abort => {
                return Err(HarvesterError::MissingFactSheet {
                    name: item.name.clone(),
                    detail_link,
                });
            }
            OnMissing::Skip => {
                tracing::warn!(name = %item.name, link = %detail_link, "No fact sheet found, skipping");
                report.skipped.push(SkippedItem {
                    name: item.name.clone(),
                    detail_link,
                });
                on_event(&HarvestEvent::Skipped { item });
                return Ok(());
            }
        },
    };

    pause(pacer, config.first_delay, on_event);

    let record = download(client, config, &reference, report, on_event)?;
    on_event(&HarvestEvent::Saved { record: &record });
    report.downloaded.push(record);

    pause(pacer, config.second_delay, on_event);
    Ok(())
}

/// Fetch the fact sheet and stream it into the output directory.
fn download(
    client: &Client,
    config: &HarvestConfig,
    reference: &FactSheetReference,
    report: &mut HarvestReport,
    on_event: &mut dyn FnMut(&HarvestEvent<'_>),
) -> Result<DownloadRecord> {
    let name = &reference.item.name;
    let url = &reference.document_url;
    let path = config.output_dir.join(file_name_from_url(url)?);

    tracing::info!(%url, "Downloading information about {name}");
    on_event(&HarvestEvent::Downloading { name, url });

    let fetched = fetch(client, url.as_str())?;
    if let Some(problem) = fetched.problem() {
        on_event(&HarvestEvent::HttpProblem { message: &problem });
        report.warnings.push(problem);
    }
    let expected = fetched.content_length();
    let bytes_written = write_to_file(fetched.into_reader(), &path)?;
    if let Some(expected) = length_mismatch(expected, bytes_written) {
        tracing::debug!(%url, expected, bytes_written, "Download length mismatch");
        on_event(&HarvestEvent::LengthMismatch {
            name,
            expected,
            written: bytes_written,
        });
        report.warnings.push(format!(
            "expected {expected} bytes but wrote {bytes_written} for url ({url})"
        ));
    }

    Ok(DownloadRecord {
        name: name.clone(),
        document_url: url.clone(),
        path,
        bytes_written,
    })
}

/// The announced `Content-Length` when it differs from what reached disk.
///
/// Servers that announce no length are never reported.
fn length_mismatch(expected: Option<u64>, written: u64) -> Option<u64> {
    expected.filter(|&announced| announced != written)
}

fn pause(pacer: &dyn Pacer, duration: Duration, on_event: &mut dyn FnMut(&HarvestEvent<'_>)) {
    on_event(&HarvestEvent::Pausing { duration });
    pacer.pause(duration);
}

/// Emit an `HttpProblem` event for each warning from index `from` on.
fn emit_new_warnings(
    report: &HarvestReport,
    from: usize,
    on_event: &mut dyn FnMut(&HarvestEvent<'_>),
) {
    for message in &report.warnings[from..] {
        on_event(&HarvestEvent::HttpProblem { message });
    }
}
