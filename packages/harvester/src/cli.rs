//! Command-line interface for the harvester.

use std::path::PathBuf;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{HarvestConfig, OnMissing, OUTPUT_DIR_NAME};
use crate::error::Result;
use crate::harvester::harvest_with_events;
use crate::pacing::{NoPacing, Pacer, SleepPacer};
use crate::types::{HarvestEvent, HarvestReport};

/// Herb harvester - Download NCCIH herb and supplement fact sheets listed by MedlinePlus.
#[derive(Parser)]
#[command(name = "herb-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output directory for fact sheets and herblist.txt
    #[arg(short, long, default_value = OUTPUT_DIR_NAME)]
    pub output: PathBuf,

    /// What to do when a detail page has no fact sheet: abort or skip
    #[arg(long, default_value_t = OnMissing::Abort)]
    pub on_missing: OnMissing,

    /// Do not pause between requests
    #[arg(long)]
    pub no_delay: bool,
}

impl Cli {
    /// Harvest configuration described by the parsed flags.
    pub fn to_config(&self) -> HarvestConfig {
        HarvestConfig::default()
            .with_output_dir(&self.output)
            .with_on_missing(self.on_missing)
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config();

    let pacer: Box<dyn Pacer> = if cli.no_delay {
        Box::new(NoPacing)
    } else {
        Box::new(SleepPacer)
    };

    println!(
        "{} {}",
        style("Harvesting fact sheets into").bold(),
        style(config.output_dir.display()).cyan()
    );
    println!();

    let mut reporter = ConsoleReporter::default();
    let result = harvest_with_events(&config, pacer.as_ref(), &mut |event| reporter.handle(event));
    reporter.clear();

    print_summary(&result?);
    Ok(())
}

/// Prints progress lines and shows a spinner while the harvester is pausing.
#[derive(Default)]
struct ConsoleReporter {
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    fn handle(&mut self, event: &HarvestEvent<'_>) {
        self.clear();

        match event {
            HarvestEvent::CatalogLoaded { total, qualifying } => {
                println!(
                    "  Catalog: {} entries, {} from NCCIH",
                    total,
                    style(qualifying).green()
                );
            }
            HarvestEvent::Resolving { item } => {
                tracing::debug!(name = %item.name, "Resolving fact sheet");
            }
            HarvestEvent::Downloading { name, url } => {
                println!(
                    "{} {} from {}",
                    style("Downloading information about").bold(),
                    style(name).green(),
                    style(url).cyan()
                );
            }
            HarvestEvent::Saved { record } => {
                println!(
                    "  Saved {} ({} bytes)",
                    record.path.display(),
                    record.bytes_written
                );
            }
            HarvestEvent::Skipped { item } => {
                println!(
                    "  {} {} has no fact sheet",
                    style("Skipped:").yellow().bold(),
                    item.name
                );
            }
            HarvestEvent::HttpProblem { message } => {
                println!(
                    "  {} {}",
                    style("There was a problem:").yellow().bold(),
                    message
                );
            }
            HarvestEvent::LengthMismatch {
                name,
                expected,
                written,
            } => {
                println!(
                    "  {} {} announced {} bytes, wrote {}",
                    style("Incomplete:").yellow().bold(),
                    name,
                    expected,
                    written
                );
            }
            HarvestEvent::Pausing { duration } => {
                let pb = ProgressBar::new_spinner();
                #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg}")
                        .expect("valid template"),
                );
                pb.set_message(format!("Waiting {}s before the next request...", duration.as_secs()));
                pb.enable_steady_tick(std::time::Duration::from_millis(100));
                self.spinner = Some(pb);
            }
            HarvestEvent::ManifestWritten { path, entries } => {
                tracing::debug!(path = %path.display(), entries, "Manifest written");
            }
        }
    }

    fn clear(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

fn print_summary(report: &HarvestReport) {
    println!();
    println!("  Fact sheets: {}", style(report.downloaded.len()).green());
    if !report.skipped.is_empty() {
        println!("  Skipped: {}", style(report.skipped.len()).yellow().bold());
    }
    if !report.warnings.is_empty() {
        println!("  Warnings: {}", style(report.warning_count()).yellow().bold());
    }
    println!(
        "{} {}",
        style("Saved list to:").green().bold(),
        report.manifest_path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_arguments() {
        let cli = Cli::parse_from(["herb-harvester"]);

        assert_eq!(cli.output, PathBuf::from("nccihherbfactsheets"));
        assert_eq!(cli.on_missing, OnMissing::Abort);
        assert!(!cli.no_delay);
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = Cli::parse_from([
            "herb-harvester",
            "--output",
            "/tmp/herbs",
            "--on-missing",
            "skip",
            "--no-delay",
        ]);

        assert_eq!(cli.output, PathBuf::from("/tmp/herbs"));
        assert_eq!(cli.on_missing, OnMissing::Skip);
        assert!(cli.no_delay);
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["herb-harvester", "--on-missing", "retry"]).is_err());
    }

    #[test]
    fn test_to_config_keeps_fixed_sources() {
        let cli = Cli::parse_from(["herb-harvester", "-o", "out", "--on-missing", "skip"]);
        let config = cli.to_config();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.on_missing, OnMissing::Skip);
        assert_eq!(config.index_url, crate::config::INDEX_URL);
        assert_eq!(config.trusted_origin, crate::config::TRUSTED_ORIGIN);
    }
}
