//! The `herblist.txt` manifest listing every harvested herb.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "herblist.txt";

/// First line of every manifest.
pub const MANIFEST_HEADER: &str =
    "Information was downloaded about the following herbs and supplements:";

/// Render the manifest: header line, then one name per line.
///
/// # Examples
/// ```
/// use herb_harvester::manifest::render_manifest;
///
/// let text = render_manifest(&["Ginseng".to_string()]);
/// assert!(text.ends_with("supplements:\nGinseng\n"));
/// ```
pub fn render_manifest(names: &[String]) -> String {
    let mut text = String::with_capacity(MANIFEST_HEADER.len() + 1 + names.len() * 16);
    text.push_str(MANIFEST_HEADER);
    text.push('\n');
    for name in names {
        text.push_str(name);
        text.push('\n');
    }
    text
}

/// Write the manifest into `dir`, replacing any previous one.
///
/// # Returns
/// Path of the written manifest.
pub fn write_manifest(dir: &Path, names: &[String]) -> Result<PathBuf> {
    let path = dir.join(MANIFEST_FILE_NAME);
    fs::write(&path, render_manifest(names))?;
    tracing::info!(path = %path.display(), entries = names.len(), "Manifest written");
    Ok(path)
}
