//! Writing downloaded documents to disk.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use url::Url;

use crate::error::{HarvesterError, Result};

/// Largest slice of a payload held in memory at once.
pub const CHUNK_SIZE: usize = 100_000;

/// Stream `payload` into `path` in chunks of at most [`CHUNK_SIZE`] bytes.
///
/// The file is created or truncated. Parent directories must already exist.
///
/// # Returns
/// Number of bytes written.
pub fn write_to_file<R: Read>(mut payload: R, path: &Path) -> Result<u64> {
    let file = File::create(path)?;
    let mut out = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut written: u64 = 0;

    loop {
        let n = match payload.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        out.write_all(&chunk[..n])?;
        written += n as u64;
    }

    out.flush()?;
    tracing::debug!(path = %path.display(), bytes = written, "File written");
    Ok(written)
}

/// Derive a local file name from the last path segment of `url`.
///
/// The segment is used as-is, percent escapes included, so distinct URLs
/// never collapse onto the same file and an escaped `/` cannot leave the
/// output directory.
///
/// # Examples
/// ```
/// use herb_harvester::writer::file_name_from_url;
/// use url::Url;
///
/// let url = Url::parse("https://nccih.nih.gov/health/ginseng/factsheet.pdf").unwrap();
/// assert_eq!(file_name_from_url(&url).unwrap(), "factsheet.pdf");
/// ```
pub fn file_name_from_url(url: &Url) -> Result<String> {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(HarvesterError::NoFileName(url.to_string()));
    }
    Ok(segment.to_string())
}
