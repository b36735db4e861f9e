//! Catalog extraction from the MedlinePlus herbs and supplements index.
//!
//! The index page groups its entries into `<section>` elements; every anchor
//! inside a section is a candidate item. Filtering by publisher happens in
//! the driver, not here.

use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::error::Result;
use crate::html::{anchors, parse_page, selector};
use crate::http::fetch;

/// Anchors inside the index page's listing sections.
pub const CATALOG_SELECTOR: &str = "section a";

/// One entry of the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: String,
    /// Outbound link; empty when the anchor had no `href`.
    pub detail_link: String,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, detail_link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail_link: detail_link.into(),
        }
    }

    /// Whether the detail link textually starts with `origin`.
    ///
    /// # Examples
    /// ```
    /// use herb_harvester::catalog::CatalogItem;
    ///
    /// let item = CatalogItem::new("Ginseng", "https://nccih.nih.gov/health/ginseng");
    /// assert!(item.is_from("https://nccih.nih.gov"));
    /// assert!(!item.is_from("https://ods.od.nih.gov"));
    /// ```
    pub fn is_from(&self, origin: &str) -> bool {
        !origin.is_empty() && self.detail_link.starts_with(origin)
    }
}

/// Lazily extract catalog items from a parsed index page, in document order.
pub fn extract_catalog<'a>(
    doc: &'a Html,
    sel: &'a Selector,
) -> impl Iterator<Item = CatalogItem> + 'a {
    anchors(doc, sel).map(|a| CatalogItem {
        name: a.text,
        detail_link: a.href.unwrap_or_default(),
    })
}

/// Fetch the index page at `url` and return every candidate item.
///
/// A non-success status is pushed onto `warnings`; whatever body came back is
/// still parsed, which usually means an empty catalog.
pub fn fetch_catalog(
    client: &Client,
    url: &str,
    warnings: &mut Vec<String>,
) -> Result<Vec<CatalogItem>> {
    let fetched = fetch(client, url)?;
    if let Some(problem) = fetched.problem() {
        warnings.push(problem);
    }
    let body = fetched.text()?;

    let doc = parse_page(&body);
    let sel = selector(CATALOG_SELECTOR)?;
    let items: Vec<CatalogItem> = extract_catalog(&doc, &sel).collect();

    tracing::info!(url, items = items.len(), "Catalog loaded");
    Ok(items)
}
