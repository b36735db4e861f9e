//! Fact sheet resolution from NCCIH detail pages.
//!
//! Detail pages list their downloadable documents in a
//! `<ul class="fslisticons">`; the first anchor there is the fact sheet.

use reqwest::blocking::Client;
use scraper::Html;
use url::Url;

use crate::catalog::CatalogItem;
use crate::error::{HarvesterError, Result};
use crate::html::{anchors, parse_page, selector};
use crate::http::fetch;

/// Anchors inside the fact sheet icon list.
pub const FACT_SHEET_SELECTOR: &str = r#"ul[class="fslisticons"] a"#;

/// A catalog item paired with its absolute fact sheet URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactSheetReference {
    pub item: CatalogItem,
    pub document_url: Url,
}

/// Outcome of looking up a fact sheet on a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(FactSheetReference),
    /// The detail page had no fact sheet link.
    NotFound { detail_link: String },
}

/// Parse `base` into a URL, keeping the offending string on failure.
pub fn parse_base(base: &str) -> Result<Url> {
    Url::parse(base).map_err(|source| HarvesterError::InvalidUrl {
        url: base.to_string(),
        source,
    })
}

/// Find the fact sheet link on a parsed detail page.
///
/// Takes the first anchor of the fact sheet list and resolves its `href`
/// against `base`. Returns `Ok(None)` when there is no such anchor, or when it
/// has no `href`.
///
/// # Examples
/// ```
/// use herb_harvester::factsheet::find_fact_sheet_link;
/// use herb_harvester::html::parse_page;
/// use url::Url;
///
/// let doc = parse_page(r#"<ul class="fslisticons"><li><a href="/health/ginseng/factsheet.pdf">PDF</a></li></ul>"#);
/// let base = Url::parse("https://nccih.nih.gov").unwrap();
/// let url = find_fact_sheet_link(&doc, &base).unwrap().unwrap();
/// assert_eq!(url.as_str(), "https://nccih.nih.gov/health/ginseng/factsheet.pdf");
/// ```
pub fn find_fact_sheet_link(doc: &Html, base: &Url) -> Result<Option<Url>> {
    let sel = selector(FACT_SHEET_SELECTOR)?;
    let Some(href) = anchors(doc, &sel).next().and_then(|a| a.href) else {
        return Ok(None);
    };

    let url = base.join(&href).map_err(|source| HarvesterError::InvalidUrl {
        url: href.clone(),
        source,
    })?;
    Ok(Some(url))
}

/// Fetch the detail page of `item` and resolve its fact sheet.
///
/// Non-success statuses are pushed onto `warnings`; the returned body is still
/// searched, which normally ends in [`Resolution::NotFound`].
pub fn resolve_fact_sheet(
    client: &Client,
    item: &CatalogItem,
    base: &Url,
    warnings: &mut Vec<String>,
) -> Result<Resolution> {
    let fetched = fetch(client, &item.detail_link)?;
    if let Some(problem) = fetched.problem() {
        warnings.push(problem);
    }
    let body = fetched.text()?;
    let doc = parse_page(&body);

    match find_fact_sheet_link(&doc, base)? {
        Some(document_url) => {
            tracing::debug!(name = %item.name, url = %document_url, "Fact sheet resolved");
            Ok(Resolution::Found(FactSheetReference {
                item: item.clone(),
                document_url,
            }))
        }
        None => Ok(Resolution::NotFound {
            detail_link: item.detail_link.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://nccih.nih.gov").unwrap()
    }

    fn link(html: &str) -> Option<Url> {
        find_fact_sheet_link(&parse_page(html), &base()).unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let html = r#"
            <ul class="fslisticons">
              <li><a href="/health/echinacea/factsheet.pdf">PDF</a></li>
              <li><a href="/health/echinacea/factsheet.epub">ePub</a></li>
            </ul>"#;
        assert_eq!(
            link(html).map(String::from),
            Some("https://nccih.nih.gov/health/echinacea/factsheet.pdf".to_string())
        );
    }

    #[test]
    fn test_absolute_link_is_kept() {
        let html = r#"<ul class="fslisticons"><li><a href="https://files.nccih.nih.gov/s/ginkgo.pdf">PDF</a></li></ul>"#;
        assert_eq!(
            link(html).map(String::from),
            Some("https://files.nccih.nih.gov/s/ginkgo.pdf".to_string())
        );
    }

    #[test]
    fn test_missing_list_is_not_found() {
        assert_eq!(link("<html><body><p>No fact sheet here</p></body></html>"), None);
    }

    #[test]
    fn test_other_lists_are_ignored() {
        let html = r#"<ul class="related"><li><a href="/health/other.pdf">Other</a></li></ul>"#;
        assert_eq!(link(html), None);
    }

    #[test]
    fn test_anchor_without_href_is_not_found() {
        let html = r#"<ul class="fslisticons"><li><a name="top">PDF</a></li></ul>"#;
        assert_eq!(link(html), None);
    }

    #[test]
    fn test_parse_base_rejects_garbage() {
        assert!(parse_base("https://nccih.nih.gov").is_ok());
        assert!(matches!(
            parse_base("nccih"),
            Err(HarvesterError::InvalidUrl { .. })
        ));
    }
}
