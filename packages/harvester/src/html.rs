//! HTML utility functions for parsing pages and pulling out anchors.

use scraper::{ElementRef, Html, Selector};

use crate::error::{HarvesterError, Result};

/// Parse HTML text into a document tree.
///
/// Parsing is lenient: malformed markup is repaired the way a browser would,
/// so this never fails. An empty body yields an empty document.
///
/// # Examples
/// ```
/// use herb_harvester::html::{parse_page, selector};
///
/// let doc = parse_page("<section><a href='/x'>X</a>");
/// let sel = selector("section a").unwrap();
/// assert_eq!(doc.select(&sel).count(), 1);
/// ```
pub fn parse_page(text: &str) -> Html {
    Html::parse_document(text)
}

/// Compile a CSS selector.
///
/// # Examples
/// ```
/// use herb_harvester::html::selector;
///
/// assert!(selector(r#"ul[class="fslisticons"] a"#).is_ok());
/// assert!(selector("ul[").is_err());
/// ```
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| HarvesterError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Visible text of an element, whitespace runs collapsed to single spaces.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// An anchor element reduced to what the harvester needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: Option<String>,
    pub text: String,
}

impl From<ElementRef<'_>> for Anchor {
    fn from(el: ElementRef<'_>) -> Self {
        Self {
            href: el.value().attr("href").map(|h| h.trim().to_string()),
            text: element_text(el),
        }
    }
}

/// Lazily yield every element matching `sel` as an [`Anchor`], in document order.
pub fn anchors<'a>(doc: &'a Html, sel: &'a Selector) -> impl Iterator<Item = Anchor> + 'a {
    doc.select(sel).map(Anchor::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_element_text_collapses_whitespace() {
        let doc = parse_page("<p>  Saw\n   <b>Palmetto</b>  </p>");
        let sel = selector("p").unwrap();
        let p = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(p), "Saw Palmetto");
    }

    #[test]
    fn test_anchors_in_document_order() {
        let html = r#"<section>
            <a href="https://a.example/1">One</a>
            <a>Two</a>
            <a href=" /3 ">Three</a>
        </section>"#;
        let doc = parse_page(html);
        let sel = selector("section a").unwrap();
        let found: Vec<Anchor> = anchors(&doc, &sel).collect();

        assert_eq!(
            found,
            vec![
                Anchor {
                    href: Some("https://a.example/1".to_string()),
                    text: "One".to_string()
                },
                Anchor {
                    href: None,
                    text: "Two".to_string()
                },
                Anchor {
                    href: Some("/3".to_string()),
                    text: "Three".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let doc = parse_page("<section><p><a href='/x'>unclosed<div></section>");
        let sel = selector("section a").unwrap();
        assert_eq!(anchors(&doc, &sel).count(), 1);
    }

    #[test]
    fn test_attribute_equality_is_exact() {
        let html = r#"<ul class="fslisticons extra"><a href="/no">no</a></ul>
                      <ul class="fslisticons"><a href="/yes">yes</a></ul>"#;
        let doc = parse_page(html);
        let sel = selector(r#"ul[class="fslisticons"] a"#).unwrap();
        let hrefs: Vec<_> = anchors(&doc, &sel).filter_map(|a| a.href).collect();
        assert_eq!(hrefs, vec!["/yes".to_string()]);
    }

    #[test]
    fn test_invalid_selector() {
        let err = selector("a[").unwrap_err();
        assert!(matches!(err, HarvesterError::InvalidSelector { .. }));
    }
}
