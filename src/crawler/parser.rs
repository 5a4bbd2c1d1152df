//! HTML link extraction
//!
//! Pulls the absolute targets of `<a href="...">` elements out of a page.
//!
//! **Excluded:**
//! - `<a href="..." download>`
//! - `javascript:`, `mailto:`, `tel:` and `data:` hrefs
//! - Fragment-only hrefs (same-page anchors)
//! - Anything that does not resolve to an http(s) URL
//!
//! Resolved URLs are returned as-is; no further normalization is applied.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the distinct absolute link targets found in `html`
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL relative links are resolved against
///
/// # Example
///
/// ```
/// use breadth_crawl::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about">About</a><a href="mailto:me@example.com">Mail</a>"#;
/// let base = Url::parse("https://example.com/index.html").unwrap();
/// let links = extract_links(html, &base);
/// assert!(links.contains("https://example.com/about"));
/// assert_eq!(links.len(), 1);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.insert(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/dir/page").unwrap()
    }

    #[test]
    fn test_absolute_links() {
        let html = r#"<a href="https://other.com/x">x</a><a href="http://example.com/y">y</a>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 2);
        assert!(links.contains("https://other.com/x"));
        assert!(links.contains("http://example.com/y"));
    }

    #[test]
    fn test_relative_links_resolved() {
        let html = r#"<a href="/root">r</a><a href="sibling">s</a><a href="../up">u</a>"#;
        let links = extract_links(html, &base_url());
        assert!(links.contains("https://example.com/root"));
        assert!(links.contains("https://example.com/dir/sibling"));
        assert!(links.contains("https://example.com/up"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let html = r#"<a href="/a">1</a><a href="/a">2</a><a href="https://example.com/a">3</a>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_special_schemes_skipped() {
        let html = r##"
            <a href="javascript:void(0)">js</a>
            <a href="MAILTO:a@b.com">mail</a>
            <a href="tel:123">tel</a>
            <a href="data:text/plain,hi">data</a>
            <a href="ftp://example.com/file">ftp</a>
            <a href="#top">anchor</a>
            <a href="">empty</a>
        "##;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_download_links_skipped() {
        let html = r#"<a href="/file.zip" download>get</a><a href="/ok">ok</a>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/ok"));
    }

    #[test]
    fn test_anchors_without_href_ignored() {
        let html = r#"<a name="x">x</a><link rel="canonical" href="/canon">"#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_fragment_kept_on_full_links() {
        let html = r#"<a href="/page#section">s</a>"#;
        let links = extract_links(html, &base_url());
        assert!(links.contains("https://example.com/page#section"));
    }
}
