//! Output-stage filters run over rendered HTML.
//!
//! Each filter returns the (possibly rewritten) HTML together with the URLs
//! it collected, so findings stay scoped to one render call.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static ANCHOR_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<a\shref[^>]+>").unwrap());
static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""(.*?)""#).unwrap());
static IMG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img.*?src=["'](.*?)["']"#).unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filtered {
    pub html: String,
    pub urls: Vec<String>,
}

pub trait OutputFilter: Send + Sync {
    fn name(&self) -> &'static str;
    fn filter(&self, html: &str) -> Filtered;
}

/// Collects `http(s)` anchor targets and opens them in a new tab.
/// Other anchors (in-page, `mailto:`, relative) are left byte-identical.
pub struct ExternalLinks;

impl OutputFilter for ExternalLinks {
    fn name(&self) -> &'static str {
        "externalLink"
    }

    fn filter(&self, html: &str) -> Filtered {
        let mut urls = Vec::new();
        let out = ANCHOR_TAG.replace_all(html, |caps: &Captures| {
            let tag = &caps[0];
            match QUOTED.captures(tag).map(|c| c[1].to_string()) {
                Some(url) if url.starts_with("http:") || url.starts_with("https:") => {
                    let rewritten = format!(r#"<a href="{}" target="_blank">"#, url);
                    urls.push(url);
                    rewritten
                }
                _ => tag.to_string(),
            }
        });
        Filtered {
            html: out.into_owned(),
            urls,
        }
    }
}

/// Collects every `<img src>` value; never rewrites.
pub struct ImageSources;

impl OutputFilter for ImageSources {
    fn name(&self) -> &'static str {
        "extractImageUrls"
    }

    fn filter(&self, html: &str) -> Filtered {
        let urls = IMG_SRC
            .captures_iter(html)
            .map(|c| c[1].to_string())
            .collect();
        Filtered {
            html: html.to_string(),
            urls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_link_rewritten_and_collected() {
        let out = ExternalLinks.filter(r#"<p><a href="https://example.com/x" title="t">x</a></p>"#);
        assert_eq!(
            out.html,
            r#"<p><a href="https://example.com/x" target="_blank">x</a></p>"#
        );
        assert_eq!(out.urls, vec!["https://example.com/x"]);
    }

    #[test]
    fn test_non_web_anchors_untouched() {
        let html = r##"<a href="#section">s</a> <a href="mailto:a@b.c">m</a> <a href="guide.md">g</a>"##;
        let out = ExternalLinks.filter(html);
        assert_eq!(out.html, html);
        assert!(out.urls.is_empty());
    }

    #[test]
    fn test_image_sources_collected_in_order() {
        let html = r#"<img src="a.png" alt=""><p>x</p><img alt="b" src='https://h/b.jpg'>"#;
        let out = ImageSources.filter(html);
        assert_eq!(out.html, html);
        assert_eq!(out.urls, vec!["a.png", "https://h/b.jpg"]);
    }
}
