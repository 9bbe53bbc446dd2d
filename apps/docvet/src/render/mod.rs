//! Markdown to HTML rendering with link and image collection.
//!
//! The comrak configuration is fixed: GitHub-style heading ids, emoji
//! shortcodes, GFM tables/strikethrough/autolinks/task lists, raw HTML
//! passthrough and syntect highlighting for fenced code. After conversion
//! the output filters run in order (external links, then images) and their
//! collected URLs are returned alongside the HTML.

pub mod filters;

use comrak::plugins::syntect::{SyntectAdapter, SyntectAdapterBuilder};
use comrak::{markdown_to_html_with_plugins, Options, Plugins};
use filters::{ExternalLinks, ImageSources, OutputFilter};

const THEME: &str = "base16-ocean.dark";

/// GFM block/inline extensions plus `---` front matter. Shared with the
/// lint pre-scan so both passes agree on document structure.
pub fn parse_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    options
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Result of one render pass.
pub struct Rendered {
    pub html: String,
    /// Anchor targets then image sources, each in document order.
    pub urls: Vec<String>,
}

pub struct Renderer {
    options: Options<'static>,
    highlighter: SyntectAdapter,
    filters: Vec<Box<dyn OutputFilter>>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut options = parse_options();
        options.extension.header_ids = Some(String::new());
        options.extension.shortcodes = true;
        // docs embed <a>/<img> tags directly; they must survive to the filters
        options.render.unsafe_ = true;

        Renderer {
            options,
            highlighter: SyntectAdapterBuilder::new().theme(THEME).build(),
            filters: vec![Box::new(ExternalLinks), Box::new(ImageSources)],
        }
    }

    pub fn render(&self, markdown: &str) -> Rendered {
        let mut plugins = Plugins::default();
        plugins.render.codefence_syntax_highlighter = Some(&self.highlighter);
        let mut html = markdown_to_html_with_plugins(markdown, &self.options, &plugins);

        let mut urls = Vec::new();
        for f in &self.filters {
            let out = f.filter(&html);
            tracing::trace!(filter = f.name(), collected = out.urls.len(), "output filter");
            html = out.html;
            urls.extend(out.urls);
        }
        Rendered { html, urls }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}
