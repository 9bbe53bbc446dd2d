//! Line-level view of a Markdown file shared by all rules.
//!
//! Block structure comes from comrak's AST: headings, code blocks, HTML
//! blocks and front matter are located by `sourcepos` and mapped back onto
//! the raw lines, so line rules can skip code and headings inside HTML
//! comments are never seen as headings.

use crate::render::parse_options;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    FrontMatter,
    /// Opening code fence with its info string (may be empty).
    FenceOpen(String),
    FenceClose,
    /// Fenced body or indented code.
    Code,
    /// Raw HTML block, including comments.
    Html,
    Text,
}

#[derive(Debug, Clone)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    pub text: &'a str,
    pub kind: LineKind,
}

impl Line<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn in_code(&self) -> bool {
        matches!(
            self.kind,
            LineKind::FenceOpen(_) | LineKind::FenceClose | LineKind::Code
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    Atx,
    Setext,
}

#[derive(Debug, Clone)]
pub struct Heading {
    /// 0-based index of the first heading line.
    pub index: usize,
    /// 0-based index of the last heading line (the underline for setext).
    pub end: usize,
    pub level: u8,
    pub text: String,
    pub style: HeadingStyle,
    /// Leading whitespace on the heading line.
    pub indent: usize,
    /// Whitespace between the `#` run and the text (ATX only).
    pub gap: usize,
}

impl Heading {
    pub fn end_index(&self) -> usize {
        self.end
    }
}

#[derive(Debug)]
pub struct Document<'a> {
    pub source: &'a str,
    pub lines: Vec<Line<'a>>,
    pub headings: Vec<Heading>,
    /// `title:` key present in front matter.
    pub front_matter_title: bool,
}

impl<'a> Document<'a> {
    pub fn parse(source: &'a str) -> Self {
        let mut lines: Vec<Line<'a>> = source
            .lines()
            .enumerate()
            .map(|(i, text)| Line {
                number: i + 1,
                text,
                kind: LineKind::Text,
            })
            .collect();
        let mut headings = Vec::new();
        let mut front_matter_title = false;

        let arena = Arena::new();
        let options = parse_options();
        let root = parse_document(&arena, source, &options);
        // body positions restart at line 1 after front matter
        let mut offset = 0;

        for node in root.descendants() {
            let ast = node.data.borrow();
            // sourcepos lines are 1-based; an empty span has line 0
            let start = ast.sourcepos.start.line.saturating_sub(1) + offset;
            let end = (ast.sourcepos.end.line.saturating_sub(1) + offset).max(start);
            match &ast.value {
                NodeValue::FrontMatter(literal) => {
                    let (span, title) = scan_front_matter(literal);
                    front_matter_title = title;
                    offset = literal.matches('\n').count();
                    mark(&mut lines, 0, span.saturating_sub(1), LineKind::FrontMatter);
                }
                NodeValue::CodeBlock(cb) => {
                    mark(&mut lines, start, end, LineKind::Code);
                    if cb.fenced {
                        mark(&mut lines, start, start, LineKind::FenceOpen(cb.info.clone()));
                        let closed = end > start
                            && lines
                                .get(end)
                                .map(|l| is_closing_fence(l.text, cb.fence_char, cb.fence_length))
                                .unwrap_or(false);
                        if closed {
                            mark(&mut lines, end, end, LineKind::FenceClose);
                        }
                    }
                }
                NodeValue::HtmlBlock(html) => {
                    // sourcepos stops short of a `-->`-style closing line
                    let last = start + html.literal.lines().count().saturating_sub(1);
                    mark(&mut lines, start, last.max(end), LineKind::Html);
                }
                NodeValue::Heading(h) => {
                    let raw = lines.get(start).map(|l| l.text).unwrap_or("");
                    let style = if h.setext {
                        HeadingStyle::Setext
                    } else {
                        HeadingStyle::Atx
                    };
                    let indent = raw.len() - raw.trim_start().len();
                    let gap = match style {
                        HeadingStyle::Atx => atx_gap(raw),
                        HeadingStyle::Setext => 0,
                    };
                    headings.push(Heading {
                        index: start,
                        end,
                        level: h.level,
                        text: inline_text(node),
                        style,
                        indent,
                        gap,
                    });
                }
                _ => {}
            }
        }

        Document {
            source,
            lines,
            headings,
            front_matter_title,
        }
    }

    /// Line at 0-based `index`, if any.
    pub fn line(&self, index: usize) -> Option<&Line<'a>> {
        self.lines.get(index)
    }
}

fn mark(lines: &mut [Line<'_>], start: usize, end: usize, kind: LineKind) {
    for l in lines.iter_mut().take(end + 1).skip(start) {
        l.kind = kind.clone();
    }
}

/// Number of lines up to the closing delimiter, and whether a `title:` key
/// appears inside.
fn scan_front_matter(literal: &str) -> (usize, bool) {
    let mut span = 0;
    let mut title = false;
    for (i, l) in literal.lines().enumerate() {
        span = i + 1;
        if i > 0 && l.trim_end() == "---" {
            break;
        }
        if i > 0 && l.trim_start().starts_with("title:") {
            title = true;
        }
    }
    (span, title)
}

fn is_closing_fence(line: &str, fence_char: u8, fence_length: usize) -> bool {
    let t = line.trim();
    t.len() >= fence_length && t.bytes().all(|b| b == fence_char)
}

/// Whitespace between the `#` run and the heading text.
fn atx_gap(line: &str) -> usize {
    let t = line.trim_start();
    let after = t.trim_start_matches('#');
    if after.len() == t.len() {
        return 0;
    }
    after.len() - after.trim_start_matches([' ', '\t']).len()
}

/// Plain text of a heading's inline children.
fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for d in node.descendants().skip(1) {
        match &d.data.borrow().value {
            NodeValue::Text(t) => out.push_str(t),
            NodeValue::Code(c) => out.push_str(&c.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => {}
        }
    }
    out.trim().to_string()
}
