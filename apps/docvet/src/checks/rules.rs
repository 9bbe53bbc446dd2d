//! Built-in Markdown style rules, named after their markdownlint
//! counterparts so output reads the same to docs authors.

use super::document::{Document, HeadingStyle, LineKind};
use super::{Finding, Rule};
use regex::Regex;
use std::sync::LazyLock;

const LINE_LIMIT: usize = 80;
const BR_SPACES: usize = 2;
const PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '。', '，', '；', '：', '！'];

static MISSING_SPACE_ATX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}#{1,6}[^#\s]").unwrap());
static HTML_ENTITY_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#?[0-9a-zA-Z]+;$").unwrap());

/// All built-in rules in id order.
pub fn all() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(HeadingIncrement),
        Box::new(NoTrailingSpaces),
        Box::new(NoHardTabs),
        Box::new(NoMultipleBlanks),
        Box::new(LineLength),
        Box::new(NoMissingSpaceAtx),
        Box::new(NoMultipleSpaceAtx),
        Box::new(BlanksAroundHeadings),
        Box::new(HeadingStartLeft),
        Box::new(SingleTitle),
        Box::new(NoTrailingPunctuation),
        Box::new(BlanksAroundFences),
        Box::new(FencedCodeLanguage),
        Box::new(SingleTrailingNewline),
    ]
}

fn blank_or_edge(doc: &Document<'_>, index: Option<usize>) -> bool {
    match index.and_then(|i| doc.line(i)) {
        None => true,
        Some(l) => l.is_blank() || l.kind == LineKind::FrontMatter,
    }
}

pub struct HeadingIncrement;

impl Rule for HeadingIncrement {
    fn names(&self) -> &'static [&'static str] {
        &["MD001", "heading-increment"]
    }
    fn description(&self) -> &'static str {
        "Heading levels should only increment by one level at a time"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["headings"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        let mut out = Vec::new();
        let mut prev: Option<u8> = None;
        for h in &doc.headings {
            if let Some(p) = prev {
                if h.level > p + 1 {
                    out.push(
                        Finding::at(h.index + 1)
                            .detail(format!("Expected: h{}; Actual: h{}", p + 1, h.level)),
                    );
                }
            }
            prev = Some(h.level);
        }
        out
    }
}

pub struct NoTrailingSpaces;

impl Rule for NoTrailingSpaces {
    fn names(&self) -> &'static [&'static str] {
        &["MD009", "no-trailing-spaces"]
    }
    fn description(&self) -> &'static str {
        "Trailing spaces"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["whitespace"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        let last = doc.lines.len();
        doc.lines
            .iter()
            .filter(|l| !l.in_code() && !l.is_blank())
            .filter_map(|l| {
                let trailing = l.text.len() - l.text.trim_end_matches(' ').len();
                // exactly BR_SPACES marks a hard line break, except on the last line
                let hard_break = trailing == BR_SPACES && l.number != last;
                (trailing > 0 && !hard_break).then(|| {
                    Finding::at(l.number)
                        .detail(format!("Expected: 0 or {}; Actual: {}", BR_SPACES, trailing))
                })
            })
            .collect()
    }
}

pub struct NoHardTabs;

impl Rule for NoHardTabs {
    fn names(&self) -> &'static [&'static str] {
        &["MD010", "no-hard-tabs"]
    }
    fn description(&self) -> &'static str {
        "Hard tabs"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["whitespace", "hard_tab"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        doc.lines
            .iter()
            .filter_map(|l| {
                l.text.find('\t').map(|byte| {
                    let column = l.text[..byte].chars().count() + 1;
                    Finding::at(l.number).detail(format!("Column: {}", column))
                })
            })
            .collect()
    }
}

pub struct NoMultipleBlanks;

impl Rule for NoMultipleBlanks {
    fn names(&self) -> &'static [&'static str] {
        &["MD012", "no-multiple-blanks"]
    }
    fn description(&self) -> &'static str {
        "Multiple consecutive blank lines"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["whitespace", "blank_lines"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        let mut out = Vec::new();
        let mut run = 0usize;
        for l in &doc.lines {
            if l.is_blank() && !l.in_code() {
                run += 1;
                if run > 1 {
                    out.push(Finding::at(l.number).detail(format!("Expected: 1; Actual: {}", run)));
                }
            } else {
                run = 0;
            }
        }
        out
    }
}

pub struct LineLength;

impl Rule for LineLength {
    fn names(&self) -> &'static [&'static str] {
        &["MD013", "line-length"]
    }
    fn description(&self) -> &'static str {
        "Line length"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["line_length"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        doc.lines
            .iter()
            .filter(|l| l.kind != LineKind::FrontMatter)
            .filter_map(|l| {
                let len = l.text.chars().count();
                if len <= LINE_LIMIT {
                    return None;
                }
                // a single long token past the limit (usually a URL) is tolerated
                let tail: String = l.text.chars().skip(LINE_LIMIT).collect();
                if !tail.contains(char::is_whitespace) {
                    return None;
                }
                Some(
                    Finding::at(l.number)
                        .detail(format!("Expected: {}; Actual: {}", LINE_LIMIT, len)),
                )
            })
            .collect()
    }
}

pub struct NoMissingSpaceAtx;

impl Rule for NoMissingSpaceAtx {
    fn names(&self) -> &'static [&'static str] {
        &["MD018", "no-missing-space-atx"]
    }
    fn description(&self) -> &'static str {
        "No space after hash on atx style heading"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["headings", "atx", "spaces"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        doc.lines
            .iter()
            .filter(|l| l.kind == LineKind::Text && MISSING_SPACE_ATX.is_match(l.text))
            .map(|l| Finding::at(l.number).context(l.text.trim()))
            .collect()
    }
}

pub struct NoMultipleSpaceAtx;

impl Rule for NoMultipleSpaceAtx {
    fn names(&self) -> &'static [&'static str] {
        &["MD019", "no-multiple-space-atx"]
    }
    fn description(&self) -> &'static str {
        "Multiple spaces after hash on atx style heading"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["headings", "atx", "spaces"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        doc.headings
            .iter()
            .filter(|h| h.style == HeadingStyle::Atx && h.gap > 1 && !h.text.is_empty())
            .map(|h| Finding::at(h.index + 1).context(doc.lines[h.index].text.trim()))
            .collect()
    }
}

pub struct BlanksAroundHeadings;

impl Rule for BlanksAroundHeadings {
    fn names(&self) -> &'static [&'static str] {
        &["MD022", "blanks-around-headings"]
    }
    fn description(&self) -> &'static str {
        "Headings should be surrounded by blank lines"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["headings", "blank_lines"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        let mut out = Vec::new();
        for h in &doc.headings {
            let ctx = doc.lines[h.index].text.trim();
            if !blank_or_edge(doc, h.index.checked_sub(1)) {
                out.push(
                    Finding::at(h.index + 1)
                        .detail("Expected: 1; Actual: 0; Above")
                        .context(ctx),
                );
            }
            if !blank_or_edge(doc, Some(h.end_index() + 1)) {
                out.push(
                    Finding::at(h.index + 1)
                        .detail("Expected: 1; Actual: 0; Below")
                        .context(ctx),
                );
            }
        }
        out
    }
}

pub struct HeadingStartLeft;

impl Rule for HeadingStartLeft {
    fn names(&self) -> &'static [&'static str] {
        &["MD023", "heading-start-left"]
    }
    fn description(&self) -> &'static str {
        "Headings must start at the beginning of the line"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["headings", "spaces"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        doc.headings
            .iter()
            .filter(|h| h.indent > 0)
            .map(|h| Finding::at(h.index + 1).context(doc.lines[h.index].text))
            .collect()
    }
}

pub struct SingleTitle;

impl Rule for SingleTitle {
    fn names(&self) -> &'static [&'static str] {
        &["MD025", "single-title", "single-h1"]
    }
    fn description(&self) -> &'static str {
        "Multiple top-level headings in the same document"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["headings"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        let first_is_title = doc.headings.first().map(|h| h.level == 1).unwrap_or(false);
        if !doc.front_matter_title && !first_is_title {
            return Vec::new();
        }
        let skip = if doc.front_matter_title { 0 } else { 1 };
        doc.headings
            .iter()
            .filter(|h| h.level == 1)
            .skip(skip)
            .map(|h| Finding::at(h.index + 1).context(doc.lines[h.index].text.trim()))
            .collect()
    }
}

pub struct NoTrailingPunctuation;

impl Rule for NoTrailingPunctuation {
    fn names(&self) -> &'static [&'static str] {
        &["MD026", "no-trailing-punctuation"]
    }
    fn description(&self) -> &'static str {
        "Trailing punctuation in heading"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["headings"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        doc.headings
            .iter()
            .filter(|h| {
                // entities are decoded in the AST text; look at the source line
                let raw = doc.lines[h.index].text.trim_end();
                let raw = match h.style {
                    HeadingStyle::Atx => raw.trim_end_matches('#').trim_end(),
                    HeadingStyle::Setext => raw,
                };
                !HTML_ENTITY_END.is_match(raw)
            })
            .filter_map(|h| {
                let last = h.text.chars().last()?;
                PUNCTUATION.contains(&last).then(|| {
                    Finding::at(h.index + 1).detail(format!("Punctuation: '{}'", last))
                })
            })
            .collect()
    }
}

pub struct BlanksAroundFences;

impl Rule for BlanksAroundFences {
    fn names(&self) -> &'static [&'static str] {
        &["MD031", "blanks-around-fences"]
    }
    fn description(&self) -> &'static str {
        "Fenced code blocks should be surrounded by blank lines"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["code", "blank_lines"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        let mut out = Vec::new();
        for (i, l) in doc.lines.iter().enumerate() {
            let needs_blank = match l.kind {
                LineKind::FenceOpen(_) => i.checked_sub(1),
                LineKind::FenceClose => Some(i + 1),
                _ => continue,
            };
            if !blank_or_edge(doc, needs_blank) {
                out.push(Finding::at(l.number).context(l.text.trim()));
            }
        }
        out
    }
}

pub struct FencedCodeLanguage;

impl Rule for FencedCodeLanguage {
    fn names(&self) -> &'static [&'static str] {
        &["MD040", "fenced-code-language"]
    }
    fn description(&self) -> &'static str {
        "Fenced code blocks should have a language specified"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["code", "language"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        doc.lines
            .iter()
            .filter(|l| matches!(&l.kind, LineKind::FenceOpen(info) if info.is_empty()))
            .map(|l| Finding::at(l.number).context(l.text.trim()))
            .collect()
    }
}

pub struct SingleTrailingNewline;

impl Rule for SingleTrailingNewline {
    fn names(&self) -> &'static [&'static str] {
        &["MD047", "single-trailing-newline"]
    }
    fn description(&self) -> &'static str {
        "Files should end with a single newline character"
    }
    fn tags(&self) -> &'static [&'static str] {
        &["blank_lines"]
    }
    fn check(&self, doc: &Document<'_>) -> Vec<Finding> {
        if doc.source.is_empty() || doc.source.ends_with('\n') {
            return Vec::new();
        }
        vec![Finding::at(doc.lines.len())]
    }
}
