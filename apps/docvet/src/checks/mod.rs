//! Markdown style rule engine.
//!
//! Rules follow markdownlint's ids, aliases and tags. A `RuleSet` is built
//! from a `LintConfig`: every rule is enabled by default, and entries in
//! `disabled` switch rules off by id, alias or tag (case-insensitive).

pub mod document;
pub mod rules;

use crate::models::{LintIssue, LintResult};
pub use document::Document;

/// A rule hit before it is attached to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line: usize,
    pub detail: Option<String>,
    pub context: Option<String>,
}

impl Finding {
    pub fn at(line: usize) -> Self {
        Finding {
            line,
            detail: None,
            context: None,
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

pub trait Rule: Send + Sync {
    /// Rule id followed by its aliases.
    fn names(&self) -> &'static [&'static str];
    fn description(&self) -> &'static str;
    fn tags(&self) -> &'static [&'static str];
    fn check(&self, doc: &Document<'_>) -> Vec<Finding>;

    fn matches(&self, name: &str) -> bool {
        self.names()
            .iter()
            .chain(self.tags())
            .any(|n| n.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone)]
/// Lint configuration: default rule set with a list of switched-off rules.
pub struct LintConfig {
    pub disabled: Vec<String>,
}

impl Default for LintConfig {
    /// Hard tabs, trailing spaces and line length are not enforced on docs.
    fn default() -> Self {
        LintConfig {
            disabled: vec![
                "no-hard-tabs".into(),
                "no-trailing-spaces".into(),
                "line-length".into(),
            ],
        }
    }
}

pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn from_config(cfg: &LintConfig) -> Self {
        let rules = rules::all()
            .into_iter()
            .filter(|r| !cfg.disabled.iter().any(|d| r.matches(d)))
            .collect();
        RuleSet { rules }
    }

    /// Ids of enabled rules, in registry order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.names()[0]).collect()
    }

    /// Run every enabled rule over `source` and collect issues for `file`,
    /// ordered by line then rule id.
    pub fn lint(&self, file: &str, source: &str) -> LintResult {
        let doc = Document::parse(source);
        let mut issues: Vec<LintIssue> = self
            .rules
            .iter()
            .flat_map(|rule| {
                rule.check(&doc).into_iter().map(move |f| LintIssue {
                    file: file.to_string(),
                    line: f.line,
                    names: rule.names().to_vec(),
                    description: rule.description(),
                    detail: f.detail,
                    context: f.context,
                })
            })
            .collect();
        issues.sort_by(|a, b| a.line.cmp(&b.line).then(a.names[0].cmp(b.names[0])));
        LintResult {
            file: file.to_string(),
            issues,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::from_config(&LintConfig::default())
    }
}
