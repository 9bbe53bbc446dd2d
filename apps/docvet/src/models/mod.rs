//! Shared data models for lint and link-policy results.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single lint issue reported by a style rule.
pub struct LintIssue {
    pub file: String,
    pub line: usize,
    /// Rule id followed by its aliases, e.g. `["MD025", "single-title", "single-h1"]`.
    pub names: Vec<&'static str>,
    pub description: &'static str,
    pub detail: Option<String>,
    pub context: Option<String>,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {} {}",
            self.file,
            self.line,
            self.names.join("/"),
            self.description
        )?;
        if let Some(detail) = &self.detail {
            write!(f, " [{}]", detail)?;
        }
        if let Some(ctx) = &self.context {
            write!(f, " [Context: \"{}\"]", ctx)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// Lint results for one file.
pub struct LintResult {
    pub file: String,
    pub issues: Vec<LintIssue>,
}

impl LintResult {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// One issue per line, markdownlint style. Empty when the file is clean.
impl fmt::Display for LintResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, is) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", is)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a disallowed URL should be replaced.
pub enum ViolationKind {
    /// Raw image hotlinked from the code host.
    RawImage,
    /// Any other raw file or attachment fetch.
    Fetch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub url: String,
    pub kind: ViolationKind,
}

impl Violation {
    /// Remediation line printed under the file.
    pub fn hint(&self) -> String {
        match self.kind {
            ViolationKind::RawImage => format!(
                "> {} is a raw github image link. Please utilize '/assets/images' instead.",
                self.url
            ),
            ViolationKind::Fetch => format!(
                "> {} is a github fetch link. Please utilize '/assets' instead for file uploads.",
                self.url
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Link policy results for one file.
pub struct LinkReport {
    pub file: String,
    pub violations: Vec<Violation>,
}

impl LinkReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Per-pass counters printed after each traversal.
pub struct Summary {
    pub files: usize,
    pub passed: usize,
    pub failed: usize,
    pub invalid: usize,
    pub errors: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files={} passed={} failed={} invalid={} errors={}",
            self.files, self.passed, self.failed, self.invalid, self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_issue_display_matches_markdownlint_shape() {
        let is = LintIssue {
            file: "docs/a.md".into(),
            line: 5,
            names: vec!["MD025", "single-title", "single-h1"],
            description: "Multiple top-level headings in the same document",
            detail: None,
            context: Some("# Again".into()),
        };
        assert_eq!(
            is.to_string(),
            "docs/a.md: 5: MD025/single-title/single-h1 Multiple top-level headings in the same document [Context: \"# Again\"]"
        );
    }

    #[test]
    fn test_empty_lint_result_formats_to_empty_string() {
        let res = LintResult {
            file: "a.md".into(),
            issues: Vec::new(),
        };
        assert!(res.is_empty());
        assert_eq!(res.to_string(), "");
    }

    #[test]
    fn test_violation_hints() {
        let img = Violation {
            url: "https://raw.githubusercontent.com/o/r/main/a.png".into(),
            kind: ViolationKind::RawImage,
        };
        assert!(img.hint().contains("'/assets/images'"));
        let fetch = Violation {
            url: "https://github.com/o/r/files/1/doc.pdf".into(),
            kind: ViolationKind::Fetch,
        };
        assert!(fetch.hint().contains("'/assets' instead for file uploads"));
    }
}
