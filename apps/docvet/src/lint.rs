//! Lint pass: style rules over every markdown file in the docs tree.
//!
//! Prints one pass or fail notice per markdown file and one error line per
//! invalid entry. Failures on a single file never stop the walk.

use crate::checks::RuleSet;
use crate::error::{Error, Result};
use crate::models::{LintResult, Summary};
use crate::output::Printer;
use crate::walk::{Entry, Walker};
use std::fs;
use std::io::Write;
use std::path::Path;

pub const TAG: &str = "MD LINTER";

/// Lint a single file with the given rule set.
pub fn lint_file(path: &Path, rules: &RuleSet) -> Result<LintResult> {
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(rules.lint(&path.to_string_lossy(), &source))
}

/// Walk `dir` and lint each markdown file.
pub fn run<W: Write>(
    dir: &Path,
    walker: &Walker,
    rules: &RuleSet,
    out: &mut Printer<W>,
) -> Summary {
    let mut summary = Summary::default();
    for item in walker.walk(dir) {
        match item {
            Ok(Entry::Markdown(path)) => {
                summary.files += 1;
                match lint_file(&path, rules) {
                    Ok(res) if res.is_empty() => {
                        summary.passed += 1;
                        out.passed(&res.file, "LINTER PASSED");
                    }
                    Ok(res) => {
                        summary.failed += 1;
                        tracing::debug!(file = %res.file, issues = res.issues.len(), "lint issues");
                        out.error(
                            TAG,
                            &format!(
                                "PLEASE CHECK FOLLOWING LINTER ISSUES WITHIN THE FILE : {}",
                                res.file
                            ),
                        );
                        out.raw(&res.to_string());
                    }
                    Err(e) => {
                        summary.errors += 1;
                        out.error(TAG, &e.to_string());
                    }
                }
            }
            Ok(Entry::Invalid(path)) => {
                summary.invalid += 1;
                out.error(
                    TAG,
                    &format!("Invalid subdir or file extension : {}", path.display()),
                );
            }
            Err(e) => {
                summary.errors += 1;
                out.error(TAG, &e.to_string());
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn run_to_string(dir: &Path) -> (Summary, String) {
        let mut p = Printer::new(Vec::new(), false);
        let s = run(dir, &Walker::default(), &RuleSet::default(), &mut p);
        (s, String::from_utf8(p.into_inner()).unwrap())
    }

    #[test]
    fn test_one_message_per_file() {
        let tmp = tempdir().unwrap();
        let docs = tmp.path();
        fs::create_dir_all(docs.join("guides")).unwrap();
        fs::write(docs.join("a.md"), "# A\n\nFine.\n").unwrap();
        fs::write(docs.join("guides/b.md"), "# B\n\nAlso fine.\n").unwrap();

        let (s, text) = run_to_string(docs);
        assert_eq!(s.files, 2);
        assert_eq!(s.passed, 2);
        assert_eq!(text.matches("LINTER PASSED").count(), 2);
        assert!(text.contains(&format!("{} - LINTER PASSED", docs.join("a.md").display())));
    }

    #[test]
    fn test_issues_found_names_file() {
        let tmp = tempdir().unwrap();
        let docs = tmp.path();
        fs::write(docs.join("two.md"), "# One\n\n# Two\n").unwrap();

        let (s, text) = run_to_string(docs);
        assert_eq!(s.failed, 1);
        let file = docs.join("two.md").display().to_string();
        assert!(text.contains(&format!(
            "⟦MD LINTER⟧ PLEASE CHECK FOLLOWING LINTER ISSUES WITHIN THE FILE : {}",
            file
        )));
        assert!(text.contains(&format!("{}: 3: MD025/single-title/single-h1", file)));
    }

    #[test]
    fn test_invalid_entry_reported_once_and_walk_continues() {
        let tmp = tempdir().unwrap();
        let docs = tmp.path();
        fs::write(docs.join("image.png"), [0u8, 1, 2]).unwrap();
        fs::write(docs.join("z.md"), "# Z\n").unwrap();

        let (s, text) = run_to_string(docs);
        assert_eq!(s.invalid, 1);
        assert_eq!(text.matches("Invalid subdir or file extension").count(), 1);
        assert!(text.contains("z.md - LINTER PASSED"));
    }

    #[test]
    fn test_unreadable_file_is_reported() {
        let tmp = tempdir().unwrap();
        let docs = tmp.path();
        fs::write(docs.join("bin.md"), [0xffu8, 0xfe, 0x00]).unwrap();

        let (s, text) = run_to_string(docs);
        assert_eq!(s.errors, 1);
        assert!(text.contains("⟦MD LINTER⟧ cannot read"));
    }

    #[test]
    fn test_lint_file_records_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("page.md");
        fs::write(&path, "# Page\n\n# Again\n").unwrap();

        let res = lint_file(&path, &RuleSet::default()).unwrap();
        assert_eq!(res.file, path.to_string_lossy());
        assert!(res.issues.iter().all(|i| i.file == res.file));
    }
}
