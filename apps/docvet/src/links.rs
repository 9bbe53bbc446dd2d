//! Link policy pass: render every markdown file and flag disallowed URLs.

use crate::error::{Error, Result};
use crate::models::{LinkReport, Summary};
use crate::output::Printer;
use crate::policy::LinkPolicy;
use crate::render::Renderer;
use crate::walk::{Entry, Walker};
use std::fs;
use std::io::Write;
use std::path::Path;

pub const TAG: &str = "HTML VALIDATOR";

/// Render one file and check its collected URLs against `policy`.
pub fn check_file(path: &Path, renderer: &Renderer, policy: &LinkPolicy) -> Result<LinkReport> {
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let rendered = renderer.render(&source);
    tracing::debug!(file = %path.display(), urls = rendered.urls.len(), "rendered");
    Ok(LinkReport {
        file: path.to_string_lossy().to_string(),
        violations: policy.check(&rendered.urls),
    })
}

/// Walk `dir` and validate links in each markdown file.
pub fn run<W: Write>(
    dir: &Path,
    walker: &Walker,
    renderer: &Renderer,
    policy: &LinkPolicy,
    out: &mut Printer<W>,
) -> Summary {
    let mut summary = Summary::default();
    for item in walker.walk(dir) {
        match item {
            Ok(Entry::Markdown(path)) => {
                summary.files += 1;
                match check_file(&path, renderer, policy) {
                    Ok(report) => {
                        for v in &report.violations {
                            out.hint(&v.hint());
                        }
                        if report.passed() {
                            summary.passed += 1;
                            out.passed(&report.file, "HTML VALIDATOR PASSED");
                        } else {
                            summary.failed += 1;
                            out.error(
                                TAG,
                                &format!(
                                    "PLEASE FIX LINK RELATED ISSUES WITHIN THE FILE : {}",
                                    report.file
                                ),
                            );
                        }
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
                    &format!("Invalid subdir or Not a markdown file. : {}", path.display()),
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
    use crate::models::ViolationKind;
    use tempfile::tempdir;

    fn run_to_string(dir: &Path) -> (Summary, String) {
        let mut p = Printer::new(Vec::new(), false);
        let s = run(
            dir,
            &Walker::default(),
            &Renderer::new(),
            &LinkPolicy::default(),
            &mut p,
        );
        (s, String::from_utf8(p.into_inner()).unwrap())
    }

    #[test]
    fn test_raw_image_anchor_is_violation() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("a.md");
        fs::write(
            &path,
            "<a href=\"https://github.com/Org/repo/raw/main/x.png\">\n",
        )
        .unwrap();
        let report = check_file(&path, &Renderer::new(), &LinkPolicy::default()).unwrap();
        assert!(!report.passed());
        assert_eq!(report.violations[0].kind, ViolationKind::RawImage);
        assert_eq!(
            report.violations[0].url,
            "https://github.com/Org/repo/raw/main/x.png"
        );

        let (s, text) = run_to_string(tmp.path());
        assert_eq!(s.failed, 1);
        assert!(text.contains("is a raw github image link. Please utilize '/assets/images' instead."));
        assert!(text.contains("PLEASE FIX LINK RELATED ISSUES WITHIN THE FILE"));
        assert!(!text.contains("HTML VALIDATOR PASSED"));
    }

    #[test]
    fn test_in_page_anchor_passes() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("b.md"), "<a href=\"#section\">\n").unwrap();
        let (s, text) = run_to_string(tmp.path());
        assert_eq!(s.passed, 1);
        assert!(text.contains("b.md - HTML VALIDATOR PASSED"));
    }

    #[test]
    fn test_fetch_link_hint_for_image_host_non_image() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join("c.md"),
            "# C\n\n![diagram](https://raw.githubusercontent.com/o/r/main/diagram.svg)\n",
        )
        .unwrap();
        let (_, text) = run_to_string(tmp.path());
        assert!(text.contains(
            "> https://raw.githubusercontent.com/o/r/main/diagram.svg is a github fetch link. Please utilize '/assets' instead for file uploads."
        ));
    }

    #[test]
    fn test_findings_do_not_leak_between_files() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join("a.md"),
            "![x](https://raw.githubusercontent.com/o/r/main/x.png)\n",
        )
        .unwrap();
        fs::write(tmp.path().join("b.md"), "# Clean\n").unwrap();
        let (s, text) = run_to_string(tmp.path());
        assert_eq!(s.failed, 1);
        assert_eq!(s.passed, 1);
        assert!(text.contains("b.md - HTML VALIDATOR PASSED"));
    }

    #[test]
    fn test_invalid_entry_reported() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        let (s, text) = run_to_string(tmp.path());
        assert_eq!(s.invalid, 1);
        assert_eq!(text.matches("Invalid subdir or Not a markdown file.").count(), 1);
    }
}
