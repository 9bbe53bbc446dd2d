//! Depth-first traversal of the docs tree.
//!
//! Entries are visited in file-name order and subdirectories are fully
//! walked before their next sibling, so output order is stable.

use crate::error::{Error, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A file whose name ends in `.md`.
    Markdown(PathBuf),
    /// Anything that is neither a directory nor a markdown file, including
    /// symlinks to directories.
    Invalid(PathBuf),
}

#[derive(Debug, Clone, Default)]
pub struct Walker {
    exclude: Vec<Pattern>,
}

impl Walker {
    /// Entries whose file name matches any of `exclude` are skipped silently.
    pub fn new(exclude: Vec<Pattern>) -> Self {
        Walker { exclude }
    }

    /// Walk `dir` recursively. An unreadable directory yields a single error
    /// item and the walk continues with its siblings.
    pub fn walk(&self, dir: &Path) -> Vec<Result<Entry>> {
        let mut out = Vec::new();
        self.visit(dir, &mut out);
        out
    }

    fn visit(&self, dir: &Path, out: &mut Vec<Result<Entry>>) {
        let mut entries: Vec<fs::DirEntry> = match fs::read_dir(dir) {
            Ok(rd) => match rd.collect::<std::io::Result<Vec<_>>>() {
                Ok(v) => v,
                Err(e) => {
                    out.push(Err(Error::io(dir, e)));
                    return;
                }
            },
            Err(e) => {
                out.push(Err(Error::io(dir, e)));
                return;
            }
        };
        entries.sort_by_key(|e| e.file_name());
        for entry in entries {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if self.exclude.iter().any(|p| p.matches(&name)) {
                tracing::debug!(path = %entry.path().display(), "excluded");
                continue;
            }
            let path = dir.join(&*name);
            // DirEntry::file_type does not traverse symlinks, so a link back
            // up the tree is reported as an entry rather than walked
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    out.push(Err(Error::io(&path, e)));
                    continue;
                }
            };
            if file_type.is_dir() {
                self.visit(&path, out);
            } else if file_type.is_symlink() && path.is_dir() {
                tracing::debug!(path = %path.display(), "symlinked directory not followed");
                out.push(Ok(Entry::Invalid(path)));
            } else if name.ends_with(".md") {
                out.push(Ok(Entry::Markdown(path)));
            } else {
                out.push(Ok(Entry::Invalid(path)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(root: &Path, entries: &[Result<Entry>]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e {
                Ok(Entry::Markdown(p)) => format!("md:{}", p.strip_prefix(root).unwrap().display()),
                Ok(Entry::Invalid(p)) => format!("bad:{}", p.strip_prefix(root).unwrap().display()),
                Err(_) => "err".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_walk_sorted_depth_first() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::write(root.join("c.md"), "# c\n").unwrap();
        fs::write(root.join("a.md"), "# a\n").unwrap();
        fs::write(root.join("b/inner/z.md"), "# z\n").unwrap();
        fs::write(root.join("b/notes.txt"), "x").unwrap();

        let got = Walker::default().walk(root);
        assert_eq!(
            names(root, &got),
            vec!["md:a.md", "md:b/inner/z.md", "bad:b/notes.txt", "md:c.md"]
        );
    }

    #[test]
    fn test_missing_dir_yields_error() {
        let tmp = tempdir().unwrap();
        let got = Walker::default().walk(&tmp.path().join("nope"));
        assert_eq!(got.len(), 1);
        assert!(got[0].is_err());
    }

    #[test]
    fn test_exclude_patterns_skip_entries() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("drafts")).unwrap();
        fs::write(root.join("drafts/x.md"), "# x\n").unwrap();
        fs::write(root.join(".DS_Store"), "").unwrap();
        fs::write(root.join("a.md"), "# a\n").unwrap();
        let walker = Walker::new(vec![
            Pattern::new("drafts").unwrap(),
            Pattern::new(".*").unwrap(),
        ]);
        assert_eq!(names(root, &walker.walk(root)), vec!["md:a.md".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dir_is_not_followed() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.md"), "# a\n").unwrap();
        std::os::unix::fs::symlink(root, root.join("loop")).unwrap();

        let got = Walker::default().walk(root);
        assert_eq!(names(root, &got), vec!["md:a.md", "bad:loop"]);
    }
}
