//! Configuration discovery and effective settings resolution.
//!
//! docvet reads an optional `docvet.toml|yaml|yml` from the project root and
//! merges it with defaults to produce an `Effective` config.
//! Defaults:
//! - `docs`: `docs`
//! - `color`: true (the `NO_COLOR` env var always wins)
//! - `exclude`: none
//! - `links.deny`: the built-in raw-asset host pattern
//!
//! The lint rule set is fixed and not configurable.

use crate::error::{Error, Result};
use crate::policy::{LinkPolicy, DEFAULT_DENY};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `docvet.toml|yaml`.
pub struct DocvetConfig {
    /// Docs subdirectory relative to the project root.
    pub docs: Option<String>,
    pub color: Option<bool>,
    /// Glob patterns matched against entry file names.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub links: Option<LinksCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[links]` section.
pub struct LinksCfg {
    /// Regex overriding the disallowed-host pattern.
    pub deny: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by both passes.
pub struct Effective {
    pub docs_dir: PathBuf,
    pub color: bool,
    pub exclude: Vec<glob::Pattern>,
    pub policy: LinkPolicy,
}

/// Load `DocvetConfig` from `docvet.toml` or `docvet.yaml|yml` if present.
///
/// `Ok(None)` when no config file exists; an unreadable or malformed file is
/// an error so the caller can tell the user before falling back.
pub fn load_config(root: &Path) -> Result<Option<DocvetConfig>> {
    let toml_path = root.join("docvet.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).map_err(|e| Error::io(&toml_path, e))?;
        let cfg: DocvetConfig = toml::from_str(&s).map_err(|e| Error::Config {
            path: toml_path.clone(),
            message: e.message().to_string(),
        })?;
        return Ok(Some(cfg));
    }
    for yml in ["docvet.yaml", "docvet.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).map_err(|e| Error::io(&p, e))?;
            let cfg: DocvetConfig = serde_yaml::from_str(&s).map_err(|e| Error::Config {
                path: p.clone(),
                message: e.to_string(),
            })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

/// Resolve `Effective` from the project root and an optional config.
pub fn resolve_effective(root: &str, cfg: Option<DocvetConfig>) -> Result<Effective> {
    let root = PathBuf::from(root);
    let cfg = cfg.unwrap_or_default();

    let docs = cfg.docs.unwrap_or_else(|| "docs".to_string());
    let docs_dir = root.join(docs);

    let color = cfg.color.unwrap_or(true) && std::env::var_os("NO_COLOR").is_none();

    let exclude = cfg
        .exclude
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|source| Error::Glob {
                pattern: p.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let deny = cfg
        .links
        .and_then(|l| l.deny)
        .unwrap_or_else(|| DEFAULT_DENY.to_string());
    let policy = LinkPolicy::new(&deny)?;

    Ok(Effective {
        docs_dir,
        color,
        exclude,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViolationKind;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        assert!(load_config(root).unwrap().is_none());
        let eff = resolve_effective(root.to_str().unwrap(), None).unwrap();
        assert_eq!(eff.docs_dir, root.join("docs"));
        assert!(eff.exclude.is_empty());
        assert_eq!(
            eff.policy.classify("https://github.com/o/r/raw/main/a.png"),
            Some(ViolationKind::RawImage)
        );
    }

    #[test]
    fn test_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("docvet.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
docs = "documentation"
color = false
exclude = ["drafts", "*.png"]
[links]
deny = "cdn\\.example\\.com"
    "#
        )
        .unwrap();

        let cfg = load_config(root).unwrap();
        let eff = resolve_effective(root.to_str().unwrap(), cfg).unwrap();
        assert_eq!(eff.docs_dir, root.join("documentation"));
        assert!(!eff.color);
        assert_eq!(eff.exclude.len(), 2);
        assert!(eff.policy.classify("https://cdn.example.com/x").is_some());
        assert!(eff.policy.classify("https://github.com/o/r/raw/a.png").is_none());
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("docvet.yml"), "docs: site/docs\nexclude:\n  - README.md\n").unwrap();
        let cfg = load_config(root).unwrap().unwrap();
        assert_eq!(cfg.docs.as_deref(), Some("site/docs"));
        assert_eq!(cfg.exclude, vec!["README.md".to_string()]);
    }

    #[test]
    fn test_malformed_config_and_bad_patterns_are_errors() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("docvet.toml"), "docs = [").unwrap();
        assert!(matches!(load_config(root), Err(Error::Config { .. })));

        let cfg = DocvetConfig {
            exclude: vec!["[".into()],
            ..Default::default()
        };
        assert!(matches!(
            resolve_effective(root.to_str().unwrap(), Some(cfg)),
            Err(Error::Glob { .. })
        ));
    }
}
