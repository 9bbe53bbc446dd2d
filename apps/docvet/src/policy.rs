//! Disallowed-host policy for rendered links and images.

use crate::error::{Error, Result};
use crate::models::{Violation, ViolationKind};
use regex::Regex;
use std::sync::LazyLock;

/// Raw content host, or raw/attachment paths on the code host.
pub const DEFAULT_DENY: &str = r"githubusercontent|github\.com/.*(/raw/|/files/)";

static IMAGE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(png|jpg|jpeg)$").unwrap());

#[derive(Debug, Clone)]
pub struct LinkPolicy {
    deny: Regex,
}

impl LinkPolicy {
    pub fn new(pattern: &str) -> Result<Self> {
        let deny = Regex::new(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(LinkPolicy { deny })
    }

    pub fn classify(&self, url: &str) -> Option<ViolationKind> {
        if !self.deny.is_match(url) {
            return None;
        }
        if IMAGE_SUFFIX.is_match(url) {
            Some(ViolationKind::RawImage)
        } else {
            Some(ViolationKind::Fetch)
        }
    }

    /// Violations among `urls`, in input order.
    pub fn check(&self, urls: &[String]) -> Vec<Violation> {
        urls.iter()
            .filter_map(|u| {
                self.classify(u).map(|kind| Violation {
                    url: u.clone(),
                    kind,
                })
            })
            .collect()
    }
}

impl Default for LinkPolicy {
    fn default() -> Self {
        LinkPolicy {
            deny: Regex::new(DEFAULT_DENY).unwrap(),
        }
    }
}
