//! docvet core library.
//!
//! Validates a tree of Markdown docs in two passes: a style lint and a link
//! policy check over the rendered HTML.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Optional `docvet.toml|yaml` and effective settings.
//! - `checks`: Markdown style rules (markdownlint ids and aliases).
//! - `lint`: Lint pass over the docs tree.
//! - `render`: Markdown to HTML with link/image collecting filters.
//! - `policy`: Disallowed-host classification of URLs.
//! - `links`: Link policy pass over the docs tree.
//! - `walk`: Sorted depth-first traversal.
//! - `models`: Result types shared by both passes.
//! - `output`: Console printer.
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod links;
pub mod lint;
pub mod models;
pub mod output;
pub mod policy;
pub mod render;
pub mod utils;
pub mod walk;

use crate::checks::RuleSet;
use crate::config::Effective;
use crate::models::Summary;
use crate::output::Printer;
use crate::render::Renderer;
use crate::walk::Walker;
use std::io::Write;

/// Run the lint pass, then the link policy pass, over `eff.docs_dir`.
pub fn validate<W: Write>(eff: &Effective, out: &mut Printer<W>) -> (Summary, Summary) {
    let walker = Walker::new(eff.exclude.clone());
    let lint_summary = lint::run(&eff.docs_dir, &walker, &RuleSet::default(), out);
    let link_summary = links::run(&eff.docs_dir, &walker, &Renderer::new(), &eff.policy, out);
    (lint_summary, link_summary)
}
