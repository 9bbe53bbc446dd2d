//! docvet CLI binary entry point.
//! Resolves the docs directory, then runs the lint and link policy passes.

use clap::Parser;
use docvet::cli::Cli;
use docvet::output::Printer;
use docvet::{config, utils};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const TAG: &str = "MD VALIDATOR";

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DOCVET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let stdout = std::io::stdout();

    let Some(root) = cli.root else {
        let mut out = Printer::new(stdout.lock(), utils::use_colors());
        out.info("External Dir ---->>> ");
        out.error(TAG, "No Path for docs dir. defined");
        return;
    };

    // Invalid config is reported once and defaults are used
    let cfg = match config::load_config(Path::new(&root)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} {}; using defaults.", utils::note_prefix(utils::use_colors()), e);
            None
        }
    };
    let eff = match config::resolve_effective(&root, cfg) {
        Ok(eff) => eff,
        Err(e) => {
            let mut out = Printer::new(stdout.lock(), utils::use_colors());
            out.error(TAG, &e.to_string());
            return;
        }
    };
    tracing::debug!(docs = %eff.docs_dir.display(), color = eff.color, "resolved config");

    let mut out = Printer::new(stdout.lock(), eff.color);
    out.info(&format!("External Dir ---->>> {}", root));
    if !eff.docs_dir.is_dir() {
        out.error(
            TAG,
            &format!("Docs directory not found: {}", eff.docs_dir.display()),
        );
        return;
    }

    let (lint_summary, link_summary) = docvet::validate(&eff, &mut out);
    out.summary("LINTER", &lint_summary);
    out.summary("HTML VALIDATOR", &link_summary);
}
