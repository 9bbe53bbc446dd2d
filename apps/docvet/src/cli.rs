//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "docvet",
    version,
    about = "Lint Markdown docs and flag hotlinked raw assets",
    long_about = "docvet walks <ROOT>/docs, lints every .md file with the default style rules\n(hard tabs, trailing spaces and line length excepted), then renders each file\nand reports links or images served raw from the code host.\n\nFindings are printed only; the exit status is always 0.\nOptional settings are read from <ROOT>/docvet.toml (or docvet.yaml).",
    after_help = "Examples:\n  docvet .\n  docvet ../portal\n  DOCVET_LOG=debug docvet ."
)]
/// Top-level CLI options.
pub struct Cli {
    /// Project root; the docs directory is resolved beneath it
    pub root: Option<String>,
}
