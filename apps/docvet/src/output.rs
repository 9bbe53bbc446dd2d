//! Console printer for both validation passes.
//!
//! Three channels: plain info lines (banner, pass notices), tagged error
//! lines `⟦TAG⟧ message`, and raw text (linter dumps, remediation hints).
//! The first write failure is logged once; later output is dropped so a
//! closed pipe does not produce a warning per file.

use crate::models::Summary;
use owo_colors::OwoColorize;
use std::fmt;
use std::io::{self, Write};

pub struct Printer<W: Write> {
    out: W,
    color: bool,
    broken: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Printer {
            out,
            color,
            broken: false,
        }
    }

    /// True once a write to the underlying stream has failed.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if self.broken {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", line) {
            self.broken = true;
            if e.kind() == io::ErrorKind::BrokenPipe {
                tracing::debug!("console closed; dropping further output");
            } else {
                tracing::warn!(error = %e, "console write failed; dropping further output");
            }
        }
    }

    pub fn info(&mut self, msg: &str) {
        self.emit(format_args!("{}", msg));
    }

    pub fn passed(&mut self, file: &str, label: &str) {
        if self.color {
            self.emit(format_args!("{} - {}", file, label.green().bold()));
        } else {
            self.emit(format_args!("{} - {}", file, label));
        }
    }

    pub fn error(&mut self, tag: &str, msg: &str) {
        let tag = format!("⟦{}⟧", tag);
        if self.color {
            self.emit(format_args!("{} {}", tag.red().bold(), msg));
        } else {
            self.emit(format_args!("{} {}", tag, msg));
        }
    }

    pub fn hint(&mut self, msg: &str) {
        if self.color {
            self.emit(format_args!("{}", msg.yellow()));
        } else {
            self.emit(format_args!("{}", msg));
        }
    }

    pub fn raw(&mut self, text: &str) {
        self.emit(format_args!("{}", text));
    }

    pub fn summary(&mut self, pass: &str, s: &Summary) {
        let line = format!("— {} summary — {}", pass, s);
        if self.color {
            self.emit(format_args!("{}", line.bold()));
        } else {
            self.emit(format_args!("{}", line));
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
