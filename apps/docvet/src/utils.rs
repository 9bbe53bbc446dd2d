//! Small helpers shared by the binary and the printers.

use owo_colors::OwoColorize;

/// Color unless `NO_COLOR` is set.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// `note:` prefix for stderr notices.
pub fn note_prefix(color: bool) -> String {
    if color {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}
