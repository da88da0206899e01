//! Terminal styling for headers and status messages.

/// ANSI color codes for terminal output.
mod colors {
    /// Bold text.
    pub(super) const BOLD: &str = "\x1b[1m";
    /// Green text (for success).
    pub(super) const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings).
    pub(super) const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub(super) const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub(super) const RESET: &str = "\x1b[0m";
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}
