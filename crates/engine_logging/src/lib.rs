#![deny(missing_docs)]
//! Shared logging utilities for the magnet courier workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a helper for keeping credentials out of log lines, and a minimal test
//! initializer for the global logger.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Masks a secret for display or logging.
///
/// Empty secrets stay empty so "not configured" remains visible; anything
/// else becomes a fixed-width run of asterisks that does not leak length.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}

/// Shortens a magnet URI for log lines: keeps the scheme and the first
/// `max_chars` characters, appending an ellipsis when cut.
pub fn abbreviate_uri(uri: &str, max_chars: usize) -> String {
    let mut chars = uri.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}...", &uri[..cut]),
        None => uri.to_string(),
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_secret_hides_length() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("a"), "********");
        assert_eq!(mask_secret("a much longer password"), "********");
    }

    #[test]
    fn abbreviate_uri_cuts_on_char_boundary() {
        assert_eq!(abbreviate_uri("magnet:?xt=abc", 40), "magnet:?xt=abc");
        assert_eq!(abbreviate_uri("magnet:?xt=abc", 7), "magnet:...");
        assert_eq!(abbreviate_uri("ééééé", 2), "éé...");
    }
}
