//! Error types for md2pdf.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for md2pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// The Markdown input does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The theme configuration could not be read or parsed.
    #[error("Invalid theme configuration {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// The requested theme section does not exist.
    #[error("Unknown theme '{name}' (available: {})", .available.join(", "))]
    UnknownTheme { name: String, available: Vec<String> },

    /// A theme lacks a key that the requested output needs.
    #[error("Theme '{theme}' is missing required key '{field}'")]
    MissingThemeField { theme: String, field: &'static str },

    /// A branding logo could not be found.
    #[error("Logo file not found: {}", .0.display())]
    LogoNotFound(PathBuf),

    /// No Chrome/Chromium executable is available.
    #[error("Chrome/Chromium not found ({0}). Install it or pass --chrome <PATH>")]
    BrowserNotFound(String),

    /// The headless browser failed to produce a PDF.
    #[error("PDF rendering failed: {0}")]
    Render(String),
}
