//! I/O boundary traits for testability
//!
//! These traits abstract the collaborators the chart core does not own:
//! reading documents and measuring rendered text.

use std::io;
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Rendered text width, supplied by whatever draws the labels.
pub trait TextMeasurer: Send + Sync {
    /// Width of `text` rendered at `font_size`.
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Fixed advance per character, expressed in em.
///
/// Stands in for a real font when no renderer is attached (CLI output, tests).
#[derive(Debug, Clone, Copy)]
pub struct CharWidthMeasurer {
    pub char_width_em: f64,
}

impl Default for CharWidthMeasurer {
    fn default() -> Self {
        Self { char_width_em: 0.6 }
    }
}

impl TextMeasurer for CharWidthMeasurer {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.char_width_em
    }
}
