//! PDF Core - Low-level PDF generation
//!
//! This crate provides functionality for:
//! - Creating a blank single-page document (A4 by default)
//! - Drawing in millimetres or points with a top-left origin
//! - Standard Helvetica fonts with WinAnsi encoding and real glyph widths
//! - Inserting text with left/center/right alignment
//! - Filled rectangles, rounded rectangles and lines
//! - Inserting images (JPEG, PNG)
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, Color, FontWeight, PdfDocument, Unit};
//!
//! let mut doc = PdfDocument::a4(Unit::Millimeter);
//! doc.set_fill_color(Color::from_rgb(30, 30, 30));
//! doc.fill_rect(0.0, 0.0, 210.0, 38.0);
//! doc.set_font_weight(FontWeight::Bold);
//! doc.set_font_size(16.0);
//! doc.insert_text("ORÇAMENTO", 20.0, 48.0, Align::Left);
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod image;
mod shapes;
mod text;

pub use document::{Color, PageSize, PdfDocument, Unit};
pub use font::{encode_win_ansi, FontStyle, FontWeight, StandardFont};
pub use image::{detect_format, ImageFormat, ImageXObject};
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Format a coordinate for a content stream.
///
/// Rounds to four decimals so millimetre conversions do not leak float noise
/// into the output.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // normalize -0
    format!("{}", rounded + 0.0)
}
