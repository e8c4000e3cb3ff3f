//! Vector shape operators (rectangles, rounded rectangles, lines)
//!
//! All functions take PDF coordinates in points with a bottom-left origin;
//! `PdfDocument` does the unit and origin conversion.

use crate::document::Color;
use crate::fmt_num;

/// Bezier control distance for a quarter circle
const KAPPA: f64 = 0.552_284_749_831;

fn fill_color_op(color: Color) -> String {
    format!("{} {} {} rg\n", color.r, color.g, color.b)
}

fn stroke_color_op(color: Color) -> String {
    format!("{} {} {} RG\n", color.r, color.g, color.b)
}

/// Generate operators for a filled rectangle
///
/// `x`/`y` is the lower-left corner.
pub fn generate_rect_operators(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Vec<u8> {
    format!(
        "q\n{}{} {} {} {} re\nf\nQ\n",
        fill_color_op(fill),
        fmt_num(x),
        fmt_num(y),
        fmt_num(width),
        fmt_num(height)
    )
    .into_bytes()
}

/// Generate operators for a filled rectangle with elliptical corners
///
/// `x`/`y` is the lower-left corner; radii are clamped to half the side.
pub fn generate_rounded_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rx: f64,
    ry: f64,
    fill: Color,
) -> Vec<u8> {
    let rx = rx.min(width / 2.0).max(0.0);
    let ry = ry.min(height / 2.0).max(0.0);
    let kx = rx * KAPPA;
    let ky = ry * KAPPA;

    let left = x;
    let right = x + width;
    let bottom = y;
    let top = y + height;

    let mut ops = String::from("q\n");
    ops.push_str(&fill_color_op(fill));

    let point = |px: f64, py: f64| format!("{} {}", fmt_num(px), fmt_num(py));

    // Start at the top edge, right of the top-left corner, and go clockwise
    ops.push_str(&format!("{} m\n", point(left + rx, top)));
    ops.push_str(&format!("{} l\n", point(right - rx, top)));
    ops.push_str(&format!(
        "{} {} {} c\n",
        point(right - rx + kx, top),
        point(right, top - ry + ky),
        point(right, top - ry)
    ));
    ops.push_str(&format!("{} l\n", point(right, bottom + ry)));
    ops.push_str(&format!(
        "{} {} {} c\n",
        point(right, bottom + ry - ky),
        point(right - rx + kx, bottom),
        point(right - rx, bottom)
    ));
    ops.push_str(&format!("{} l\n", point(left + rx, bottom)));
    ops.push_str(&format!(
        "{} {} {} c\n",
        point(left + rx - kx, bottom),
        point(left, bottom + ry - ky),
        point(left, bottom + ry)
    ));
    ops.push_str(&format!("{} l\n", point(left, top - ry)));
    ops.push_str(&format!(
        "{} {} {} c\n",
        point(left, top - ry + ky),
        point(left + rx - kx, top),
        point(left + rx, top)
    ));
    ops.push_str("h\nf\nQ\n");

    ops.into_bytes()
}

/// Generate operators for a stroked straight line
pub fn generate_line_operators(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    line_width: f64,
    stroke: Color,
) -> Vec<u8> {
    format!(
        "q\n{}{} w\n{} {} m\n{} {} l\nS\nQ\n",
        stroke_color_op(stroke),
        fmt_num(line_width),
        fmt_num(x1),
        fmt_num(y1),
        fmt_num(x2),
        fmt_num(y2)
    )
    .into_bytes()
}
