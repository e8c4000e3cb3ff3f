//! PDF Document builder

use crate::font::{encode_win_ansi, FontStyle, FontWeight, StandardFont};
use crate::image::{generate_image_operators, ImageXObject};
use crate::shapes::{generate_line_operators, generate_rect_operators, generate_rounded_rect_operators};
use crate::text::{generate_text_operators, to_hex_string, TextRenderContext};
use crate::{Align, PdfError, Result};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 portrait (210 x 297 mm)
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
}

/// User unit for every coordinate passed to [`PdfDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Point,
    Millimeter,
}

impl Unit {
    /// Points per user unit
    pub fn scale(self) -> f64 {
        match self {
            Unit::Point => 1.0,
            Unit::Millimeter => 72.0 / 25.4,
        }
    }
}

/// Buffered content of one page
#[derive(Debug, Default)]
struct PageContent {
    /// Content stream operators
    content: Vec<u8>,
    /// Fonts referenced by the content
    fonts: BTreeSet<StandardFont>,
    /// Indexes into `PdfDocument::images` referenced by the content
    images: BTreeSet<usize>,
}

/// Single-page PDF document built from scratch with drawing state, jsPDF-style
///
/// Coordinates are in the document [`Unit`] with the origin at the top-left
/// corner of the page. Text `y` is the baseline.
pub struct PdfDocument {
    page_size: PageSize,
    unit: Unit,
    page: PageContent,
    current_weight: FontWeight,
    current_style: FontStyle,
    /// Current font size in points
    current_font_size: f32,
    current_text_color: Color,
    fill_color: Color,
    draw_color: Color,
    /// Line width in points
    line_width: f64,
    /// Embedded images, deduplicated by content hash
    images: Vec<ImageXObject>,
    image_index: HashMap<u64, usize>,
    title: Option<String>,
}

impl PdfDocument {
    /// Create a document with one blank page
    pub fn new(page_size: PageSize, unit: Unit) -> Self {
        Self {
            page_size,
            unit,
            page: PageContent::default(),
            current_weight: FontWeight::default(),
            current_style: FontStyle::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            fill_color: Color::default(),
            draw_color: Color::default(),
            line_width: 0.2 * Unit::Millimeter.scale(),
            images: Vec::new(),
            image_index: HashMap::new(),
            title: None,
        }
    }

    /// Create a single-page A4 document
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::a4(Unit::Millimeter);
    /// assert!((doc.page_width() - 210.0).abs() < 0.01);
    /// ```
    pub fn a4(unit: Unit) -> Self {
        Self::new(PageSize::A4, unit)
    }

    /// Page width in user units
    pub fn page_width(&self) -> f64 {
        self.page_size.width / self.unit.scale()
    }

    /// Page height in user units
    pub fn page_height(&self) -> f64 {
        self.page_size.height / self.unit.scale()
    }

    /// Set the document title (Info dictionary)
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Set the font size in points
    pub fn set_font_size(&mut self, size: f32) {
        self.current_font_size = size;
    }

    /// Set the font weight (keeps current size/style)
    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.current_weight = weight;
    }

    /// Set the font style (keeps current size/weight)
    pub fn set_font_style(&mut self, style: FontStyle) {
        self.current_style = style;
    }

    /// Set the text color
    ///
    /// # Example
    /// ```ignore
    /// doc.set_text_color(Color::from_rgb(249, 115, 22)); // Orange
    /// ```
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the fill color used by rectangles
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Set the stroke color used by lines
    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    /// Set the line width in user units
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = self.to_points(width);
    }

    /// Font selected by the current weight and style
    pub fn current_font(&self) -> StandardFont {
        StandardFont::from_variant(self.current_weight, self.current_style)
    }

    /// Width of `text` in user units with the current font and size
    pub fn get_text_width(&self, text: &str) -> f64 {
        self.current_font()
            .text_width_points(text, self.current_font_size)
            / self.unit.scale()
    }

    /// Insert text with its baseline at `y`
    ///
    /// # Arguments
    /// * `text` - Text to insert (unmappable characters become `?`)
    /// * `x` - X coordinate of the alignment anchor
    /// * `y` - Y coordinate of the baseline (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(&mut self, text: &str, x: f64, y: f64, align: Align) {
        // Skip empty text - nothing to render
        if text.is_empty() {
            return;
        }

        let font = self.current_font();
        let encoded = encode_win_ansi(text);
        let ctx = TextRenderContext {
            font_name: font.resource_name().to_string(),
            font_size: self.current_font_size,
            text_width: font.encoded_width_points(&encoded, self.current_font_size),
            color: self.current_text_color,
        };

        let operators = generate_text_operators(
            &to_hex_string(&encoded),
            self.to_points(x),
            self.to_pdf_y(y),
            align,
            &ctx,
        );

        self.page.fonts.insert(font);
        self.page.content.extend_from_slice(&operators);
    }

    /// Fill a rectangle whose top-left corner is at `(x, y)`
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let operators = generate_rect_operators(
            self.to_points(x),
            self.to_pdf_y(y + height),
            self.to_points(width),
            self.to_points(height),
            self.fill_color,
        );
        self.page.content.extend_from_slice(&operators);
    }

    /// Fill a rectangle with rounded corners (radii in user units)
    pub fn fill_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, rx: f64, ry: f64) {
        let operators = generate_rounded_rect_operators(
            self.to_points(x),
            self.to_pdf_y(y + height),
            self.to_points(width),
            self.to_points(height),
            self.to_points(rx),
            self.to_points(ry),
            self.fill_color,
        );
        self.page.content.extend_from_slice(&operators);
    }

    /// Stroke a straight line with the current draw color and line width
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let operators = generate_line_operators(
            self.to_points(x1),
            self.to_pdf_y(y1),
            self.to_points(x2),
            self.to_pdf_y(y2),
            self.line_width,
            self.draw_color,
        );
        self.page.content.extend_from_slice(&operators);
    }

    /// Insert a JPEG or PNG image stretched into the given box
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `x` - X coordinate of the top-left corner
    /// * `y` - Y coordinate of the top-left corner
    /// * `width` - Target width
    /// * `height` - Target height
    pub fn insert_image(
        &mut self,
        data: &[u8],
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        let index = self.get_or_create_image(data)?;

        let operators = generate_image_operators(
            &image_resource_name(index),
            self.to_points(x),
            self.to_pdf_y(y + height),
            self.to_points(width),
            self.to_points(height),
        );

        self.page.images.insert(index);
        self.page.content.extend_from_slice(&operators);

        Ok(())
    }

    /// Content stream operators buffered so far
    pub fn page_content(&self) -> &[u8] {
        &self.page.content
    }

    /// Save the document to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut document = self.build()?;

        let mut buffer = Vec::new();
        document
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Assemble the lopdf object graph from the buffered page
    fn build(&self) -> Result<Document> {
        let mut document = Document::with_version("1.4");
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for font in &self.page.fonts {
            let font_id = document.add_object(font.to_pdf_dict());
            fonts.set(font.resource_name(), Object::Reference(font_id));
        }

        let mut xobjects = Dictionary::new();
        for &index in &self.page.images {
            let image = self
                .images
                .get(index)
                .ok_or_else(|| PdfError::SaveError(format!("image {index} not embedded")))?;
            let image_id = document.add_object(image.to_pdf_stream());
            xobjects.set(image_resource_name(index), Object::Reference(image_id));
        }

        let contents_id =
            document.add_object(Stream::new(Dictionary::new(), self.page.content.clone()));

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(self.page_size.width as f32),
                Object::Real(self.page_size.height as f32),
            ],
            "Resources" => dictionary! {
                "Font" => fonts,
                "XObject" => xobjects,
            },
            "Contents" => contents_id,
        });

        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1_i64,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::string_literal("pdf-core"),
        };
        if let Some(title) = &self.title {
            info.set("Title", text_string(title));
        }
        let info_id = document.add_object(info);
        document.trailer.set("Info", info_id);

        Ok(document)
    }

    fn get_or_create_image(&mut self, data: &[u8]) -> Result<usize> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if let Some(&index) = self.image_index.get(&data_hash) {
            return Ok(index);
        }

        let xobject = ImageXObject::from_bytes(data)?;
        self.images.push(xobject);
        let index = self.images.len() - 1;
        self.image_index.insert(data_hash, index);
        Ok(index)
    }

    fn to_points(&self, value: f64) -> f64 {
        value * self.unit.scale()
    }

    /// Convert a top-origin user-unit Y into a bottom-origin PDF Y
    fn to_pdf_y(&self, y: f64) -> f64 {
        self.page_size.height - self.to_points(y)
    }
}

/// XObject resource name for an image index (e.g. "Im1")
fn image_resource_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

/// Encode an Info text string as UTF-16BE with BOM
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_str(doc: &PdfDocument) -> String {
        String::from_utf8_lossy(doc.page_content()).into_owned()
    }

    #[test]
    fn test_document_creation() {
        let doc = PdfDocument::a4(Unit::Millimeter);
        assert!((doc.page_width() - 210.0).abs() < 0.01);
        assert!((doc.page_height() - 297.0).abs() < 0.01);
    }

    #[test]
    fn test_text_width_in_user_units() {
        let mut doc = PdfDocument::a4(Unit::Millimeter);
        doc.set_font_size(10.0);
        // "00" is 11.12pt wide at 10pt
        let expected = 11.12 / Unit::Millimeter.scale();
        assert!((doc.get_text_width("00") - expected).abs() < 1e-9);

        doc.set_font_weight(FontWeight::Bold);
        assert_eq!(doc.current_font(), StandardFont::HelveticaBold);
    }

    #[test]
    fn test_insert_text_converts_to_pdf_coordinates() {
        let mut doc = PdfDocument::a4(Unit::Point);
        doc.insert_text("A", 100.0, 41.89, Align::Left);

        let content = content_str(&doc);
        assert!(content.contains("/F1 12 Tf"));
        assert!(content.contains("100 800 Td"));
        assert!(content.contains("<41> Tj"));
    }

    #[test]
    fn test_insert_empty_text_is_noop() {
        let mut doc = PdfDocument::a4(Unit::Point);
        doc.insert_text("", 10.0, 10.0, Align::Left);
        assert!(doc.page_content().is_empty());
    }

    #[test]
    fn test_fill_rect_uses_bottom_left_corner() {
        let mut doc = PdfDocument::a4(Unit::Point);
        doc.set_fill_color(Color::white());
        doc.fill_rect(0.0, 0.0, 100.0, 41.89);

        let content = content_str(&doc);
        assert!(content.contains("1 1 1 rg"));
        assert!(content.contains("0 800 100 41.89 re"));
    }

    #[test]
    fn test_line_uses_draw_color_and_width() {
        let mut doc = PdfDocument::a4(Unit::Point);
        doc.set_draw_color(Color::black());
        doc.set_line_width(2.0);
        doc.line(0.0, 41.89, 100.0, 41.89);

        let content = content_str(&doc);
        assert!(content.contains("2 w"));
        assert!(content.contains("0 800 m"));
        assert!(content.contains("100 800 l"));
    }

    #[test]
    fn test_insert_invalid_image_fails() {
        let mut doc = PdfDocument::a4(Unit::Point);
        let result = doc.insert_image(b"garbage-bytes", 0.0, 0.0, 10.0, 10.0);
        assert!(matches!(result, Err(PdfError::ImageError(_))));
        assert!(doc.page_content().is_empty());
    }

    #[test]
    fn test_to_bytes_reopens() {
        let mut doc = PdfDocument::a4(Unit::Millimeter);
        doc.set_title("Orçamento");
        doc.insert_text("Hello", 20.0, 20.0, Align::Left);

        let bytes = doc.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));

        let reopened = Document::load_mem(&bytes).unwrap();
        assert_eq!(reopened.get_pages().len(), 1);
    }
}
