//! Integration tests for pdf-core
//!
//! These tests verify end-to-end functionality by re-opening the generated
//! bytes with lopdf.

use lopdf::{Document, Object};
use pdf_core::{Align, Color, FontStyle, FontWeight, PdfDocument, PdfError, Unit};
use pretty_assertions::assert_eq;

/// Create a small RGB PNG image for testing
fn create_test_png() -> Vec<u8> {
    use image::{ImageBuffer, Rgb};

    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(16, 8, Rgb([249, 115, 22]));
    let mut buffer = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .expect("Failed to create PNG");
    buffer
}

fn reopen(doc: &PdfDocument) -> Document {
    let bytes = doc.to_bytes().expect("Failed to save PDF");
    Document::load_mem(&bytes).expect("Failed to re-open PDF")
}

fn first_page_resources(doc: &Document) -> lopdf::Dictionary {
    let page_id = *doc.get_pages().get(&1).expect("page 1");
    let page = doc.get_dictionary(page_id).expect("page dict");
    page.get(b"Resources")
        .and_then(Object::as_dict)
        .expect("resources")
        .clone()
}

#[test]
fn test_blank_a4_roundtrip() {
    let doc = PdfDocument::a4(Unit::Millimeter);
    let reopened = reopen(&doc);

    assert_eq!(reopened.get_pages().len(), 1);

    let page_id = *reopened.get_pages().get(&1).unwrap();
    let page = reopened.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    assert_eq!(media_box.len(), 4);
    let width = media_box[2].as_float().unwrap();
    let height = media_box[3].as_float().unwrap();
    assert!((width - 595.28).abs() < 0.01);
    assert!((height - 841.89).abs() < 0.01);
}

#[test]
fn test_text_registers_each_font_variant() {
    let mut doc = PdfDocument::a4(Unit::Millimeter);

    doc.insert_text("Regular", 20.0, 20.0, Align::Left);
    doc.set_font_weight(FontWeight::Bold);
    doc.insert_text("Bold", 20.0, 30.0, Align::Left);
    doc.set_font_weight(FontWeight::Regular);
    doc.set_font_style(FontStyle::Italic);
    doc.insert_text("Italic", 20.0, 40.0, Align::Left);

    let reopened = reopen(&doc);
    let resources = first_page_resources(&reopened);
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();

    let mut names: Vec<Vec<u8>> = fonts.iter().map(|(k, _)| k.clone()).collect();
    names.sort();
    assert_eq!(names, vec![b"F1".to_vec(), b"F2".to_vec(), b"F3".to_vec()]);

    let bold_id = fonts.get(b"F2").unwrap().as_reference().unwrap();
    let bold = reopened.get_dictionary(bold_id).unwrap();
    assert_eq!(bold.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica-Bold");
}

#[test]
fn test_accented_text_is_win_ansi() {
    let mut doc = PdfDocument::a4(Unit::Millimeter);
    doc.insert_text("ORÇAMENTO", 20.0, 48.0, Align::Left);

    let content = String::from_utf8_lossy(doc.page_content()).into_owned();
    // Ç = 0xC7
    assert!(content.contains("<4F52C7414D454E544F> Tj"));
}

#[test]
fn test_right_alignment_ends_at_anchor() {
    let mut doc = PdfDocument::a4(Unit::Point);
    doc.set_font_size(10.0);
    let width = doc.get_text_width("00");
    doc.insert_text("00", 200.0, 41.89, Align::Right);

    let content = String::from_utf8_lossy(doc.page_content()).into_owned();
    let expected_x = ((200.0 - width) * 10_000.0).round() / 10_000.0;
    assert_eq!(expected_x, 188.88);
    assert!(content.contains(&format!("{expected_x} 800 Td")));
}

#[test]
fn test_image_is_embedded_once() {
    let png = create_test_png();
    let mut doc = PdfDocument::a4(Unit::Millimeter);

    doc.insert_image(&png, 20.0, 6.0, 40.0, 16.0).unwrap();
    doc.insert_image(&png, 20.0, 100.0, 40.0, 16.0).unwrap();

    let content = String::from_utf8_lossy(doc.page_content()).into_owned();
    assert_eq!(content.matches("/Im1 Do").count(), 2);

    let reopened = reopen(&doc);
    let resources = first_page_resources(&reopened);
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    assert_eq!(xobjects.len(), 1);

    let image_id = xobjects.get(b"Im1").unwrap().as_reference().unwrap();
    let image = reopened.get_object(image_id).unwrap().as_stream().unwrap();
    assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 16);
    assert_eq!(image.dict.get(b"Height").unwrap().as_i64().unwrap(), 8);
}

#[test]
fn test_invalid_image_leaves_page_untouched() {
    let mut doc = PdfDocument::a4(Unit::Millimeter);
    let result = doc.insert_image(b"not an image", 20.0, 6.0, 40.0, 16.0);

    assert!(matches!(result, Err(PdfError::ImageError(_))));
    assert!(doc.page_content().is_empty());
}

#[test]
fn test_shapes_on_one_page() {
    let mut doc = PdfDocument::a4(Unit::Millimeter);
    doc.set_fill_color(Color::from_rgb(249, 115, 22));
    doc.fill_rect(0.0, 287.0, 210.0, 10.0);
    doc.fill_rounded_rect(20.0, 60.0, 170.0, 32.0, 2.0, 2.0);
    doc.line(20.0, 58.0, 190.0, 58.0);

    let content = String::from_utf8_lossy(doc.page_content()).into_owned();
    assert!(content.contains(" re\n"));
    assert!(content.contains(" l\nS\n"));
    assert_eq!(content.matches(" c\n").count(), 4);

    let reopened = reopen(&doc);
    assert_eq!(reopened.get_pages().len(), 1);
}

#[test]
fn test_title_in_info_dictionary() {
    let mut doc = PdfDocument::a4(Unit::Millimeter);
    doc.set_title("Orçamento");

    let reopened = reopen(&doc);
    let info_id = reopened.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = reopened.get_dictionary(info_id).unwrap();
    let title = info.get(b"Title").unwrap().as_str().unwrap();

    // UTF-16BE with BOM; Ç is U+00C7
    assert_eq!(&title[..4], &[0xFE, 0xFF, 0x00, b'O']);
    assert!(title.windows(2).any(|w| w == [0x00, 0xC7]));
}
