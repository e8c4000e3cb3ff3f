//! Quote layout

use crate::{CompanyProfile, LogoSource, ResolvedQuote, Result};
use br_format::slugify;
use pdf_core::{Align, Color, FontStyle, FontWeight, PdfDocument, Unit};
use tracing::{info, warn};

const PAGE_WIDTH: f64 = 210.0;
const MARGIN: f64 = 20.0;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - MARGIN * 2.0;
const RIGHT: f64 = PAGE_WIDTH - MARGIN;

/// Top of the bottom band (band is 10mm tall)
const FOOTER_BAND_Y: f64 = 287.0;

const LOGO_X: f64 = MARGIN;
const LOGO_Y: f64 = 6.0;
const LOGO_WIDTH: f64 = 40.0;
const LOGO_HEIGHT: f64 = 16.0;

fn orange() -> Color {
    Color::from_rgb(249, 115, 22)
}

fn dark_gray() -> Color {
    Color::from_rgb(30, 30, 30)
}

fn medium_gray() -> Color {
    Color::from_rgb(100, 100, 100)
}

fn light_gray() -> Color {
    Color::from_rgb(200, 200, 200)
}

fn box_fill() -> Color {
    Color::from_rgb(248, 248, 248)
}

fn green() -> Color {
    Color::from_rgb(34, 197, 94)
}

/// A finished quote ready to be handed to a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuote {
    /// Suggested filename (`orcamento-smart-ilha-{slug}.pdf`)
    pub filename: String,
    /// PDF bytes
    pub bytes: Vec<u8>,
}

/// Lays out a resolved quote on one A4 page
pub struct QuoteRenderer<'a> {
    profile: &'a CompanyProfile,
}

impl<'a> QuoteRenderer<'a> {
    /// Create a new renderer for a company profile
    pub fn new(profile: &'a CompanyProfile) -> Self {
        Self { profile }
    }

    /// Filename for a client, `cliente` when the name has no usable characters
    pub fn filename(&self, client_name: &str) -> String {
        let slug = slugify(client_name);
        let slug = if slug.is_empty() { "cliente" } else { &slug };
        format!("{}-{}.pdf", self.profile.filename_prefix, slug)
    }

    /// Render the quote to PDF bytes
    ///
    /// # Arguments
    /// * `quote` - Resolved quote
    /// * `logo` - Logo file bytes; `None` or undecodable bytes draw the company name
    pub fn render(&self, quote: &ResolvedQuote, logo: Option<&[u8]>) -> Result<RenderedQuote> {
        let mut doc = PdfDocument::a4(Unit::Millimeter);
        doc.set_title(&format!("Orçamento {}", quote.quote_number));

        self.layout(&mut doc, quote, logo);

        let bytes = doc.to_bytes()?;
        let filename = self.filename(&quote.client_name);

        info!(
            quote_number = %quote.quote_number,
            filename = %filename,
            bytes = bytes.len(),
            "quote rendered"
        );

        Ok(RenderedQuote { filename, bytes })
    }

    /// Draw every part of the page, top to bottom
    pub fn layout(&self, doc: &mut PdfDocument, quote: &ResolvedQuote, logo: Option<&[u8]>) {
        self.draw_header(doc, logo);

        let y = self.draw_title(doc, quote, 48.0);
        let y = self.draw_client(doc, quote, y);
        let y = self.draw_product(doc, quote, y);
        let y = self.draw_values(doc, quote, y);
        self.draw_footer(doc, y);
    }

    fn draw_header(&self, doc: &mut PdfDocument, logo: Option<&[u8]>) {
        doc.set_fill_color(dark_gray());
        doc.fill_rect(0.0, 0.0, PAGE_WIDTH, 38.0);

        // Accent line under the band
        doc.set_fill_color(orange());
        doc.fill_rect(0.0, 38.0, PAGE_WIDTH, 1.5);

        let logo_drawn = match logo {
            Some(bytes) => match doc.insert_image(bytes, LOGO_X, LOGO_Y, LOGO_WIDTH, LOGO_HEIGHT) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "logo could not be decoded, drawing company name");
                    false
                }
            },
            None => false,
        };

        if !logo_drawn {
            set_font(doc, FontWeight::Bold, FontStyle::Normal, 18.0);
            doc.set_text_color(orange());
            doc.insert_text(&self.profile.company_name, MARGIN, 20.0, Align::Left);
        }

        set_font(doc, FontWeight::Regular, FontStyle::Normal, 8.0);
        doc.set_text_color(light_gray());
        for (i, line) in self.profile.header_lines.iter().enumerate() {
            doc.insert_text(line, RIGHT, 10.0 + i as f64 * 4.5, Align::Right);
        }
    }

    fn draw_title(&self, doc: &mut PdfDocument, quote: &ResolvedQuote, mut y: f64) -> f64 {
        set_font(doc, FontWeight::Bold, FontStyle::Normal, 16.0);
        doc.set_text_color(dark_gray());
        doc.insert_text("ORÇAMENTO", MARGIN, y, Align::Left);

        set_font(doc, FontWeight::Regular, FontStyle::Normal, 10.0);
        doc.set_text_color(medium_gray());
        doc.insert_text(
            &format!("Nº {}", quote.quote_number),
            MARGIN + 62.0,
            y,
            Align::Left,
        );

        doc.set_font_size(9.0);
        doc.insert_text(&format!("Data: {}", quote.date), RIGHT, y - 4.0, Align::Right);
        doc.insert_text(
            &format!("Validade: {} dia(s)", quote.validity),
            RIGHT,
            y + 1.0,
            Align::Right,
        );
        doc.insert_text(
            &format!("Vendedor: {}", quote.seller_name),
            RIGHT,
            y + 6.0,
            Align::Right,
        );

        y += 10.0;
        divider(doc, y, 0.3);
        y + 8.0
    }

    fn draw_client(&self, doc: &mut PdfDocument, quote: &ResolvedQuote, y: f64) -> f64 {
        let y = section_title(doc, "DADOS DO CLIENTE", y);
        field_box(doc, y);

        let y = field_row(doc, "Nome:", &quote.client_name, y + 2.0);
        let y = field_row(doc, "Telefone:", &quote.client_phone, y);
        let y = field_row(doc, "CPF:", &quote.client_cpf, y);
        let y = field_row(doc, "Cidade:", &quote.client_city, y);

        y + 6.0
    }

    fn draw_product(&self, doc: &mut PdfDocument, quote: &ResolvedQuote, y: f64) -> f64 {
        let y = section_title(doc, "DESCRIÇÃO DO PRODUTO", y);
        field_box(doc, y);

        let y = field_row(doc, "Modelo:", &quote.model, y + 2.0);
        let y = field_row(doc, "Cor:", &quote.color, y);
        let y = field_row(doc, "Garantia:", &quote.warranty, y);
        let y = field_row(doc, "Acompanha:", &quote.accessories.join(", "), y);

        y + 8.0
    }

    fn draw_values(&self, doc: &mut PdfDocument, quote: &ResolvedQuote, y: f64) -> f64 {
        let mut y = section_title(doc, "VALORES", y);

        // Table header
        doc.set_fill_color(dark_gray());
        doc.fill_rounded_rect(MARGIN, y, CONTENT_WIDTH, 8.0, 1.0, 1.0);
        set_font(doc, FontWeight::Bold, FontStyle::Normal, 9.0);
        doc.set_text_color(Color::white());
        doc.insert_text("Descrição", MARGIN + 4.0, y + 5.5, Align::Left);
        doc.insert_text("Valor", RIGHT - 4.0, y + 5.5, Align::Right);
        y += 10.0;

        // Product row
        set_font(doc, FontWeight::Regular, FontStyle::Normal, 9.0);
        doc.set_text_color(dark_gray());
        doc.insert_text(or_placeholder(&quote.model, "Produto"), MARGIN + 4.0, y + 4.0, Align::Left);
        doc.insert_text(
            &format!("R$ {}", or_placeholder(&quote.product_value, "0,00")),
            RIGHT - 4.0,
            y + 4.0,
            Align::Right,
        );
        divider(doc, y + 7.0, 0.2);
        y += 9.0;

        // Freight row
        doc.insert_text("Frete", MARGIN + 4.0, y + 4.0, Align::Left);
        doc.set_text_color(green());
        doc.insert_text(&quote.freight, RIGHT - 4.0, y + 4.0, Align::Right);
        divider(doc, y + 7.0, 0.2);
        y += 10.0;

        // Total bar
        doc.set_fill_color(orange());
        doc.fill_rounded_rect(MARGIN, y, CONTENT_WIDTH, 12.0, 2.0, 2.0);
        set_font(doc, FontWeight::Bold, FontStyle::Normal, 12.0);
        doc.set_text_color(Color::white());
        doc.insert_text("TOTAL", MARGIN + 6.0, y + 8.0, Align::Left);
        doc.set_font_size(14.0);
        doc.insert_text(&quote.total, RIGHT - 6.0, y + 8.5, Align::Right);

        y + 22.0
    }

    fn draw_footer(&self, doc: &mut PdfDocument, y: f64) {
        divider(doc, y, 0.3);
        let mut y = y + 6.0;

        set_font(doc, FontWeight::Regular, FontStyle::Italic, 8.0);
        doc.set_text_color(medium_gray());
        for disclaimer in &self.profile.disclaimers {
            doc.insert_text(disclaimer, MARGIN, y, Align::Left);
            y += 4.0;
        }

        doc.set_fill_color(orange());
        doc.fill_rect(0.0, FOOTER_BAND_Y, PAGE_WIDTH, 10.0);
        set_font(doc, FontWeight::Bold, FontStyle::Normal, 8.0);
        doc.set_text_color(Color::white());
        doc.insert_text(&self.profile.tagline, PAGE_WIDTH / 2.0, 292.5, Align::Center);
    }
}

/// Load the logo once, then lay out the quote
///
/// A logo that cannot be loaded is logged and replaced by the company name;
/// only PDF failures are errors.
pub async fn render_quote<L: LogoSource>(
    quote: &ResolvedQuote,
    profile: &CompanyProfile,
    logo: &L,
) -> Result<RenderedQuote> {
    let logo_bytes = match logo.load().await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(error = %e, "logo unavailable, drawing company name");
            None
        }
    };

    QuoteRenderer::new(profile).render(quote, logo_bytes.as_deref())
}

fn set_font(doc: &mut PdfDocument, weight: FontWeight, style: FontStyle, size: f32) {
    doc.set_font_weight(weight);
    doc.set_font_style(style);
    doc.set_font_size(size);
}

fn or_placeholder<'s>(value: &'s str, placeholder: &'s str) -> &'s str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Full-width light rule
fn divider(doc: &mut PdfDocument, y: f64, width: f64) {
    doc.set_draw_color(light_gray());
    doc.set_line_width(width);
    doc.line(MARGIN, y, RIGHT, y);
}

/// Orange tab and bold title; returns the y of the first row
fn section_title(doc: &mut PdfDocument, title: &str, y: f64) -> f64 {
    doc.set_fill_color(orange());
    doc.fill_rect(MARGIN, y, 3.0, 6.0);
    set_font(doc, FontWeight::Bold, FontStyle::Normal, 11.0);
    doc.set_text_color(dark_gray());
    doc.insert_text(title, MARGIN + 6.0, y + 5.0, Align::Left);
    y + 12.0
}

/// Light rounded background behind four field rows
fn field_box(doc: &mut PdfDocument, y: f64) {
    doc.set_fill_color(box_fill());
    doc.fill_rounded_rect(MARGIN, y - 3.0, CONTENT_WIDTH, 32.0, 2.0, 2.0);
}

/// Label and value on one baseline; empty values print `-`
fn field_row(doc: &mut PdfDocument, label: &str, value: &str, y: f64) -> f64 {
    set_font(doc, FontWeight::Bold, FontStyle::Normal, 9.0);
    doc.set_text_color(medium_gray());
    doc.insert_text(label, MARGIN + 4.0, y, Align::Left);

    doc.set_font_weight(FontWeight::Regular);
    doc.set_text_color(dark_gray());
    doc.insert_text(or_placeholder(value, "-"), MARGIN + 50.0, y, Align::Left);
    y + 6.0
}
