//! WASM bindings for the Smart Ilha quote form
//!
//! This crate provides JavaScript-friendly API for:
//! - Input masks (phone, CPF, currency) and filename slugs
//! - Editing a quote record with masks applied on update
//! - Generating the quote PDF and downloading it in the browser
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { QuoteForm, BrFormat } from 'orcamento-wasm';
//!
//! await init();
//!
//! const logo = new Uint8Array(await (await fetch('/images/logo11.png')).arrayBuffer());
//! const form = new QuoteForm(logo);
//!
//! form.setField('clientName', 'Maria Souza');
//! form.setField('clientPhone', '21980202797'); // "(21) 98020-2797"
//! form.setField('model', 'Series 11 Pro (47mm)');
//! form.setField('productValue', '150000');     // "1.500,00"
//!
//! try {
//!   await form.submit(); // downloads orcamento-smart-ilha-maria-souza.pdf
//! } catch (message) {
//!   alert(message);
//! }
//! ```

use orcamento::{
    BytesLogo, CompanyProfile, DocumentSink, Field, FormController, QuoteRecord, QuoteRenderer,
    RenderedQuote, SinkError,
};
use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Brazilian formatting utilities
#[wasm_bindgen]
pub struct BrFormat;

#[wasm_bindgen]
impl BrFormat {
    /// Mask a phone number
    ///
    /// @param value - Typed text
    /// @returns Masked phone (e.g., "(21) 98020-2797")
    #[wasm_bindgen(js_name = formatPhone)]
    pub fn format_phone(value: &str) -> String {
        br_format::format_phone(value)
    }

    /// Mask a CPF
    ///
    /// @param value - Typed text
    /// @returns Masked CPF (e.g., "123.456.789-00")
    #[wasm_bindgen(js_name = formatCpf)]
    pub fn format_cpf(value: &str) -> String {
        br_format::format_cpf(value)
    }

    /// Mask typed digits as an amount in cents
    ///
    /// @param value - Typed text
    /// @returns Amount (e.g., "1.500,00"), empty when no digits
    #[wasm_bindgen(js_name = formatCurrency)]
    pub fn format_currency(value: &str) -> String {
        br_format::format_currency(value)
    }

    /// Filename-safe slug of a name
    pub fn slugify(value: &str) -> String {
        br_format::slugify(value)
    }

    /// New quote number for today
    ///
    /// @returns Quote number (e.g., "20250307-042")
    #[wasm_bindgen(js_name = generateQuoteNumber)]
    pub fn generate_quote_number() -> String {
        br_format::generate_quote_number()
    }
}

/// Triggers a browser download through a temporary object URL
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDownload;

impl DocumentSink for BrowserDownload {
    fn save(&self, quote: &RenderedQuote) -> Result<(), SinkError> {
        download(&quote.filename, &quote.bytes)
            .map_err(|e| SinkError::Download(e.as_string().unwrap_or_else(|| format!("{e:?}"))))
    }
}

fn download(filename: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}

fn parse_profile(profile_json: Option<String>) -> Result<CompanyProfile, JsValue> {
    match profile_json {
        Some(json) => CompanyProfile::from_json(&json).map_err(js_error),
        None => Ok(CompanyProfile::default()),
    }
}

type Controller = FormController<BytesLogo, BrowserDownload>;

/// Quote form state bound to a browser download
#[wasm_bindgen]
pub struct QuoteForm {
    inner: Rc<RefCell<Controller>>,
}

#[wasm_bindgen]
impl QuoteForm {
    /// Create a form with a fresh quote for today
    ///
    /// @param logo - Logo bytes (Uint8Array), optional
    /// @param profileJson - Company profile JSON, optional
    #[wasm_bindgen(constructor)]
    pub fn new(logo: Option<Vec<u8>>, profile_json: Option<String>) -> Result<QuoteForm, JsValue> {
        let profile = parse_profile(profile_json)?;
        let logo = BytesLogo(logo.unwrap_or_default());
        let controller = FormController::new(profile, logo, BrowserDownload);
        Ok(QuoteForm {
            inner: Rc::new(RefCell::new(controller)),
        })
    }

    fn controller_mut(&self) -> Result<RefMut<'_, Controller>, JsValue> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| js_error("A quote is already being generated"))
    }

    /// Current record as a plain object
    pub fn record(&self) -> Result<JsValue, JsValue> {
        let controller = self.inner.try_borrow().map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(controller.record())?)
    }

    /// Update one field by its record key
    ///
    /// @param name - Field key (e.g., "clientPhone")
    /// @param value - Typed text
    /// @returns Updated record
    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&self, name: &str, value: &str) -> Result<JsValue, JsValue> {
        let field = Field::from_name(name)
            .ok_or_else(|| js_error(format!("Unknown or read-only field: {name}")))?;
        let mut controller = self.controller_mut()?;
        Ok(serde_wasm_bindgen::to_value(
            controller.on_field_change(field, value),
        )?)
    }

    /// Check or uncheck an accessory
    ///
    /// @returns Updated record
    #[wasm_bindgen(js_name = toggleAccessory)]
    pub fn toggle_accessory(&self, accessory: &str, checked: bool) -> Result<JsValue, JsValue> {
        let mut controller = self.controller_mut()?;
        Ok(serde_wasm_bindgen::to_value(
            controller.on_accessory_toggle(accessory, checked),
        )?)
    }

    /// Model name as it will be printed
    #[wasm_bindgen(js_name = displayModel)]
    pub fn display_model(&self) -> Result<String, JsValue> {
        let controller = self.inner.try_borrow().map_err(js_error)?;
        Ok(controller.record().display_model().to_string())
    }

    /// Total as it will be printed (e.g., "R$ 1.500,00")
    pub fn total(&self) -> Result<String, JsValue> {
        let controller = self.inner.try_borrow().map_err(js_error)?;
        Ok(controller.record().total())
    }

    /// Whether a submit is running
    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.inner
            .try_borrow()
            .map(|controller| controller.is_busy())
            .unwrap_or(true)
    }

    /// Whether the success indicator should be shown now
    #[wasm_bindgen(js_name = successVisible)]
    pub fn success_visible(&self) -> bool {
        self.inner
            .try_borrow()
            .map(|controller| controller.success_visible_at(chrono::Utc::now()))
            .unwrap_or(false)
    }

    /// Validate, render and download the quote
    ///
    /// @returns Promise resolving to true once downloaded, false when a
    /// generation is already running; rejects with the message to show
    #[allow(clippy::await_holding_refcell_ref)]
    pub fn submit(&self) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        wasm_bindgen_futures::future_to_promise(async move {
            // An outstanding borrow means a submit is still running
            let Ok(mut controller) = inner.try_borrow_mut() else {
                return Ok(JsValue::FALSE);
            };
            let result = controller.submit().await;
            match result {
                Ok(()) => Ok(JsValue::TRUE),
                Err(e) => match e.user_message() {
                    Some(message) => Err(js_error(message)),
                    None => Ok(JsValue::FALSE),
                },
            }
        })
    }
}

/// Render a quote record to PDF bytes without downloading it
///
/// @param record - Quote record object (same shape as `QuoteForm.record()`)
/// @param logo - Logo bytes (Uint8Array), optional
/// @param profileJson - Company profile JSON, optional
/// @returns PDF bytes (Uint8Array)
#[wasm_bindgen(js_name = renderQuote)]
pub fn render_quote(
    record: JsValue,
    logo: Option<Vec<u8>>,
    profile_json: Option<String>,
) -> Result<Vec<u8>, JsValue> {
    let profile = parse_profile(profile_json)?;
    let record: QuoteRecord = serde_wasm_bindgen::from_value(record)?;
    record.validate().map_err(js_error)?;

    QuoteRenderer::new(&profile)
        .render(&record.resolve(), logo.as_deref())
        .map(|rendered| rendered.bytes)
        .map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_br_format() {
        assert_eq!(BrFormat::format_phone("21980202797"), "(21) 98020-2797");
        assert_eq!(BrFormat::format_cpf("12345678900"), "123.456.789-00");
        assert_eq!(BrFormat::format_currency("12345"), "123,45");
        assert_eq!(BrFormat::slugify("Maria Souza"), "maria-souza");
    }

    #[wasm_bindgen_test]
    fn test_quote_number_shape() {
        let number = BrFormat::generate_quote_number();
        assert_eq!(number.len(), 12);
        assert_eq!(&number[8..9], "-");
    }
}
