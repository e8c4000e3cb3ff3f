//! Orçamento - Smart Ilha quote form and PDF renderer
//!
//! This crate provides:
//! - The quote record edited by the form, with input masks applied on update
//! - Validation of the three required fields
//! - A form controller that guards against overlapping submits
//! - The one-page A4 quote layout
//! - Logo sources and document sinks (directory, memory)
//! - Company profile configuration
//!
//! # Example
//!
//! ```ignore
//! use orcamento::{CompanyProfile, DirectorySink, Field, FileLogo, FormController};
//!
//! let profile = CompanyProfile::default();
//! let logo = FileLogo::new(&profile.logo_path);
//! let mut form = FormController::new(profile, logo, DirectorySink::new("downloads"));
//!
//! form.on_field_change(Field::ClientName, "Maria Souza");
//! form.on_field_change(Field::Model, "Series 11 Pro (47mm)");
//! form.on_field_change(Field::ProductValue, "150000");
//! form.submit().await?;
//! ```

pub mod catalog;
mod config;
mod form;
mod logo;
mod record;
mod renderer;
mod sink;

pub use config::CompanyProfile;
pub use form::{FormController, SUCCESS_INDICATOR_SECS};
#[cfg(feature = "fs")]
pub use logo::FileLogo;
pub use logo::{BytesLogo, LogoSource, NoLogo};
pub use record::{Field, QuoteRecord, ResolvedQuote};
pub use renderer::{render_quote, QuoteRenderer, RenderedQuote};
#[cfg(feature = "fs")]
pub use sink::DirectorySink;
pub use sink::{DocumentSink, MemorySink};

use thiserror::Error;

/// A required field is missing; the message is shown to the user as is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, preencha o nome do cliente.")]
    MissingClientName,

    #[error("Por favor, selecione o modelo do produto.")]
    MissingModel,

    #[error("Por favor, preencha o valor do produto.")]
    MissingProductValue,
}

impl ValidationError {
    /// The field the user has to fill in
    pub fn field(self) -> Field {
        match self {
            ValidationError::MissingClientName => Field::ClientName,
            ValidationError::MissingModel => Field::Model,
            ValidationError::MissingProductValue => Field::ProductValue,
        }
    }
}

/// Errors that can occur while laying out the quote
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),
}

/// The logo could not be loaded; rendering falls back to the company name
#[derive(Debug, Error)]
pub enum LogoError {
    #[error("Failed to read logo {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No logo available")]
    Missing,
}

/// Errors that can occur while handing the document over
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Download failed: {0}")]
    Download(String),
}

/// Errors that can occur while loading the company profile
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Why a submit produced no document
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("A quote is already being generated")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Save error: {0}")]
    Save(#[from] SinkError),
}

/// Generic message shown when the document could not be produced
pub const GENERATION_FAILED_MESSAGE: &str = "Erro ao gerar PDF. Tente novamente.";

impl SubmitError {
    /// Message for the blocking alert, `None` when nothing should be shown
    pub fn user_message(&self) -> Option<String> {
        match self {
            SubmitError::Busy => None,
            SubmitError::Invalid(e) => Some(e.to_string()),
            SubmitError::Render(_) | SubmitError::Save(_) => {
                Some(GENERATION_FAILED_MESSAGE.to_string())
            }
        }
    }
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;
