//! Company profile: the fixed texts printed on every quote

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Company texts and form defaults
///
/// Every key is optional in JSON; missing keys keep the Smart Ilha values.
///
/// ```
/// use orcamento::CompanyProfile;
///
/// let profile = CompanyProfile::from_json(r#"{ "sellerName": "Ana Lima" }"#).unwrap();
/// assert_eq!(profile.seller_name, "Ana Lima");
/// assert_eq!(profile.default_city, "Rio de Janeiro");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Drawn in the header when the logo is unavailable
    pub company_name: String,

    /// Right-aligned contact lines in the header band
    pub header_lines: Vec<String>,

    /// Centered text in the bottom band
    pub tagline: String,

    /// Italic notes above the footer band
    pub disclaimers: Vec<String>,

    pub seller_name: String,
    pub warranty: String,
    pub freight: String,
    pub default_city: String,

    /// Validity in days for a new quote
    pub default_validity: String,

    /// Filename stem before the client slug
    pub filename_prefix: String,

    pub logo_path: PathBuf,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            company_name: "SMART ILHA".to_string(),
            header_lines: vec![
                "www.smartilha.com.br | @smartilha".to_string(),
                "CNPJ: 56.997.212/0001-40".to_string(),
                "WhatsApp: (21) 98020-2797".to_string(),
                "Ilha do Governador - RJ".to_string(),
            ],
            tagline: "Smart Ilha - Tecnologia e Confiança | www.smartilha.com.br | @smartilha"
                .to_string(),
            disclaimers: vec![
                "Este orçamento não caracteriza reserva de produto.".to_string(),
                "Garantia de 90 dias contra defeitos de fabricação.".to_string(),
            ],
            seller_name: "Flávio Oliveira".to_string(),
            warranty: "3 meses (90 dias)".to_string(),
            freight: "Grátis - R$ 0,00".to_string(),
            default_city: "Rio de Janeiro".to_string(),
            default_validity: "1".to_string(),
            filename_prefix: "orcamento-smart-ilha".to_string(),
            logo_path: PathBuf::from("public/images/logo11.png"),
        }
    }
}

impl CompanyProfile {
    /// Parse a profile from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a profile from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_is_default() {
        let profile = CompanyProfile::from_json("{}").unwrap();
        assert_eq!(profile, CompanyProfile::default());
    }

    #[test]
    fn test_partial_override() {
        let profile = CompanyProfile::from_json(
            r#"{
                "headerLines": ["Loja Centro"],
                "freight": "R$ 25,00",
                "logoPath": "assets/logo.jpg"
            }"#,
        )
        .unwrap();

        assert_eq!(profile.header_lines, vec!["Loja Centro".to_string()]);
        assert_eq!(profile.freight, "R$ 25,00");
        assert_eq!(profile.logo_path, PathBuf::from("assets/logo.jpg"));
        assert_eq!(profile.warranty, "3 meses (90 dias)");
    }

    #[test]
    fn test_invalid_json() {
        let result = CompanyProfile::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::JsonError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = CompanyProfile::from_file("/nonexistent/profile.json");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(CompanyProfile::default()).unwrap();
        assert_eq!(json["sellerName"], "Flávio Oliveira");
        assert_eq!(json["filenamePrefix"], "orcamento-smart-ilha");
    }
}
