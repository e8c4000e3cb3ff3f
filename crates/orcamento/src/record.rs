//! Quote record edited by the form

use crate::catalog::{accessory_position, default_accessories, OTHER_MODEL};
use crate::{CompanyProfile, ValidationError};
use br_format::{
    currency_label, format_cpf, format_currency, format_date_br, format_phone, quote_number,
};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Editable form fields
///
/// Date, seller, warranty and freight are read-only and have no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    QuoteNumber,
    Validity,
    ClientName,
    ClientPhone,
    #[serde(rename = "clientCPF")]
    ClientCpf,
    ClientCity,
    Model,
    CustomModel,
    Color,
    ProductValue,
}

impl Field {
    /// All editable fields
    pub const ALL: [Field; 10] = [
        Field::QuoteNumber,
        Field::Validity,
        Field::ClientName,
        Field::ClientPhone,
        Field::ClientCpf,
        Field::ClientCity,
        Field::Model,
        Field::CustomModel,
        Field::Color,
        Field::ProductValue,
    ];

    /// JSON key of the field (e.g. "clientCPF")
    pub fn name(self) -> &'static str {
        match self {
            Field::QuoteNumber => "quoteNumber",
            Field::Validity => "validity",
            Field::ClientName => "clientName",
            Field::ClientPhone => "clientPhone",
            Field::ClientCpf => "clientCPF",
            Field::ClientCity => "clientCity",
            Field::Model => "model",
            Field::CustomModel => "customModel",
            Field::Color => "color",
            Field::ProductValue => "productValue",
        }
    }

    /// Look a field up by its JSON key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Form state for one quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub quote_number: String,
    pub date: String,
    pub validity: String,
    pub seller_name: String,
    pub client_name: String,
    pub client_phone: String,
    #[serde(rename = "clientCPF")]
    pub client_cpf: String,
    pub client_city: String,
    pub model: String,
    pub custom_model: String,
    pub color: String,
    pub warranty: String,
    pub accessories: Vec<String>,
    pub product_value: String,
    pub freight: String,
}

/// Record handed to the renderer: model resolved, total derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedQuote {
    pub quote_number: String,
    pub date: String,
    pub validity: String,
    pub seller_name: String,
    pub client_name: String,
    pub client_phone: String,
    #[serde(rename = "clientCPF")]
    pub client_cpf: String,
    pub client_city: String,
    pub model: String,
    pub color: String,
    pub warranty: String,
    pub accessories: Vec<String>,
    pub product_value: String,
    pub freight: String,
    pub total: String,
}

impl QuoteRecord {
    /// Create a blank quote dated `today`
    pub fn new<R: Rng>(profile: &CompanyProfile, today: NaiveDate, rng: &mut R) -> Self {
        Self {
            quote_number: quote_number(today, rng),
            date: format_date_br(today),
            validity: profile.default_validity.clone(),
            seller_name: profile.seller_name.clone(),
            client_name: String::new(),
            client_phone: String::new(),
            client_cpf: String::new(),
            client_city: profile.default_city.clone(),
            model: String::new(),
            custom_model: String::new(),
            color: String::new(),
            warranty: profile.warranty.clone(),
            accessories: default_accessories(),
            product_value: String::new(),
            freight: profile.freight.clone(),
        }
    }

    /// Create a blank quote for the current local date
    pub fn default_for(profile: &CompanyProfile) -> Self {
        Self::new(profile, br_format::today(), &mut rand::thread_rng())
    }

    /// Return the record with one field replaced
    ///
    /// Phone, CPF and product value are masked; other fields are stored as
    /// typed. Validity keeps its leading whole number of days, so `"1.5"`
    /// becomes `"1"` and `"7 dias"` becomes `"7"`.
    pub fn with_field(mut self, field: Field, value: &str) -> Self {
        debug!(field = field.name(), "field updated");

        match field {
            Field::QuoteNumber => self.quote_number = value.to_string(),
            Field::Validity => {
                self.validity = value
                    .trim_start()
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect()
            }
            Field::ClientName => self.client_name = value.to_string(),
            Field::ClientPhone => self.client_phone = format_phone(value),
            Field::ClientCpf => self.client_cpf = format_cpf(value),
            Field::ClientCity => self.client_city = value.to_string(),
            Field::Model => self.model = value.to_string(),
            Field::CustomModel => self.custom_model = value.to_string(),
            Field::Color => self.color = value.to_string(),
            Field::ProductValue => self.product_value = format_currency(value),
        }

        self
    }

    /// Return the record with an accessory checked or unchecked
    ///
    /// Selected accessories are kept in catalog order; names outside the
    /// catalog go last in selection order.
    pub fn with_accessory(mut self, accessory: &str, checked: bool) -> Self {
        debug!(accessory, checked, "accessory toggled");

        let present = self.accessories.iter().any(|a| a == accessory);
        if checked && !present {
            self.accessories.push(accessory.to_string());
        } else if !checked {
            self.accessories.retain(|a| a != accessory);
        }
        self.accessories
            .sort_by_key(|a| accessory_position(a).unwrap_or(usize::MAX));

        self
    }

    /// Check the required fields, stopping at the first missing one
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_name.trim().is_empty() {
            return Err(ValidationError::MissingClientName);
        }
        if self.model.is_empty() {
            return Err(ValidationError::MissingModel);
        }
        if self.product_value.is_empty() {
            return Err(ValidationError::MissingProductValue);
        }
        Ok(())
    }

    /// Model name as printed: the custom text when "outro" is selected
    pub fn display_model(&self) -> &str {
        if self.model == OTHER_MODEL {
            &self.custom_model
        } else {
            &self.model
        }
    }

    /// Total as printed (`R$ 0,00` while no value is typed)
    pub fn total(&self) -> String {
        let amount = format_currency(&self.product_value);
        if amount.is_empty() {
            currency_label("0,00")
        } else {
            currency_label(&amount)
        }
    }

    /// Build the record the renderer consumes
    pub fn resolve(&self) -> ResolvedQuote {
        ResolvedQuote {
            quote_number: self.quote_number.clone(),
            date: self.date.clone(),
            validity: self.validity.clone(),
            seller_name: self.seller_name.clone(),
            client_name: self.client_name.clone(),
            client_phone: self.client_phone.clone(),
            client_cpf: self.client_cpf.clone(),
            client_city: self.client_city.clone(),
            model: self.display_model().to_string(),
            color: self.color.clone(),
            warranty: self.warranty.clone(),
            accessories: self.accessories.clone(),
            product_value: self.product_value.clone(),
            freight: self.freight.clone(),
            total: self.total(),
        }
    }
}

impl Default for QuoteRecord {
    fn default() -> Self {
        Self::default_for(&CompanyProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record() -> QuoteRecord {
        let today = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        QuoteRecord::new(
            &CompanyProfile::default(),
            today,
            &mut StdRng::seed_from_u64(1),
        )
    }

    fn valid_record() -> QuoteRecord {
        record()
            .with_field(Field::ClientName, "Maria Souza")
            .with_field(Field::Model, "Series 11 Pro (47mm)")
            .with_field(Field::ProductValue, "150000")
    }

    #[test]
    fn test_new_record_defaults() {
        let r = record();
        assert!(r.quote_number.starts_with("20250307-"));
        assert_eq!(r.date, "07/03/2025");
        assert_eq!(r.validity, "1");
        assert_eq!(r.seller_name, "Flávio Oliveira");
        assert_eq!(r.client_city, "Rio de Janeiro");
        assert_eq!(r.warranty, "3 meses (90 dias)");
        assert_eq!(r.freight, "Grátis - R$ 0,00");
        assert_eq!(r.accessories.len(), 4);
        assert_eq!(r.client_name, "");
        assert_eq!(r.product_value, "");
    }

    #[test]
    fn test_with_field_applies_masks() {
        let r = record()
            .with_field(Field::ClientPhone, "21980202797")
            .with_field(Field::ClientCpf, "12345678900")
            .with_field(Field::ProductValue, "12345")
            .with_field(Field::Validity, "7 dias");

        assert_eq!(r.client_phone, "(21) 98020-2797");
        assert_eq!(r.client_cpf, "123.456.789-00");
        assert_eq!(r.product_value, "123,45");
        assert_eq!(r.validity, "7");
    }

    #[test]
    fn test_validity_stops_at_first_non_digit() {
        let days = |value: &str| record().with_field(Field::Validity, value).validity;

        assert_eq!(days("1.5"), "1");
        assert_eq!(days("15"), "15");
        assert_eq!(days(" 3 "), "3");
        assert_eq!(days("dias"), "");
        assert_eq!(days(""), "");
    }

    #[test]
    fn test_with_field_replaces_only_that_field() {
        let before = record();
        let after = before.clone().with_field(Field::ClientCity, "Niterói");

        assert_eq!(after.client_city, "Niterói");
        assert_eq!(
            QuoteRecord {
                client_city: before.client_city.clone(),
                ..after
            },
            before
        );
    }

    #[test]
    fn test_field_names_roundtrip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("date"), None);
        assert_eq!(Field::from_name("clientCpf"), None);
    }

    #[test]
    fn test_field_serde_name_matches() {
        for field in Field::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.name()));
        }
    }

    #[test]
    fn test_with_accessory_keeps_catalog_order() {
        let r = record()
            .with_accessory("Caixa original", false)
            .with_accessory("+Brindes promoção (atual)", true)
            .with_accessory("Caixa original", true);

        assert_eq!(
            r.accessories,
            vec![
                "Caixa original",
                "Cabo carregador",
                "Manual",
                "Pulseira Padrão",
                "+Brindes promoção (atual)",
            ]
        );
    }

    #[test]
    fn test_with_accessory_is_idempotent() {
        let r = record()
            .with_accessory("Manual", true)
            .with_accessory("Manual", true);
        assert_eq!(r.accessories.iter().filter(|a| *a == "Manual").count(), 1);

        let r = r.with_accessory("Manual", false).with_accessory("Manual", false);
        assert!(!r.accessories.iter().any(|a| a == "Manual"));
    }

    #[test]
    fn test_validate_order() {
        let r = record();
        assert_eq!(r.validate(), Err(ValidationError::MissingClientName));

        let r = r.with_field(Field::ClientName, "   ");
        assert_eq!(r.validate(), Err(ValidationError::MissingClientName));

        let r = r.with_field(Field::ClientName, "Maria");
        assert_eq!(r.validate(), Err(ValidationError::MissingModel));

        let r = r.with_field(Field::Model, "S11 Pro Mini (42mm)");
        assert_eq!(r.validate(), Err(ValidationError::MissingProductValue));

        let r = r.with_field(Field::ProductValue, "99900");
        assert_eq!(r.validate(), Ok(()));
    }

    #[test]
    fn test_validate_accepts_other_model_without_custom_text() {
        let r = valid_record().with_field(Field::Model, OTHER_MODEL);
        assert_eq!(r.validate(), Ok(()));
        assert_eq!(r.resolve().model, "");
    }

    #[test]
    fn test_resolve_custom_model() {
        let r = valid_record()
            .with_field(Field::Model, OTHER_MODEL)
            .with_field(Field::CustomModel, "Relógio X9");

        let resolved = r.resolve();
        assert_eq!(resolved.model, "Relógio X9");
    }

    #[test]
    fn test_resolve_total() {
        let resolved = valid_record().resolve();
        assert_eq!(resolved.model, "Series 11 Pro (47mm)");
        assert_eq!(resolved.product_value, "1.500,00");
        assert_eq!(resolved.total, "R$ 1.500,00");
    }

    #[test]
    fn test_total_preview_without_value() {
        assert_eq!(record().total(), "R$ 0,00");
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(valid_record()).unwrap();
        assert_eq!(json["clientName"], "Maria Souza");
        assert_eq!(json["clientCPF"], "");
        assert_eq!(json["productValue"], "1.500,00");
        assert!(json.get("total").is_none());
    }
}
