//! BR Format - Brazilian Portuguese formatting helpers
//!
//! This crate provides:
//! - Input masks for phone numbers, CPF and currency (R$)
//! - pt-BR thousands grouping and dates (DD/MM/YYYY)
//! - Quote number generation (`YYYYMMDD-NNN`)
//! - Filename slugs
//!
//! Every function is total: non-digit input is discarded, never rejected.
//!
//! # Example
//!
//! ```
//! use br_format::{format_cpf, format_currency, format_phone, slugify};
//!
//! assert_eq!(format_phone("21980202797"), "(21) 98020-2797");
//! assert_eq!(format_cpf("12345678900"), "123.456.789-00");
//! assert_eq!(format_currency("150000"), "1.500,00");
//! assert_eq!(slugify("  Maria Souza "), "maria-souza");
//! ```

mod date;
mod mask;
mod slug;

pub use date::{format_date_br, generate_quote_number, quote_number, today};
pub use mask::{
    currency_label, digits, format_cpf, format_currency, format_phone, group_thousands,
};
pub use slug::slugify;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_are_idempotent() {
        for input in ["", "2", "21", "2198", "2198020", "21980202797", "219802027971234"] {
            let once = format_phone(input);
            assert_eq!(format_phone(&once), once, "phone {input:?}");
        }
        for input in ["", "123", "1234", "1234567", "12345678900", "123456789001"] {
            let once = format_cpf(input);
            assert_eq!(format_cpf(&once), once, "cpf {input:?}");
        }
        for input in ["", "0", "5", "12345", "150000", "000123", "99999999999999999999"] {
            let once = format_currency(input);
            assert_eq!(format_currency(&once), once, "currency {input:?}");
        }
    }
}
