//! pt-BR dates and quote numbers

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;

/// Format a date as `DD/MM/YYYY`
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use br_format::format_date_br;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
/// assert_eq!(format_date_br(date), "07/03/2025");
/// ```
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Build a quote number `YYYYMMDD-NNN` with NNN drawn from 001..=999
pub fn quote_number<R: Rng>(date: NaiveDate, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(1..=999);
    format!(
        "{:04}{:02}{:02}-{:03}",
        date.year(),
        date.month(),
        date.day(),
        suffix
    )
}

/// Quote number for today's local date
pub fn generate_quote_number() -> String {
    quote_number(today(), &mut rand::thread_rng())
}

/// Current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
