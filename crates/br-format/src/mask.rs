//! Phone, CPF and currency input masks

/// Maximum digits kept by the phone and CPF masks
const MAX_DIGITS: usize = 11;

/// Keep only ASCII digits
///
/// # Examples
/// ```
/// use br_format::digits;
/// assert_eq!(digits("(21) 98020-2797"), "21980202797");
/// assert_eq!(digits("abc"), "");
/// ```
pub fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

fn limited_digits(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect()
}

/// Format a Brazilian mobile number as `(DD) DDDDD-DDDD`
///
/// Partial input is masked progressively. An input without digits yields
/// an empty string rather than a lone `(`, so clearing the field leaves it
/// blank instead of keeping the opening parenthesis.
///
/// # Examples
/// ```
/// use br_format::format_phone;
/// assert_eq!(format_phone(""), "");
/// assert_eq!(format_phone("2"), "(2");
/// assert_eq!(format_phone("21"), "(21");
/// assert_eq!(format_phone("2198020"), "(21) 98020");
/// assert_eq!(format_phone("21980202797"), "(21) 98020-2797");
/// ```
pub fn format_phone(s: &str) -> String {
    let d = limited_digits(s);
    match d.len() {
        0 => String::new(),
        1..=2 => format!("({d}"),
        3..=7 => format!("({}) {}", &d[..2], &d[2..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

/// Format a CPF as `DDD.DDD.DDD-DD`
///
/// # Examples
/// ```
/// use br_format::format_cpf;
/// assert_eq!(format_cpf("1234"), "123.4");
/// assert_eq!(format_cpf("12345678900"), "123.456.789-00");
/// ```
pub fn format_cpf(s: &str) -> String {
    let d = limited_digits(s);
    match d.len() {
        0..=3 => d,
        4..=6 => format!("{}.{}", &d[..3], &d[3..]),
        7..=9 => format!("{}.{}.{}", &d[..3], &d[3..6], &d[6..]),
        _ => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
    }
}

/// Format typed digits as a pt-BR amount, reading them as cents
///
/// The digits are never converted to a number, so any length is formatted
/// exactly.
///
/// # Examples
/// ```
/// use br_format::format_currency;
/// assert_eq!(format_currency(""), "");
/// assert_eq!(format_currency("5"), "0,05");
/// assert_eq!(format_currency("12345"), "123,45");
/// assert_eq!(format_currency("R$ 1.500,00"), "1.500,00");
/// ```
pub fn format_currency(s: &str) -> String {
    let d = digits(s);
    if d.is_empty() {
        return String::new();
    }

    let significant = d.trim_start_matches('0');
    let cents = format!("{significant:0>3}");
    let (int_part, frac_part) = cents.split_at(cents.len() - 2);

    format!("{},{}", group_thousands(int_part, '.'), frac_part)
}

/// Insert a separator every three digits from the right
///
/// # Examples
/// ```
/// use br_format::group_thousands;
/// assert_eq!(group_thousands("1500", '.'), "1.500");
/// assert_eq!(group_thousands("100", '.'), "100");
/// ```
pub fn group_thousands(int_digits: &str, sep: char) -> String {
    let len = int_digits.chars().count();
    let mut result = String::with_capacity(len + len / 3);

    for (i, c) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}

/// Prefix an amount with the real sign (`R$ 1.500,00`)
pub fn currency_label(value: &str) -> String {
    format!("R$ {value}")
}
