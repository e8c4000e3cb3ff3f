/// Turn a client name into a filename-safe slug
///
/// Trims, lowercases, turns whitespace runs into `-` and drops every
/// character outside `[a-z0-9-]`. Accented letters are dropped, not folded.
///
/// # Examples
/// ```
/// use br_format::slugify;
/// assert_eq!(slugify("João da Silva!!"), "joo-da-silva");
/// assert_eq!(slugify("   "), "");
/// ```
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut in_whitespace = false;

    for c in s.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Maria Souza"), "maria-souza");
        assert_eq!(slugify("  Ana   Paula  "), "ana-paula");
        assert_eq!(slugify("Cliente\t2024"), "cliente-2024");
    }

    #[test]
    fn test_slugify_strips_non_ascii_and_punctuation() {
        let slug = slugify("João da Silva!!");
        assert_eq!(slug, "joo-da-silva");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.contains("--"));
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
