use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for URL slugs of products and categories
    /// Must be lowercase alphanumeric with single hyphens between words
    /// - Valid: "labial-rojo", "sombras", "paleta-12-tonos"
    /// - Invalid: "-labial", "labial-", "labial--rojo", "Labial", "labial_rojo"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Turn a display name into a URL slug.
///
/// Lowercases, transliterates accents ("Líquido" -> "liquido"), replaces
/// every run of non-alphanumerics with one hyphen and trims hyphens at both
/// ends.
pub fn slugify(name: &str) -> String {
    slug::slugify(name)
}

/// Use the given slug if non-blank, otherwise derive one from `name`.
pub fn slug_or_derive(slug: Option<&str>, name: &str) -> String {
    match slug.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => slugify(name),
    }
}

/// Trim optional free text and collapse blanks to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("labial-rojo"));
        assert!(SLUG_REGEX.is_match("sombras"));
        assert!(SLUG_REGEX.is_match("paleta-12-tonos"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-labial")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("labial-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("labial--rojo")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Labial")); // uppercase
        assert!(!SLUG_REGEX.is_match("labial_rojo")); // underscore
        assert!(!SLUG_REGEX.is_match(""));
        assert!(!SLUG_REGEX.is_match("labial rojo"));
    }

    #[test]
    fn test_slugify_strips_diacritics_and_symbols() {
        assert_eq!(
            slugify("Labial Líquido Mate Duración Extendida"),
            "labial-liquido-mate-duracion-extendida"
        );
        assert_eq!(slugify("  Sombras  --  Azules! "), "sombras-azules");
        assert_eq!(slugify("Máscara de Pestañas"), "mascara-de-pestanas");
    }

    #[test]
    fn test_slugify_output_matches_slug_regex() {
        for name in ["Brochas & Pinceles", "Polvo Compacto #2", "Ñ"] {
            assert!(SLUG_REGEX.is_match(&slugify(name)), "{}", name);
        }
    }

    #[test]
    fn test_slug_or_derive() {
        assert_eq!(slug_or_derive(Some("custom"), "Labial Rojo"), "custom");
        assert_eq!(slug_or_derive(Some("   "), "Labial Rojo"), "labial-rojo");
        assert_eq!(slug_or_derive(None, "Labial Rojo"), "labial-rojo");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Bella ".into())), Some("Bella".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
