/// Keyword table consulted in declaration order; the first keyword contained
/// in the style name wins. Multi-keyword names like "ExtraBold-Light" thus
/// resolve to the earlier entry (light, 300), not the longest match, and
/// "extrabold" alone resolves through "bold" to 600. The order must not be
/// rearranged.
pub const WEIGHT_KEYWORDS: &[(&str, u16)] = &[
    ("thin", 100),
    ("hairline", 100),
    ("extralight", 200),
    ("ultralight", 200),
    ("light", 300),
    ("regular", 400),
    ("normal", 400),
    ("medium", 500),
    ("semibold", 600),
    ("bold", 600),
    ("extrabold", 800),
    ("heavy", 800),
    ("black", 900),
    ("ultrablack", 900),
];

/// Weight used when no keyword matches
pub const DEFAULT_WEIGHT: u16 = 400;

/// Determine the CSS weight value from a style directory name
pub fn infer_weight(style_name: &str) -> u16 {
    let lower = style_name.to_lowercase();
    for &(keyword, weight) in WEIGHT_KEYWORDS {
        if lower.contains(keyword) {
            return weight;
        }
    }
    DEFAULT_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_their_table_values() {
        assert_eq!(infer_weight("Thin"), 100);
        assert_eq!(infer_weight("Hairline"), 100);
        assert_eq!(infer_weight("ExtraLight"), 200);
        assert_eq!(infer_weight("UltraLight"), 200);
        assert_eq!(infer_weight("Light"), 300);
        assert_eq!(infer_weight("Regular"), 400);
        assert_eq!(infer_weight("Normal"), 400);
        assert_eq!(infer_weight("Medium"), 500);
        assert_eq!(infer_weight("SemiBold-Italic"), 600);
        assert_eq!(infer_weight("Heavy"), 800);
        assert_eq!(infer_weight("Black"), 900);
        assert_eq!(infer_weight("UltraBlack"), 900);
    }

    #[test]
    fn bold_maps_to_600() {
        assert_eq!(infer_weight("Bold"), 600);
    }

    #[test]
    fn names_without_keywords_default_to_400() {
        assert_eq!(infer_weight("Condensed"), 400);
        assert_eq!(infer_weight("Oblique"), 400);
        assert_eq!(infer_weight(""), 400);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(infer_weight("SEMIBOLD"), 600);
        assert_eq!(infer_weight("semibold"), 600);
    }

    #[test]
    fn first_keyword_in_table_order_wins() {
        // light is enumerated before bold and extrabold
        assert_eq!(infer_weight("ExtraBold-Light"), 300);
        // bold is enumerated before extrabold, so extrabold never wins alone
        assert_eq!(infer_weight("ExtraBold"), 600);
        // thin is the first entry of the table
        assert_eq!(infer_weight("Thin-Heavy"), 100);
    }

    #[test]
    fn table_order_is_pinned() {
        let keywords: Vec<&str> = WEIGHT_KEYWORDS.iter().map(|(keyword, _)| *keyword).collect();
        assert_eq!(
            keywords,
            [
                "thin",
                "hairline",
                "extralight",
                "ultralight",
                "light",
                "regular",
                "normal",
                "medium",
                "semibold",
                "bold",
                "extrabold",
                "heavy",
                "black",
                "ultrablack",
            ]
        );
    }
}
