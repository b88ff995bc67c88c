//! Splits free-text ingredient lines into quantity, unit and name.
//!
//! Parsing is lenient: every input yields a [`ParsedIngredientLine`].
//! Lines that do not start with a number keep their whole text as the
//! ingredient name.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::ParsedIngredientLine;

// quantity (fraction | decimal | integer), then an optional single-token
// unit, then the remainder. The remainder needs leading whitespace, so a
// line made of a lone token never matches. Digits are ASCII only.
static INGREDIENT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9]+/[0-9]+|[0-9]+\.[0-9]+|[0-9]+)?(?:\s+(\S+))?\s+(.*)$")
        .expect("ingredient line pattern is valid")
});

/// Parse a single ingredient line.
///
/// ```
/// use recipe_ingest::ingredient_parser::parse_ingredient_line;
///
/// let parsed = parse_ingredient_line("1/2 tsp salt");
/// assert_eq!(parsed.quantity, Some(0.5));
/// assert_eq!(parsed.unit.as_deref(), Some("tsp"));
/// assert_eq!(parsed.name, "salt");
/// ```
pub fn parse_ingredient_line(line: &str) -> ParsedIngredientLine {
    let whole_line = || ParsedIngredientLine {
        quantity: None,
        unit: None,
        name: line.trim().to_lowercase(),
    };

    // Scraped lines may keep a trailing "\n" or "\r\n".
    let Some(caps) = INGREDIENT_LINE.captures(line.trim_end()) else {
        return whole_line();
    };
    let Some(quantity_token) = caps.get(1) else {
        return whole_line();
    };

    let rest = caps.get(3).map_or("", |m| m.as_str());
    ParsedIngredientLine {
        quantity: parse_quantity(quantity_token.as_str()),
        unit: caps.get(2).map(|m| m.as_str().to_string()),
        name: rest.trim().to_lowercase(),
    }
}

/// Evaluate a quantity token. Fractions divide numerator by denominator;
/// a zero denominator or an unparsable token gives `None`.
fn parse_quantity(token: &str) -> Option<f64> {
    match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().ok()?;
            let denominator: f64 = denominator.parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            Some(numerator / denominator)
        }
        None => token.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(quantity: Option<f64>, unit: Option<&str>, name: &str) -> ParsedIngredientLine {
        ParsedIngredientLine {
            quantity,
            unit: unit.map(str::to_string),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_parse_ingredient_line() {
        let cases = [
            ("2 cups sugar", parsed(Some(2.0), Some("cups"), "sugar")),
            ("1/2 tsp salt", parsed(Some(0.5), Some("tsp"), "salt")),
            (
                "1.25 tablespoons olive oil",
                parsed(Some(1.25), Some("tablespoons"), "olive oil"),
            ),
            ("egg", parsed(None, None, "egg")),
        ];

        for (raw, expected) in cases {
            assert_eq!(parse_ingredient_line(raw), expected, "line: {raw:?}");
        }
    }

    #[test]
    fn test_zero_quantity_is_kept() {
        assert_eq!(
            parse_ingredient_line("0 cups flour"),
            parsed(Some(0.0), Some("cups"), "flour")
        );
    }

    #[test]
    fn test_zero_denominator_drops_quantity_only() {
        assert_eq!(
            parse_ingredient_line("1/0 cups flour"),
            parsed(None, Some("cups"), "flour")
        );
    }

    #[test]
    fn test_leading_word_without_quantity_is_not_split() {
        assert_eq!(
            parse_ingredient_line("Pinch of Salt"),
            parsed(None, None, "pinch of salt")
        );
    }

    #[test]
    fn test_quantity_followed_directly_by_name() {
        assert_eq!(parse_ingredient_line("2 eggs"), parsed(Some(2.0), None, "eggs"));
        assert_eq!(parse_ingredient_line("1 cup"), parsed(Some(1.0), None, "cup"));
    }

    #[test]
    fn test_mixed_number_takes_fraction_as_unit() {
        // Only the leading integer is a quantity; the unit slot takes "1/2".
        assert_eq!(
            parse_ingredient_line("1 1/2 cups white Basmati rice, uncooked"),
            parsed(Some(1.0), Some("1/2"), "cups white basmati rice, uncooked")
        );
    }

    #[test]
    fn test_unit_case_is_preserved() {
        let result = parse_ingredient_line("2 TBSP Butter");
        assert_eq!(result.unit.as_deref(), Some("TBSP"));
        assert_eq!(result.name, "butter");
    }

    #[test]
    fn test_whitespace_never_leaks_into_name() {
        assert_eq!(
            parse_ingredient_line("  Salt And Pepper  "),
            parsed(None, None, "salt and pepper")
        );
        assert_eq!(
            parse_ingredient_line("3  cups   flour "),
            parsed(Some(3.0), Some("cups"), "flour")
        );
        assert_eq!(parse_ingredient_line("egg "), parsed(None, None, "egg"));
    }

    #[test]
    fn test_trailing_line_break_keeps_split() {
        assert_eq!(
            parse_ingredient_line("2 cups sugar\n"),
            parsed(Some(2.0), Some("cups"), "sugar")
        );
        assert_eq!(
            parse_ingredient_line("2 cups sugar\r\n"),
            parsed(Some(2.0), Some("cups"), "sugar")
        );
        assert_eq!(parse_ingredient_line("egg\r\n"), parsed(None, None, "egg"));
    }

    #[test]
    fn test_non_ascii_digits_are_not_quantities() {
        assert_eq!(
            parse_ingredient_line("٣ cups flour"),
            parsed(None, None, "٣ cups flour")
        );
    }

    #[test]
    fn test_lone_number_is_a_name() {
        assert_eq!(parse_ingredient_line("12"), parsed(None, None, "12"));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_ingredient_line(""), parsed(None, None, ""));
        assert_eq!(parse_ingredient_line("   "), parsed(None, None, ""));
    }

    #[test]
    fn test_parenthesised_note_stays_in_name() {
        assert_eq!(
            parse_ingredient_line("1 can (16 oz.) black beans, drained and rinsed"),
            parsed(Some(1.0), Some("can"), "(16 oz.) black beans, drained and rinsed")
        );
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Some(3.0));
        assert_eq!(parse_quantity("2.5"), Some(2.5));
        assert_eq!(parse_quantity("3/4"), Some(0.75));
        assert_eq!(parse_quantity("0/0"), None);
    }
}
