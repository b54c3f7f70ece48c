use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Ingredient, Quantity};

/// Leading amount: mixed number ("2 1/4"), bare fraction ("3/4"),
/// decimal ("0.5"), or integer ("2").
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?)(\s+|$)").unwrap());

/// Unit token directly after the amount. Mirrors the measurement words the
/// catalog data actually uses; anything else is treated as part of the item.
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(cups?|tbsps?|tablespoons?|tsps?|teaspoons?|fl\.?\s?oz\.?|pints?|pts?|quarts?|qts?|gallons?|gals?|milliliters?|ml|liters?|litres?|lbs?\.?|pounds?|oz|ounces?|grams?|kilograms?|kg|cans?|bottles?|jars?|packages?|pkgs?|boxes?|cloves?|pieces?|pcs?|slices?|heads?|bunch(?:es)?|stalks?|racks?|squares?|pinch(?:es)?|dash(?:es)?)\s+",
    )
    .unwrap()
});

static NOTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\(([^)]*)\)\s*").unwrap());

/// Result of parsing one free-text ingredient line.
///
/// Parsing never fails: a line the parser cannot confidently split into
/// quantity/unit/item comes back as `Unparsed`, and converting that to an
/// [`Ingredient`] keeps the whole line as the item with a quantity of 1.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Parsed(Ingredient),
    Unparsed(String),
}

impl ParsedLine {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParsedLine::Parsed(_))
    }

    pub fn into_ingredient(self) -> Ingredient {
        match self {
            ParsedLine::Parsed(ingredient) => ingredient,
            ParsedLine::Unparsed(line) => Ingredient {
                quantity: Quantity::default(),
                unit: None,
                item: line.trim().to_string(),
                preparation: None,
                notes: None,
            },
        }
    }
}

/// Parse a free-text ingredient line such as
/// `"2 cups all-purpose flour"` or `"1 cup butter, softened (cold)"`.
pub fn parse_line(line: &str) -> ParsedLine {
    let trimmed = line.trim();

    let Some(amount_match) = AMOUNT_RE.captures(trimmed) else {
        return ParsedLine::Unparsed(trimmed.to_string());
    };
    let amount_str = amount_match.get(1).map(|m| m.as_str()).unwrap_or_default();
    let mut rest = trimmed[amount_match.get(0).map(|m| m.end()).unwrap_or(0)..].trim_start();

    // Ranges like "1/4 to 1/2 cup" keep the whole range as a textual quantity.
    let mut quantity = match parse_amount(amount_str) {
        Some(value) => Quantity::Numeric(value),
        None => return ParsedLine::Unparsed(trimmed.to_string()),
    };
    if let Some(after_to) = rest.strip_prefix("to ") {
        if let Some(upper) = AMOUNT_RE.captures(after_to.trim_start()) {
            let upper_str = upper.get(1).map(|m| m.as_str()).unwrap_or_default();
            quantity = Quantity::Text(format!("{amount_str} to {upper_str}"));
            rest = after_to[upper.get(0).map(|m| m.end()).unwrap_or(0)..].trim_start();
        }
    }

    let unit = UNIT_RE.find(rest).map(|m| {
        let token = rest[m.start()..m.end()].trim().to_string();
        rest = &rest[m.end()..];
        token
    });

    // Trailing parenthetical becomes a note.
    let mut notes = None;
    let without_notes = match NOTES_RE.captures(rest) {
        Some(caps) => {
            let captured = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            if !captured.is_empty() {
                notes = Some(captured.to_string());
            }
            NOTES_RE.replace(rest, " ").trim().to_string()
        }
        None => rest.trim().to_string(),
    };

    // ", softened" style suffix becomes the preparation.
    let (item, preparation) = match without_notes.split_once(',') {
        Some((item, prep)) if !prep.trim().is_empty() => {
            (item.trim().to_string(), Some(prep.trim().to_string()))
        }
        _ => (without_notes.trim_end_matches(',').trim().to_string(), None),
    };

    if item.is_empty() {
        return ParsedLine::Unparsed(trimmed.to_string());
    }

    ParsedLine::Parsed(Ingredient {
        quantity,
        unit,
        item,
        preparation,
        notes,
    })
}

/// Parse "2", "0.5", "3/4", or "2 1/4" into a number.
fn parse_amount(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Some((whole, frac)) = s.split_once(char::is_whitespace) {
        let whole: f64 = whole.trim().parse().ok()?;
        return Some(whole + parse_fraction(frac.trim())?);
    }
    if s.contains('/') {
        return parse_fraction(s);
    }
    s.parse().ok()
}

fn parse_fraction(s: &str) -> Option<f64> {
    let (num, den) = s.split_once('/')?;
    let num: f64 = num.trim().parse().ok()?;
    let den: f64 = den.trim().parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}
