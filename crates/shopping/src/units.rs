use std::collections::HashMap;
use std::sync::LazyLock;

use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Measurement category. Informational only: aggregation never converts
/// across categories or across different canonical units.
#[derive(
    EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UnitCategory {
    Volume,
    Weight,
    Count,
    #[default]
    Other,
}

/// Static reference entry: one canonical unit and every accepted spelling.
#[derive(Debug)]
pub struct UnitDefinition {
    pub canonical: &'static str,
    pub variations: &'static [&'static str],
    pub category: UnitCategory,
}

/// Unit definitions with all common variations. Variations are stored
/// lowercase; lookups lowercase their input first.
static UNIT_DEFINITIONS: &[UnitDefinition] = &[
    // Volume - US/Imperial
    UnitDefinition {
        canonical: "cup",
        variations: &["cup", "cups", "c"],
        category: UnitCategory::Volume,
    },
    UnitDefinition {
        canonical: "tbsp",
        variations: &["tbsp", "tbsps", "tablespoon", "tablespoons"],
        category: UnitCategory::Volume,
    },
    UnitDefinition {
        canonical: "tsp",
        variations: &["tsp", "tsps", "teaspoon", "teaspoons", "t"],
        category: UnitCategory::Volume,
    },
    UnitDefinition {
        canonical: "fluid ounce",
        variations: &["fl oz", "fl. oz.", "fluid ounce", "fluid ounces", "floz"],
        category: UnitCategory::Volume,
    },
    UnitDefinition {
        canonical: "pint",
        variations: &["pint", "pints", "pt", "pts"],
        category: UnitCategory::Volume,
    },
    UnitDefinition {
        canonical: "quart",
        variations: &["quart", "quarts", "qt", "qts"],
        category: UnitCategory::Volume,
    },
    UnitDefinition {
        canonical: "gallon",
        variations: &["gallon", "gallons", "gal", "gals"],
        category: UnitCategory::Volume,
    },
    // Volume - Metric
    UnitDefinition {
        canonical: "milliliter",
        variations: &["milliliter", "milliliters", "ml", "mls"],
        category: UnitCategory::Volume,
    },
    UnitDefinition {
        canonical: "liter",
        variations: &["liter", "liters", "litre", "litres", "l"],
        category: UnitCategory::Volume,
    },
    // Weight - US/Imperial
    UnitDefinition {
        canonical: "ounce",
        variations: &["ounce", "ounces", "oz", "ozs"],
        category: UnitCategory::Weight,
    },
    UnitDefinition {
        canonical: "pound",
        variations: &["pound", "pounds", "lb", "lbs", "lb.", "lbs."],
        category: UnitCategory::Weight,
    },
    // Weight - Metric
    UnitDefinition {
        canonical: "gram",
        variations: &["gram", "grams", "g", "gr"],
        category: UnitCategory::Weight,
    },
    UnitDefinition {
        canonical: "kilogram",
        variations: &["kilogram", "kilograms", "kg", "kgs"],
        category: UnitCategory::Weight,
    },
    // Count / container
    UnitDefinition {
        canonical: "can",
        variations: &["can", "cans"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "bottle",
        variations: &["bottle", "bottles"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "jar",
        variations: &["jar", "jars"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "package",
        variations: &["package", "packages", "pkg", "pkgs"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "box",
        variations: &["box", "boxes"],
        category: UnitCategory::Count,
    },
    // Food-specific
    UnitDefinition {
        canonical: "clove",
        variations: &["clove", "cloves"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "piece",
        variations: &["piece", "pieces", "pc", "pcs"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "slice",
        variations: &["slice", "slices"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "head",
        variations: &["head", "heads"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "bunch",
        variations: &["bunch", "bunches"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "stalk",
        variations: &["stalk", "stalks"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "rack",
        variations: &["rack", "racks"],
        category: UnitCategory::Count,
    },
    UnitDefinition {
        canonical: "square",
        variations: &["square", "squares"],
        category: UnitCategory::Count,
    },
    // Other
    UnitDefinition {
        canonical: "pinch",
        variations: &["pinch", "pinches"],
        category: UnitCategory::Other,
    },
    UnitDefinition {
        canonical: "dash",
        variations: &["dash", "dashes"],
        category: UnitCategory::Other,
    },
    UnitDefinition {
        canonical: "to taste",
        variations: &["to taste"],
        category: UnitCategory::Other,
    },
];

/// variation → definition lookup, built once. Later entries win on duplicate
/// variations, so the table must keep each spelling unique.
static UNIT_LOOKUP: LazyLock<HashMap<&'static str, &'static UnitDefinition>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();
        for def in UNIT_DEFINITIONS {
            for variation in def.variations {
                map.insert(*variation, def);
            }
        }
        map
    });

fn definition_for(unit: &str) -> Option<&'static UnitDefinition> {
    UNIT_LOOKUP.get(unit.trim().to_lowercase().as_str()).copied()
}

fn definition_for_canonical(canonical: &str) -> Option<&'static UnitDefinition> {
    UNIT_DEFINITIONS.iter().find(|d| d.canonical == canonical)
}

/// Normalize a unit string to its canonical form.
///
/// Unknown units are returned lowercased and trimmed rather than erroring,
/// so aggregation can still group and display them.
///
/// ```
/// use shopping::units::normalize_unit;
/// assert_eq!(normalize_unit("cups"), "cup");
/// assert_eq!(normalize_unit("lbs"), "pound");
/// assert_eq!(normalize_unit("Tablespoons"), "tbsp");
/// ```
pub fn normalize_unit(unit: &str) -> String {
    let normalized = unit.trim().to_lowercase();
    match UNIT_LOOKUP.get(normalized.as_str()) {
        Some(def) => def.canonical.to_string(),
        None => normalized,
    }
}

/// Display form of a canonical unit for a given quantity: singular within
/// 0.01 of 1 (tolerating float summation error), otherwise plural.
///
/// True abbreviations (a short canonical that stands in for a longer word,
/// like "tbsp" for "tablespoon") are never pluralized.
///
/// ```
/// use shopping::units::display_unit;
/// assert_eq!(display_unit("cup", 1.0), "cup");
/// assert_eq!(display_unit("cup", 2.0), "cups");
/// assert_eq!(display_unit("tbsp", 5.0), "tbsp");
/// ```
pub fn display_unit(canonical: &str, quantity: f64) -> String {
    let Some(def) = definition_for_canonical(canonical) else {
        return canonical.to_string();
    };

    if is_abbreviation(def) {
        return canonical.to_string();
    }

    if (quantity - 1.0).abs() < 0.01 {
        return canonical.to_string();
    }

    def.variations
        .iter()
        .find(|v| **v != def.canonical && v.ends_with('s') && !v.contains('.'))
        .map(|v| v.to_string())
        .unwrap_or_else(|| format!("{canonical}s"))
}

/// A canonical counts as an abbreviation when it is short and its variation
/// list carries a longer full word it abbreviates ("tbsp" → "tablespoon").
/// Short full words like "cup" still pluralize.
fn is_abbreviation(def: &UnitDefinition) -> bool {
    def.canonical.len() <= 4
        && !def.canonical.contains(' ')
        && def
            .variations
            .iter()
            .any(|v| v.len() > def.canonical.len() && !v.ends_with('s') && !v.contains('.'))
}

/// Category of a unit (accepts any variation). Unknown units are `Other`.
pub fn unit_category(unit: &str) -> UnitCategory {
    definition_for(unit)
        .map(|d| d.category)
        .unwrap_or(UnitCategory::Other)
}

/// Whether two unit spellings normalize to the same canonical unit.
pub fn units_equivalent(unit1: &str, unit2: &str) -> bool {
    normalize_unit(unit1) == normalize_unit(unit2)
}

/// All known unit variations (useful for validation).
pub fn known_units() -> Vec<&'static str> {
    let mut units: Vec<&'static str> = UNIT_LOOKUP.keys().copied().collect();
    units.sort_unstable();
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_variations_to_canonical() {
        assert_eq!(normalize_unit("cups"), "cup");
        assert_eq!(normalize_unit("Cups"), "cup");
        assert_eq!(normalize_unit("  lbs. "), "pound");
        assert_eq!(normalize_unit("tablespoons"), "tbsp");
        assert_eq!(normalize_unit("litres"), "liter");
        assert_eq!(normalize_unit("fl. oz."), "fluid ounce");
    }

    #[test]
    fn unknown_unit_passes_through_lowercased() {
        assert_eq!(normalize_unit("Handful"), "handful");
        assert_eq!(normalize_unit("glug"), "glug");
    }

    #[test]
    fn equivalence_matches_canonical_closure() {
        // Same canonical: every pair of variations is equivalent.
        for def in super::UNIT_DEFINITIONS {
            for a in def.variations {
                for b in def.variations {
                    assert!(units_equivalent(a, b), "{a} vs {b}");
                }
            }
        }
        // Different canonicals are never equivalent.
        assert!(!units_equivalent("cup", "tbsp"));
        assert!(!units_equivalent("pound", "ounce"));
        assert!(units_equivalent("lb", "pounds"));
    }

    #[test]
    fn pluralization_around_one() {
        assert_eq!(display_unit("cup", 1.0), "cup");
        assert_eq!(display_unit("cup", 1.004), "cup");
        assert_eq!(display_unit("cup", 2.0), "cups");
        assert_eq!(display_unit("pound", 3.0), "pounds");
        assert_eq!(display_unit("box", 2.0), "boxes");
    }

    #[test]
    fn abbreviations_never_pluralize() {
        assert_eq!(display_unit("tbsp", 5.0), "tbsp");
        assert_eq!(display_unit("tsp", 0.5), "tsp");
    }

    #[test]
    fn multi_word_units_pluralize_from_the_table() {
        assert_eq!(display_unit("fluid ounce", 8.0), "fluid ounces");
    }

    #[test]
    fn unknown_canonical_displays_unchanged() {
        assert_eq!(display_unit("handful", 3.0), "handful");
    }

    #[test]
    fn categories() {
        assert_eq!(unit_category("cups"), UnitCategory::Volume);
        assert_eq!(unit_category("kg"), UnitCategory::Weight);
        assert_eq!(unit_category("cloves"), UnitCategory::Count);
        assert_eq!(unit_category("pinch"), UnitCategory::Other);
        assert_eq!(unit_category("mystery"), UnitCategory::Other);
    }

    #[test]
    fn every_variation_maps_to_exactly_one_canonical() {
        use std::collections::HashMap;
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for def in super::UNIT_DEFINITIONS {
            for v in def.variations {
                if let Some(previous) = seen.insert(v, def.canonical) {
                    panic!("variation {v:?} registered for both {previous:?} and {:?}", def.canonical);
                }
            }
        }
    }

    #[test]
    fn known_units_covers_the_table() {
        let known = known_units();
        assert!(known.contains(&"cups"));
        assert!(known.contains(&"to taste"));
        assert!(known.len() > 50);
    }
}
