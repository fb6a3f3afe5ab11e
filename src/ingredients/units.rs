use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grams assumed for one unit of anything we cannot weigh more precisely
pub const FALLBACK_GRAMS_PER_UNIT: f64 = 100.0;

/// Volume conversion constants (1 ml of food treated as 1 g)
const GRAMS_PER_CUP: f64 = 240.0;
const GRAMS_PER_TBSP: f64 = 15.0;
const GRAMS_PER_TSP: f64 = 5.0;

/// Weight conversion constants
const GRAMS_PER_OZ: f64 = 28.35;
const GRAMS_PER_LB: f64 = 453.59;

/// Normalized unit of an ingredient quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Cup,
    Tbsp,
    Tsp,
    Oz,
    Lb,
    G,
    Kg,
    Ml,
    L,
    Piece,
    Slice,
    Clove,
    Pinch,
    Can,
    Package,
    /// No recognized unit: the quantity counts whole items
    Whole,
}

impl Unit {
    /// Look up a unit token such as "cups", "Tbsp." or "grams".
    ///
    /// Returns `None` for anything outside the vocabulary; "whole" itself is
    /// not a token we match on.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        let token = token.trim_end_matches('.');
        let unit = match token {
            "cup" | "cups" | "c" => Unit::Cup,
            "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => Unit::Tbsp,
            "tsp" | "tsps" | "teaspoon" | "teaspoons" => Unit::Tsp,
            "oz" | "ounce" | "ounces" => Unit::Oz,
            "lb" | "lbs" | "pound" | "pounds" => Unit::Lb,
            "g" | "gr" | "gram" | "grams" => Unit::G,
            "kg" | "kgs" | "kilogram" | "kilograms" => Unit::Kg,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Unit::Ml,
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::L,
            "piece" | "pieces" | "pc" | "pcs" => Unit::Piece,
            "slice" | "slices" => Unit::Slice,
            "clove" | "cloves" => Unit::Clove,
            "pinch" | "pinches" => Unit::Pinch,
            "can" | "cans" => Unit::Can,
            "package" | "packages" | "pkg" | "pkgs" => Unit::Package,
            _ => return None,
        };
        Some(unit)
    }

    /// Canonical token, as used in [`ParsedIngredient::unit`](super::ParsedIngredient).
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Cup => "cup",
            Unit::Tbsp => "tbsp",
            Unit::Tsp => "tsp",
            Unit::Oz => "oz",
            Unit::Lb => "lb",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Piece => "piece",
            Unit::Slice => "slice",
            Unit::Clove => "clove",
            Unit::Pinch => "pinch",
            Unit::Can => "can",
            Unit::Package => "package",
            Unit::Whole => "whole",
        }
    }

    /// Approximate mass of one unit in grams.
    pub fn grams_per_unit(&self) -> f64 {
        match self {
            Unit::Cup => GRAMS_PER_CUP,
            Unit::Tbsp => GRAMS_PER_TBSP,
            Unit::Tsp => GRAMS_PER_TSP,
            Unit::Oz => GRAMS_PER_OZ,
            Unit::Lb => GRAMS_PER_LB,
            Unit::G | Unit::Ml => 1.0,
            Unit::Kg | Unit::L => 1000.0,
            Unit::Clove => 5.0,
            Unit::Slice => 25.0,
            Unit::Pinch => 0.5,
            Unit::Can => 400.0,
            Unit::Piece | Unit::Package | Unit::Whole => FALLBACK_GRAMS_PER_UNIT,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("whole") {
            return Ok(Unit::Whole);
        }
        Unit::from_token(s).ok_or_else(|| format!("Unknown unit: {}", s))
    }
}
