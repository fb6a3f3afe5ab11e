//! Ingredient line normalization.
//!
//! Splits a raw line like "1 1/2 cups flour" into quantity, unit and food,
//! and converts quantity and unit into grams for nutrient scaling.

mod units;

pub use self::units::{Unit, FALLBACK_GRAMS_PER_UNIT};

use log::debug;
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

static MIXED_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)/(\d+)").expect("valid mixed fraction regex"));
static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)/(\d+)").expect("valid fraction regex"));
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+").expect("valid decimal regex"));
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+").expect("valid integer regex"));

/// An ingredient line split into its parts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIngredient {
    pub quantity: f64,
    pub unit: Unit,
    pub food: String,
}

impl ParsedIngredient {
    /// Estimated mass of the whole quantity in grams.
    pub fn grams(&self) -> f64 {
        self.quantity * self.unit.grams_per_unit()
    }
}

/// Parse one raw ingredient line.
///
/// Never fails: a line without a leading number counts as quantity 1, and a
/// line without a known unit word uses [`Unit::Whole`].
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    let line = line.trim();
    let (quantity, rest) = match parse_quantity(line) {
        Some((quantity, consumed)) => (quantity, line[consumed..].trim_start()),
        None => (1.0, line),
    };

    let (unit, food) = match rest.split_once(char::is_whitespace) {
        Some((token, tail)) => match Unit::from_token(token) {
            Some(unit) => (unit, tail.trim()),
            None => (Unit::Whole, rest),
        },
        None => match Unit::from_token(rest) {
            Some(unit) => (unit, ""),
            None => (Unit::Whole, rest),
        },
    };

    let food = strip_of(food.trim()).to_string();
    debug!("Ingredient '{}' -> {} {} {}", line, quantity, unit, food);

    ParsedIngredient {
        quantity,
        unit,
        food,
    }
}

/// Convert a quantity of `unit` to grams.
///
/// Units outside the vocabulary weigh [`FALLBACK_GRAMS_PER_UNIT`] each.
pub fn convert_to_grams(quantity: f64, unit: &str) -> f64 {
    let factor = unit
        .parse::<Unit>()
        .map(|u| u.grams_per_unit())
        .unwrap_or(FALLBACK_GRAMS_PER_UNIT);
    quantity * factor
}

/// Leading quantity and the number of bytes it used.
///
/// Fractions with a zero denominator are not treated as fractions.
fn parse_quantity(line: &str) -> Option<(f64, usize)> {
    if let Some(caps) = MIXED_FRACTION.captures(line) {
        let denominator = number(&caps, 3);
        if denominator != 0.0 {
            let quantity = number(&caps, 1) + number(&caps, 2) / denominator;
            return Some((quantity, caps[0].len()));
        }
    }

    if let Some(caps) = FRACTION.captures(line) {
        let denominator = number(&caps, 2);
        if denominator != 0.0 {
            return Some((number(&caps, 1) / denominator, caps[0].len()));
        }
    }

    DECIMAL
        .find(line)
        .or_else(|| INTEGER.find(line))
        .and_then(|m| m.as_str().parse::<f64>().ok().map(|q| (q, m.end())))
}

fn number(caps: &Captures, group: usize) -> f64 {
    caps[group].parse().unwrap_or(0.0)
}

fn strip_of(food: &str) -> &str {
    match food.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("of ") => food[3..].trim_start(),
        _ => food,
    }
}
