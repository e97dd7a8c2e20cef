//! Field-level parsers for listing rows.
//!
//! Prices and mileages arrive as Brazilian-formatted strings (`.` thousands
//! separator, `,` decimal separator, `R$`/`KM` labels). See
//! [`crate::normalize`] for how these compose into a [`VehicleRecord`].
//!
//! [`VehicleRecord`]: buscacar_core::VehicleRecord

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Brand used when a title has no tokens at all.
pub(crate) const UNKNOWN_BRAND: &str = "Desconhecido";

/// Title abbreviations mapped to the manufacturer name used across the catalog.
const BRAND_ALIASES: &[(&str, &str)] = &[
    ("VW", "Volkswagen"),
    ("GM", "Chevrolet"),
    ("CAOA", "Caoa Chery"),
];

/// Tokens that separate brand from model, as in `"VW - Polo"`.
const BRAND_MODEL_SEPARATORS: &[&str] = &["-", "–"];

const MILEAGE_NOT_REPORTED: &str = "KM N/D";

const EARLIEST_YEAR: i32 = 1900;
const LATEST_YEAR: i32 = 2100;

/// Outcome of reading the mileage column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MileageReading {
    Reported(u64),
    /// Blank or the `KM N/D` sentinel.
    NotReported,
    /// Present but not a number. Treated as not reported.
    Unreadable,
}

impl MileageReading {
    pub(crate) fn value(self) -> u64 {
        match self {
            MileageReading::Reported(km) => km,
            MileageReading::NotReported | MileageReading::Unreadable => 0,
        }
    }
}

/// Parses a model year from the leading digits of the field.
///
/// Listings often carry `fabrication/model` pairs such as `2019/2020`; only
/// the first year is read.
#[must_use]
pub(crate) fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end]
        .parse::<i32>()
        .ok()
        .filter(|year| (EARLIEST_YEAR..=LATEST_YEAR).contains(year))
}

/// Parses a price such as `"R$118.900,00"` into `118900`.
///
/// Returns `None` for unparseable or negative values.
#[must_use]
pub(crate) fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, 'R' | '$' | '.') && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned)
        .ok()
        .filter(|price| !price.is_sign_negative())
        .map(|price| price.normalize())
}

/// Parses a mileage such as `"KM 124.000"` into `124000`.
#[must_use]
pub(crate) fn parse_mileage(raw: &str) -> MileageReading {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(MILEAGE_NOT_REPORTED) {
        return MileageReading::NotReported;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, 'K' | 'M' | 'k' | 'm' | '.') && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned)
        .ok()
        .filter(|km| !km.is_sign_negative())
        .and_then(|km| km.trunc().to_u64())
        .map_or(MileageReading::Unreadable, MileageReading::Reported)
}

/// Extracts `(brand, model)` from a listing title.
///
/// The first token is the brand (with abbreviations expanded); the second is
/// the model unless it is a bare separator, in which case the third is.
#[must_use]
pub(crate) fn split_title(title: &str) -> (String, String) {
    let tokens: Vec<&str> = title.split_whitespace().collect();

    let Some(first) = tokens.first() else {
        return (UNKNOWN_BRAND.to_owned(), String::new());
    };

    let brand = BRAND_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(first))
        .map_or_else(|| (*first).to_owned(), |(_, full)| (*full).to_owned());

    let model_index = match tokens.get(1) {
        Some(second) if BRAND_MODEL_SEPARATORS.contains(second) => 2,
        _ => 1,
    };
    let model = tokens
        .get(model_index)
        .map(|m| (*m).to_owned())
        .unwrap_or_default();

    (brand, model)
}

/// Returns at most `max_chars` characters of `s`, never splitting a character.
#[must_use]
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
