//! Conversion from a tokenized feed row to a [`VehicleRecord`].
//!
//! Field parsing is delegated to [`crate::parse`] and attribute inference to
//! [`crate::classify`]; this module decides which failures reject a row.

use buscacar_core::{VehicleRecord, COLOR_NOT_INFORMED};

use crate::classify::{infer_category, infer_fuel, infer_transmission, TitleSignals};
use crate::feed::FIELD_COUNT;
use crate::parse::{
    parse_mileage, parse_price, parse_year, split_title, truncate_chars, MileageReading,
};
use crate::parser::SkipReason;

/// Maximum length, in characters, of a record's description.
pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// The eight positional columns of a feed row, borrowed from the tokenizer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawRow<'a> {
    pub year: &'a str,
    pub city: &'a str,
    pub photo_url: &'a str,
    pub mileage: &'a str,
    pub link: &'a str,
    pub store: &'a str,
    pub price: &'a str,
    pub title: &'a str,
}

impl<'a> RawRow<'a> {
    /// Maps tokens to columns. Tokens past the eighth are ignored.
    pub(crate) fn from_fields(fields: &'a [String]) -> Option<Self> {
        if fields.len() < FIELD_COUNT {
            return None;
        }
        Some(Self {
            year: &fields[0],
            city: &fields[1],
            photo_url: &fields[2],
            mileage: &fields[3],
            link: &fields[4],
            store: &fields[5],
            price: &fields[6],
            title: &fields[7],
        })
    }
}

/// A normalized row plus what the parser needs for its report.
#[derive(Debug, Clone)]
pub(crate) struct NormalizedRow {
    pub record: VehicleRecord,
    pub mileage: MileageReading,
}

/// Normalizes a row whose canonical link has already been deduplicated.
///
/// # Errors
///
/// Returns [`SkipReason::InvalidYear`] or [`SkipReason::InvalidPrice`] when
/// the respective column does not parse. An unreadable mileage is not an
/// error; it becomes `0`.
pub(crate) fn normalize_row(
    row: &RawRow<'_>,
    canonical_link: String,
    featured: bool,
) -> Result<NormalizedRow, SkipReason> {
    let year = parse_year(row.year).ok_or(SkipReason::InvalidYear)?;
    let price = parse_price(row.price).ok_or(SkipReason::InvalidPrice)?;
    let mileage = parse_mileage(row.mileage);

    let (brand, model) = split_title(row.title);
    let signals = TitleSignals::new(row.title, &model);

    let record = VehicleRecord {
        id: canonical_link.clone(),
        brand,
        model,
        year,
        color: COLOR_NOT_INFORMED.to_owned(),
        transmission: infer_transmission(&signals),
        fuel: infer_fuel(&signals),
        category: infer_category(&signals),
        price,
        mileage: mileage.value(),
        description: truncate_chars(row.title, DESCRIPTION_MAX_CHARS),
        image: row.photo_url.to_owned(),
        features: None,
        location: row.city.to_owned(),
        store: row.store.to_owned(),
        external_url: canonical_link,
        featured,
    };

    Ok(NormalizedRow { record, mileage })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
