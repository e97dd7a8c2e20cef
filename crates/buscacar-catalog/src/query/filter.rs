use buscacar_core::{Category, Fuel, Transmission, VehicleRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An inclusive range with optional bounds. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> RangeFilter<T> {
    #[must_use]
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn between(min: T, max: T) -> Self {
        Self::new(Some(min), Some(max))
    }

    #[must_use]
    pub fn at_least(min: T) -> Self {
        Self::new(Some(min), None)
    }

    #[must_use]
    pub fn at_most(max: T) -> Self {
        Self::new(None, Some(max))
    }

    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// True when neither bound is set.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Facet selections. Every `None` field means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<RangeFilter<Decimal>>,
    pub year: Option<RangeFilter<i32>>,
    pub mileage: Option<RangeFilter<u64>>,
    pub transmission: Option<Transmission>,
    pub fuel: Option<Fuel>,
    pub color: Option<String>,
    pub category: Option<Category>,
}

impl Facets {
    /// True when no facet constrains the result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `record` satisfies every active facet.
    #[must_use]
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        self.brand.as_deref().is_none_or(|b| record.brand == b)
            && self.model.as_deref().is_none_or(|m| record.model == m)
            && self.price.is_none_or(|r| r.contains(record.price))
            && self.year.is_none_or(|r| r.contains(record.year))
            && self.mileage.is_none_or(|r| r.contains(record.mileage))
            && self.transmission.is_none_or(|t| record.transmission == t)
            && self.fuel.is_none_or(|f| record.fuel == f)
            && self.color.as_deref().is_none_or(|c| record.color == c)
            && self.category.is_none_or(|c| record.category == c)
    }
}

/// Keeps the records satisfying every active facet, preserving order.
#[must_use]
pub fn filter<'a>(records: &[&'a VehicleRecord], facets: &Facets) -> Vec<&'a VehicleRecord> {
    records
        .iter()
        .copied()
        .filter(|record| facets.matches(record))
        .collect()
}
