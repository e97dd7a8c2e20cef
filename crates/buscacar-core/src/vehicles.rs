use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color is not part of the listing export; every record carries this value.
pub const COLOR_NOT_INFORMED: &str = "N/D";

/// A vehicle listed in the catalog, normalized from one row of the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Canonical listing URL. Unique within a catalog.
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub transmission: Transmission,
    pub fuel: Fuel,
    pub category: Category,
    /// Asking price, currency-agnostic. Never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Odometer reading; `0` means the listing did not report one.
    pub mileage: u64,
    /// Listing title, truncated to 100 characters.
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    pub location: String,
    /// Seller name.
    pub store: String,
    pub external_url: String,
    /// Set on the first records of a parse, for homepage highlighting.
    pub featured: bool,
}

impl VehicleRecord {
    /// Text matched by free-text search: `"{brand} {model} {year}"`, lower-cased.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.brand, self.model, self.year).to_lowercase()
    }

    #[must_use]
    pub fn has_reported_mileage(&self) -> bool {
        self.mileage > 0
    }
}

/// Returned by the enum `FromStr` impls when a value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transmission::Manual => write!(f, "Manual"),
            Transmission::Automatic => write!(f, "Automatic"),
        }
    }
}

impl FromStr for Transmission {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(Transmission::Manual),
            "automatic" | "automática" | "automatica" => Ok(Transmission::Automatic),
            _ => Err(UnknownVariant::new("transmission", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fuel {
    #[default]
    Flex,
    Diesel,
    Gasoline,
    Electric,
}

impl fmt::Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fuel::Flex => write!(f, "Flex"),
            Fuel::Diesel => write!(f, "Diesel"),
            Fuel::Gasoline => write!(f, "Gasoline"),
            Fuel::Electric => write!(f, "Electric"),
        }
    }
}

impl FromStr for Fuel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flex" => Ok(Fuel::Flex),
            "diesel" => Ok(Fuel::Diesel),
            "gasoline" | "gasolina" => Ok(Fuel::Gasoline),
            "electric" | "elétrico" | "eletrico" => Ok(Fuel::Electric),
            _ => Err(UnknownVariant::new("fuel", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Car,
    Motorcycle,
    Commercial,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Car => write!(f, "car"),
            Category::Motorcycle => write!(f, "motorcycle"),
            Category::Commercial => write!(f, "commercial"),
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "car" => Ok(Category::Car),
            "motorcycle" => Ok(Category::Motorcycle),
            "commercial" => Ok(Category::Commercial),
            _ => Err(UnknownVariant::new("category", s)),
        }
    }
}
