//! The in-memory catalog every query runs against.
//!
//! A [`CatalogStore`] is built once, up front, and never mutated. Callers
//! share it behind an `Arc`.

use std::collections::HashSet;
use std::path::Path;

use buscacar_core::{
    load_brand_reference, Brand, BrandReference, Category, ConfigError, VehicleRecord,
};

use crate::logo::logo_for;
use crate::parser::{parse_feed, ParseReport};

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    vehicles: Vec<VehicleRecord>,
    brands: Vec<Brand>,
    report: ParseReport,
}

impl CatalogStore {
    /// Parses `feed_text` and resolves logos for the reference brands.
    ///
    /// Brands are deduplicated by exact name; the first entry wins and later
    /// entries with the same name are ignored, models included.
    #[must_use]
    pub fn build(feed_text: &str, reference: Vec<BrandReference>) -> Self {
        let outcome = parse_feed(feed_text);
        let brands = resolve_brands(reference);

        tracing::info!(
            vehicles = outcome.records.len(),
            brands = brands.len(),
            "catalog built"
        );

        Self {
            vehicles: outcome.records,
            brands,
            report: outcome.report,
        }
    }

    /// Reads the feed and the brand reference file, then builds the store.
    ///
    /// A feed that cannot be read yields an empty vehicle list rather than an
    /// error, so the service still starts with its brand data.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the brand reference file cannot be read,
    /// parsed, or validated.
    pub fn from_paths(feed_path: &Path, brands_path: &Path) -> Result<Self, ConfigError> {
        let reference = load_brand_reference(brands_path)?;

        let feed_text = match std::fs::read_to_string(feed_path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    path = %feed_path.display(),
                    error = %e,
                    "vehicle feed unavailable; starting with an empty catalog"
                );
                String::new()
            }
        };

        Ok(Self::build(&feed_text, reference))
    }

    #[must_use]
    pub fn all_vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    #[must_use]
    pub fn all_brands(&self) -> &[Brand] {
        &self.brands
    }

    #[must_use]
    pub fn parse_report(&self) -> &ParseReport {
        &self.report
    }

    /// Looks a vehicle up by its id (the canonical listing link).
    #[must_use]
    pub fn vehicle(&self, id: &str) -> Option<&VehicleRecord> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn featured(&self) -> impl Iterator<Item = &VehicleRecord> {
        self.vehicles.iter().filter(|v| v.featured)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &VehicleRecord> {
        self.vehicles.iter().filter(move |v| v.category == category)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

fn resolve_brands(reference: Vec<BrandReference>) -> Vec<Brand> {
    let mut seen: HashSet<String> = HashSet::new();
    reference
        .into_iter()
        .filter(|entry| {
            let first = seen.insert(entry.name.clone());
            if !first {
                tracing::debug!(brand = %entry.name, "ignoring duplicate brand reference");
            }
            first
        })
        .map(|entry| Brand {
            logo: logo_for(&entry.name),
            name: entry.name,
            models: entry.models,
        })
        .collect()
}
