use buscacar_core::Brand;
use serde::Serialize;

/// Brand and model recognized in a free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedQuery {
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl ExtractedQuery {
    fn found(brand: &Brand, model: Option<&String>) -> Self {
        Self {
            brand: Some(brand.name.clone()),
            model: model.cloned(),
        }
    }
}

/// Recognizes a brand and model mentioned in `query`.
///
/// Runs in two passes over the reference list:
///
/// 1. The first brand whose name appears in the query wins. Its first model
///    that also appears in the query is returned with it, or no model.
/// 2. Only when no brand name appears anywhere, the first model appearing in
///    the query is returned together with the brand that owns it.
///
/// Matching is case-insensitive substring matching against the trimmed
/// query. Empty names never match.
#[must_use]
pub fn extract_brand_and_model(brands: &[Brand], query: &str) -> ExtractedQuery {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return ExtractedQuery::default();
    }
    let mentions = |name: &str| !name.is_empty() && needle.contains(&name.to_lowercase());

    if let Some(brand) = brands.iter().find(|b| mentions(&b.name)) {
        let model = brand.models.iter().find(|m| mentions(m));
        return ExtractedQuery::found(brand, model);
    }

    brands
        .iter()
        .find_map(|brand| {
            brand
                .models
                .iter()
                .find(|m| mentions(m))
                .map(|model| ExtractedQuery::found(brand, Some(model)))
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::query::test_support::brand;

    use super::*;

    fn extracted(brand: Option<&str>, model: Option<&str>) -> ExtractedQuery {
        ExtractedQuery {
            brand: brand.map(str::to_owned),
            model: model.map(str::to_owned),
        }
    }

    fn reference() -> Vec<Brand> {
        vec![
            brand("Fiat", &["Uno", "Strada"]),
            brand("Toyota", &["Corolla", "Hilux"]),
            brand("Honda", &["Civic", "Fit"]),
        ]
    }

    #[test]
    fn brand_and_model() {
        assert_eq!(
            extract_brand_and_model(&reference(), "toyota corolla 2020"),
            extracted(Some("Toyota"), Some("Corolla"))
        );
    }

    #[test]
    fn brand_only() {
        assert_eq!(
            extract_brand_and_model(&reference(), "  FIAT barato "),
            extracted(Some("Fiat"), None)
        );
    }

    #[test]
    fn model_only_resolves_owner() {
        assert_eq!(
            extract_brand_and_model(&reference(), "hilux diesel"),
            extracted(Some("Toyota"), Some("Hilux"))
        );
    }

    #[test]
    fn brand_pass_does_not_fall_through_to_other_brands_models() {
        // "Fiat" matches in pass 1, so Toyota's Corolla is never considered.
        assert_eq!(
            extract_brand_and_model(&reference(), "fiat ou corolla"),
            extracted(Some("Fiat"), None)
        );
    }

    #[test]
    fn nothing_recognized() {
        assert_eq!(
            extract_brand_and_model(&reference(), "carro vermelho"),
            ExtractedQuery::default()
        );
        assert_eq!(extract_brand_and_model(&reference(), "   "), ExtractedQuery::default());
    }

    #[test]
    fn empty_model_names_never_match() {
        let brands = vec![brand("Fiat", &[""]), brand("Honda", &["", "Fit"])];
        assert_eq!(
            extract_brand_and_model(&brands, "honda"),
            extracted(Some("Honda"), None)
        );
        assert_eq!(
            extract_brand_and_model(&brands, "fit"),
            extracted(Some("Honda"), Some("Fit"))
        );
    }

    #[test]
    fn first_brand_in_reference_order_wins() {
        let brands = vec![brand("Ram", &["1500"]), brand("Ramble", &["X"])];
        assert_eq!(
            extract_brand_and_model(&brands, "ramble x"),
            extracted(Some("Ram"), None)
        );
    }
}
