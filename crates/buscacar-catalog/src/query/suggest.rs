use buscacar_core::Brand;
use serde::Serialize;

/// Shortest query, in characters, that produces suggestions.
pub const MIN_SUGGESTION_CHARS: usize = 2;

/// A brand/model pair offered while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion<'a> {
    #[serde(serialize_with = "brand_name")]
    pub brand: &'a Brand,
    pub model: &'a str,
}

fn brand_name<S: serde::Serializer>(brand: &&Brand, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&brand.name)
}

/// Suggests every reference `(brand, model)` pair matching a partial query.
///
/// A pair matches when `"{brand} {model}"` or the model alone contains the
/// query, case-insensitively. Queries shorter than
/// [`MIN_SUGGESTION_CHARS`] return nothing. Results follow reference order
/// and are not capped.
#[must_use]
pub fn suggestions<'a>(brands: &'a [Brand], query: &str) -> Vec<Suggestion<'a>> {
    if query.chars().count() < MIN_SUGGESTION_CHARS {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    brands
        .iter()
        .flat_map(|brand| {
            let brand_lower = brand.name.to_lowercase();
            let needle = needle.as_str();
            brand.models.iter().filter_map(move |model| {
                let model_lower = model.to_lowercase();
                let full = format!("{brand_lower} {model_lower}");
                (full.contains(needle) || model_lower.contains(needle)).then_some(Suggestion {
                    brand,
                    model: model.as_str(),
                })
            })
        })
        .collect()
}
