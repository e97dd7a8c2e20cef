//! FIPE API response types.
//!
//! The upstream API speaks Portuguese field names (`codigo`, `nome`) and is
//! inconsistent about codes: brand codes arrive as strings, model codes as
//! numbers. [`FipeReference`] accepts both and always stores a string.

use serde::{Deserialize, Deserializer, Serialize};

/// A `{codigo, nome}` pair as returned by the brand and model listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FipeReference {
    #[serde(rename(deserialize = "codigo"), deserialize_with = "code_from_string_or_number")]
    pub code: String,
    #[serde(rename(deserialize = "nome"))]
    pub name: String,
}

/// `GET /carros/marcas/{code}/modelos`: `{ "modelos": [...], "anos": [...] }`.
///
/// Only the model list is used; `anos` is ignored.
#[derive(Debug, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub modelos: Vec<FipeReference>,
}

/// A brand with the names of its models, as served to the search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandWithModels {
    pub name: String,
    pub code: String,
    pub models: Vec<String>,
}

impl BrandWithModels {
    #[must_use]
    pub fn new(brand: FipeReference, models: Vec<FipeReference>) -> Self {
        Self {
            name: brand.name,
            code: brand.code,
            models: models.into_iter().map(|m| m.name).collect(),
        }
    }
}

fn code_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Number(n) => n.to_string(),
    })
}
