use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A manufacturer with its known model names and a display logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub models: Vec<String>,
    pub logo: String,
}

/// One entry of the brand/model reference list, before logo resolution.
///
/// Model names here are independent of the model names extracted from
/// listing titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandReference {
    pub name: String,
    #[serde(default)]
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFormat {
    Json,
    Yaml,
}

impl ReferenceFormat {
    /// Picks the format from the file extension; anything but `.yaml`/`.yml` is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => ReferenceFormat::Yaml,
            _ => ReferenceFormat::Json,
        }
    }
}

/// Accepts either a bare list or a `brands:` wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReferenceDocument {
    List(Vec<BrandReference>),
    Wrapped { brands: Vec<BrandReference> },
}

impl ReferenceDocument {
    fn into_entries(self) -> Vec<BrandReference> {
        match self {
            ReferenceDocument::List(entries) | ReferenceDocument::Wrapped { brands: entries } => {
                entries
            }
        }
    }
}

/// Load and validate the brand reference list from a JSON or YAML file.
///
/// Duplicate names are kept; deduplication is the catalog's job.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brand_reference(path: &Path) -> Result<Vec<BrandReference>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReferenceFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_brand_reference(&content, ReferenceFormat::from_path(path)).map_err(|e| match e {
        ConfigError::ReferenceFileParse { reason, .. } => ConfigError::ReferenceFileParse {
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// Parse a brand reference document held in memory.
///
/// # Errors
///
/// Returns `ConfigError::ReferenceFileParse` on malformed input and
/// `ConfigError::Validation` when an entry has a blank name.
pub fn parse_brand_reference(
    content: &str,
    format: ReferenceFormat,
) -> Result<Vec<BrandReference>, ConfigError> {
    let parse_error = |reason: String| ConfigError::ReferenceFileParse {
        path: "<memory>".to_string(),
        reason,
    };

    let document: ReferenceDocument = match format {
        ReferenceFormat::Json => {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
        }
        ReferenceFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
        }
    };

    let entries = document.into_entries();
    validate_reference(&entries)?;
    Ok(entries)
}

fn validate_reference(entries: &[BrandReference]) -> Result<(), ConfigError> {
    if let Some(position) = entries.iter().position(|b| b.name.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "brand at position {position} has an empty name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_json_list() {
        let json = r#"[{"name": "Fiat", "models": ["Argo", "Strada"]}, {"name": "Toyota", "models": ["Corolla"]}]"#;
        let entries = parse_brand_reference(json, ReferenceFormat::Json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Fiat");
        assert_eq!(entries[0].models, vec!["Argo", "Strada"]);
    }

    #[test]
    fn parses_yaml_wrapped_list() {
        let yaml = "brands:\n  - name: Honda\n    models: [Civic, HR-V]\n  - name: Jeep\n";
        let entries = parse_brand_reference(yaml, ReferenceFormat::Yaml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "Jeep");
        assert!(entries[1].models.is_empty());
    }

    #[test]
    fn duplicate_names_are_preserved() {
        let json = r#"[{"name": "Fiat", "models": []}, {"name": "Fiat", "models": ["Uno"]}]"#;
        let entries = parse_brand_reference(json, ReferenceFormat::Json).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn rejects_blank_name() {
        let json = r#"[{"name": "Fiat", "models": []}, {"name": "  ", "models": []}]"#;
        let err = parse_brand_reference(json, ReferenceFormat::Json).unwrap_err();
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_brand_reference("{not json", ReferenceFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::ReferenceFileParse { .. }));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ReferenceFormat::from_path(Path::new("brands.yml")),
            ReferenceFormat::Yaml
        );
        assert_eq!(
            ReferenceFormat::from_path(Path::new("brands.json")),
            ReferenceFormat::Json
        );
    }

    #[test]
    fn load_reports_path_on_parse_failure() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        file.write_all(b"[{\"models\": []}]").expect("write");
        let err = load_brand_reference(file.path()).unwrap_err();
        match err {
            ConfigError::ReferenceFileParse { path, .. } => {
                assert_eq!(path, file.path().display().to_string());
            }
            other => panic!("expected ReferenceFileParse, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_brand_reference(Path::new("/nonexistent/brands.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReferenceFileIo { .. }));
    }

    #[test]
    fn load_brand_reference_from_bundled_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data")
            .join("brands.json");
        let entries = load_brand_reference(&path).expect("bundled brands.json should load");
        assert!(!entries.is_empty());
    }
}
