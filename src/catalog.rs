//! Catalog data source
//!
//! The catalog is a single JSON document loaded once at startup, either from
//! the copy compiled into the binary, a local file, or one GET against a
//! remote URL. Records are read leniently: a record without its identifying
//! field (`term`, `suffix`, `version`/`date`) is dropped, every other missing
//! field falls back to a default.

use crate::constants::{BUNDLED_CATALOG, DATA_SOURCE_ENV};
use crate::types::*;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network response was not ok ({0})")]
    Status(reqwest::StatusCode),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected document shape: {0}")]
    Shape(String),
}

/// Where the catalog document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
    Remote(String),
}

impl DataSource {
    /// Parse `bundled`, `file:<path>`, an http(s) URL, or a bare path
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        if spec.is_empty() || spec.eq_ignore_ascii_case("bundled") {
            Self::Bundled
        } else if spec.starts_with("http://") || spec.starts_with("https://") {
            Self::Remote(spec.to_string())
        } else if let Some(path) = spec.strip_prefix("file:") {
            Self::File(PathBuf::from(path))
        } else {
            Self::File(PathBuf::from(spec))
        }
    }

    /// Environment override first, then the configured setting
    pub fn resolve(setting: Option<&str>) -> Self {
        match std::env::var(DATA_SOURCE_ENV) {
            Ok(env) if !env.trim().is_empty() => {
                debug!(source = %env, "Data source from environment");
                Self::parse(&env)
            }
            _ => setting.map(Self::parse).unwrap_or(Self::Bundled),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Bundled => "bundled catalog".to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Remote(url) => url.clone(),
        }
    }
}

/// Load a bundled or file-backed catalog synchronously
pub fn load_local(source: &DataSource) -> Result<LoadedCatalog, CatalogError> {
    match source {
        DataSource::Bundled => parse_catalog(BUNDLED_CATALOG),
        DataSource::File(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            parse_catalog(&text)
        }
        DataSource::Remote(url) => Err(CatalogError::Shape(format!(
            "{} is remote and must be fetched",
            url
        ))),
    }
}

/// Fetch the catalog with a single GET. No retry, no timeout.
pub async fn fetch_remote(url: &str) -> Result<LoadedCatalog, CatalogError> {
    debug!(url = %url, "Fetching catalog");
    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(CatalogError::Status(response.status()));
    }
    let text = response.text().await?;
    parse_catalog(&text)
}

/// Parse a catalog document.
///
/// Accepts either the full object form
/// (`{"dictionary": [...], "suffixes": [...], "changelog": [...], "contract": {...}}`)
/// or a bare array, which is read as the dictionary alone.
pub fn parse_catalog(text: &str) -> Result<LoadedCatalog, CatalogError> {
    let value: Value = serde_json::from_str(text)?;
    let (data, dropped) = match &value {
        Value::Array(items) => {
            let (dictionary, dropped) = collect(items, dictionary_entry);
            (
                CatalogData {
                    dictionary,
                    ..Default::default()
                },
                dropped,
            )
        }
        Value::Object(obj) => parse_object(obj)?,
        other => {
            return Err(CatalogError::Shape(format!(
                "expected an object or array, found {}",
                type_name(other)
            )))
        }
    };

    if dropped > 0 {
        warn!(dropped = dropped, "Dropped malformed catalog records");
    }
    info!(
        terms = data.dictionary.len(),
        suffixes = data.suffixes.len(),
        changelog = data.changelog.len(),
        "Catalog parsed"
    );

    let raw_pretty = serde_json::to_string_pretty(&value)?;
    Ok(LoadedCatalog {
        data,
        raw_pretty,
        dropped,
    })
}

fn parse_object(obj: &Map<String, Value>) -> Result<(CatalogData, usize), CatalogError> {
    let mut dropped = 0;

    let dictionary = match obj.get("dictionary") {
        Some(v) => {
            let (items, d) = collect(array(v, "dictionary")?, dictionary_entry);
            dropped += d;
            items
        }
        None => Vec::new(),
    };
    let suffixes = match obj.get("suffixes") {
        Some(v) => {
            let (items, d) = collect(array(v, "suffixes")?, suffix_entry);
            dropped += d;
            items
        }
        None => Vec::new(),
    };
    let changelog = match obj.get("changelog") {
        Some(v) => {
            let (items, d) = collect(array(v, "changelog")?, changelog_entry);
            dropped += d;
            items
        }
        None => Vec::new(),
    };
    let contract = match obj.get("contract") {
        Some(v) => serde_json::from_value::<ContractInfo>(v.clone()).unwrap_or_else(|e| {
            warn!(error = %e, "Malformed contract, using empty contract");
            ContractInfo::default()
        }),
        None => ContractInfo::default(),
    };

    Ok((
        CatalogData {
            dictionary,
            suffixes,
            changelog,
            contract,
        },
        dropped,
    ))
}

fn array<'a>(v: &'a Value, key: &str) -> Result<&'a [Value], CatalogError> {
    v.as_array()
        .map(|a| a.as_slice())
        .ok_or_else(|| CatalogError::Shape(format!("`{}` must be an array, found {}", key, type_name(v))))
}

fn collect<T>(items: &[Value], parse: fn(&Value) -> Option<T>) -> (Vec<T>, usize) {
    let mut out = Vec::with_capacity(items.len());
    let mut dropped = 0;
    for (i, item) in items.iter().enumerate() {
        match parse(item) {
            Some(record) => out.push(record),
            None => {
                debug!(index = i, "Skipping record without identifying field");
                dropped += 1;
            }
        }
    }
    (out, dropped)
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn dictionary_entry(v: &Value) -> Option<DictionaryEntry> {
    let obj = v.as_object()?;
    let term = str_field(obj, "term")?.to_string();
    let domain = obj
        .get("domain")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let standard = str_field(obj, "standard")
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);

    Some(DictionaryEntry {
        term,
        definition: str_field(obj, "definition").unwrap_or_default().to_string(),
        appears_in_model: obj
            .get("appearsInModel")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        domain,
        standard,
    })
}

fn suffix_entry(v: &Value) -> Option<SuffixEntry> {
    let obj = v.as_object()?;
    Some(SuffixEntry {
        suffix: str_field(obj, "suffix")?.to_string(),
        meaning: str_field(obj, "meaning").unwrap_or_default().to_string(),
    })
}

fn changelog_entry(v: &Value) -> Option<ChangelogEntry> {
    let obj = v.as_object()?;
    let version = str_field(obj, "version")?.to_string();
    let date = str_field(obj, "date").and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())?;

    let mut changes: Vec<ChangeItem> = obj
        .get("changes")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|c| ChangeItem {
                    title: str_field(c, "title").unwrap_or_default().to_string(),
                    description: str_field(c, "description").unwrap_or_default().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    // Timeline-style records carry one description and no change list
    if changes.is_empty() {
        if let Some(description) = str_field(obj, "description") {
            changes.push(ChangeItem {
                title: String::new(),
                description: description.to_string(),
            });
        }
    }

    Some(ChangelogEntry {
        version,
        date,
        status: str_field(obj, "status")
            .and_then(ChangeStatus::parse)
            .unwrap_or_default(),
        changes,
    })
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses() {
        let loaded = load_local(&DataSource::Bundled).unwrap();
        assert!(!loaded.data.dictionary.is_empty());
        assert!(!loaded.data.suffixes.is_empty());
        assert!(loaded.data.changelog.iter().any(|e| e.is_todo()));
        assert_eq!(loaded.data.contract.data_frequency, "Daily");
        assert_eq!(loaded.dropped, 0);
    }

    #[test]
    fn bare_array_is_the_dictionary() {
        let loaded = parse_catalog(
            r#"[{"term": "Order", "definition": "A request", "appearsInModel": true, "domain": ["Sales"]}]"#,
        )
        .unwrap();
        assert_eq!(loaded.data.dictionary.len(), 1);
        assert!(loaded.data.suffixes.is_empty());
        assert_eq!(loaded.data.dictionary[0].standard_or_fallback(), "N/A");
    }

    #[test]
    fn missing_fields_default_and_missing_term_drops() {
        let loaded = parse_catalog(
            r#"{"dictionary": [
                {"term": "Customer"},
                {"definition": "no term here", "domain": ["X"]},
                {"term": "Order", "domain": ["Sales", 7, "Ops"], "standard": 12}
            ]}"#,
        )
        .unwrap();

        assert_eq!(loaded.dropped, 1);
        let dict = &loaded.data.dictionary;
        assert_eq!(dict.len(), 2);
        assert_eq!(dict[0].definition, "");
        assert!(dict[0].domain.is_empty());
        assert!(!dict[0].appears_in_model);
        assert_eq!(dict[1].domain, vec!["Sales".to_string(), "Ops".to_string()]);
        assert_eq!(dict[1].standard, None);
    }

    #[test]
    fn changelog_records_need_version_and_date() {
        let loaded = parse_catalog(
            r#"{"changelog": [
                {"version": "1.0.0", "date": "2023-01-01", "description": "Initial release", "status": "in progress"},
                {"version": "1.0.1", "date": "not a date"},
                {"date": "2023-02-01"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(loaded.dropped, 2);
        let entry = &loaded.data.changelog[0];
        assert_eq!(entry.status, ChangeStatus::InProgress);
        assert_eq!(entry.changes.len(), 1);
        assert_eq!(entry.changes[0].description, "Initial release");
    }

    #[test]
    fn wrong_top_level_shape_is_rejected() {
        assert!(matches!(parse_catalog("42"), Err(CatalogError::Shape(_))));
        assert!(matches!(
            parse_catalog(r#"{"dictionary": "nope"}"#),
            Err(CatalogError::Shape(_))
        ));
        assert!(matches!(parse_catalog("{"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_local(&DataSource::File(path.clone())).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn data_source_parsing() {
        assert_eq!(DataSource::parse(""), DataSource::Bundled);
        assert_eq!(DataSource::parse("Bundled"), DataSource::Bundled);
        assert_eq!(
            DataSource::parse("https://example.com/data.json"),
            DataSource::Remote("https://example.com/data.json".into())
        );
        assert_eq!(
            DataSource::parse("file:/tmp/catalog.json"),
            DataSource::File(PathBuf::from("/tmp/catalog.json"))
        );
        assert!(matches!(DataSource::parse("http://x"), DataSource::Remote(_)));
    }
}
