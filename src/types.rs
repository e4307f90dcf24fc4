//! Common types and data structures

use crate::constants::{STANDARD_FALLBACK, TODO_VERSION};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One term of the data dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub term: String,
    pub definition: String,
    pub appears_in_model: bool,
    pub domain: Vec<String>,
    pub standard: Option<String>,
}

impl DictionaryEntry {
    /// Standard as displayed and exported, "N/A" when absent
    pub fn standard_or_fallback(&self) -> &str {
        self.standard.as_deref().unwrap_or(STANDARD_FALLBACK)
    }
}

/// Naming suffix and what it means
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuffixEntry {
    pub suffix: String,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeItem {
    pub title: String,
    pub description: String,
}

/// Delivery status of a changelog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChangeStatus {
    #[default]
    #[serde(rename = "done")]
    Done,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "failed")]
    Failed,
}

impl ChangeStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "done" => Some(Self::Done),
            "in progress" | "in_progress" => Some(Self::InProgress),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Done => "Done",
            Self::InProgress => "In progress",
            Self::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
    pub version: String,
    pub date: NaiveDate,
    pub status: ChangeStatus,
    pub changes: Vec<ChangeItem>,
}

impl ChangelogEntry {
    /// True for planned work carrying the sentinel version
    pub fn is_todo(&self) -> bool {
        self.version.trim().eq_ignore_ascii_case(TODO_VERSION)
    }
}

/// Metadata shown on the data contract page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractInfo {
    pub current_version: String,
    pub data_producer: String,
    pub data_consumer: String,
    pub data_validator: String,
    pub data_frequency: String,
}

impl ContractInfo {
    /// Label/value pairs in display order
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("Current Version", self.current_version.as_str()),
            ("Data Producer", self.data_producer.as_str()),
            ("Data Consumer", self.data_consumer.as_str()),
            ("Data Validator", self.data_validator.as_str()),
            ("Data Frequency", self.data_frequency.as_str()),
        ]
    }
}

/// Everything the views render, loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogData {
    pub dictionary: Vec<DictionaryEntry>,
    pub suffixes: Vec<SuffixEntry>,
    pub changelog: Vec<ChangelogEntry>,
    pub contract: ContractInfo,
}

/// Opaque identifier of a dictionary row (its position in the loaded dictionary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub usize);

/// Navigable destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    DataDictionary,
    DataContract,
    MetroMap,
    Changelog,
    RawData,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::DataDictionary => "Data Dictionary",
            Route::DataContract => "Data Contract",
            Route::MetroMap => "MetroMap",
            Route::Changelog => "Changelog",
            Route::RawData => "Raw Data",
        }
    }
}

/// Column to sort by in the dictionary table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Term,
    Definition,
    AppearsInModel,
    Domain,
    Standard,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Term,
        SortColumn::Definition,
        SortColumn::AppearsInModel,
        SortColumn::Domain,
        SortColumn::Standard,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            SortColumn::Term => "TERM",
            SortColumn::Definition => "DEFINITION",
            SortColumn::AppearsInModel => "APPEARS IN MODEL",
            SortColumn::Domain => "DOMAIN",
            SortColumn::Standard => "STANDARD",
        }
    }
}

/// Sort direction for the dictionary table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Progress of the one-shot data source load
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(LoadedCatalog),
    Failed(String),
}

/// Parsed catalog plus the document it came from (for the raw viewer)
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub data: CatalogData,
    pub raw_pretty: String,
    pub dropped: usize,
}
