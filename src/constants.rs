//! Application constants and configuration

pub const APP_NAME: &str = "Data Catalog";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment override for the data source (`bundled`, `file:<path>` or an http(s) URL)
pub const DATA_SOURCE_ENV: &str = "DATA_CATALOG_SOURCE";

/// Catalog document compiled into the binary
pub const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

/// Fallback shown (and exported) for a dictionary entry without a standard
pub const STANDARD_FALLBACK: &str = "N/A";

/// Changelog version marking planned, unreleased work
pub const TODO_VERSION: &str = "TODO";

// Export
pub const EXPORT_FILE_NAME: &str = "Data_Dictionary.xlsx";
pub const EXPORT_SHEET_NAME: &str = "DataDictionary";
pub const EXPORT_HEADERS: [&str; 5] = ["Term", "Definition", "Appears in Model", "Domain", "Standard"];
pub const DOMAIN_DELIMITER: &str = ", ";
pub const GLYPH_YES: &str = "✅";
pub const GLYPH_NO: &str = "❌";

// Dictionary pagination
pub const PAGE_SIZES: [usize; 3] = [5, 10, 20];
pub const DEFAULT_PAGE_SIZE: usize = 10;

// Changelog paging
pub const CHANGELOG_PAGE: usize = 3;

pub const FOOTER_TEXT: &str = "© 2025 My Info App. All rights reserved.";
