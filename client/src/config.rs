//! Application configuration constants
//!
//! Central location for the API endpoint, date formats and the
//! bounds of the words catalogue.

// ===== Remote API =====

/// Default base endpoint of the RS Lang REST API.
/// Audio and image paths in word records are relative to it.
pub const DEFAULT_API_ENDPOINT: &str = "https://rss-rs-lang.herokuapp.com";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("rslang-client/", env!("CARGO_PKG_VERSION"));

// ===== Words Catalogue =====

/// Number of difficulty groups in the textbook (0-based)
pub const GROUP_COUNT: u32 = 6;

/// Number of pages per group (0-based)
pub const PAGE_COUNT: u32 = 30;

// ===== Annotations =====

/// Format of an annotation's post date (US short date, e.g. "10/17/2026")
pub const POST_DATE_FORMAT: &str = "%-m/%-d/%Y";

// ===== Settings =====

/// File name of the settings file inside the settings directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";
