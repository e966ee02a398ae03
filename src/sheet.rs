// src/sheet.rs
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

// `/d/<id>` segment of a Google Sheets (or Apps Script) URL
const SHEET_ID_PATTERN: &str = r"/d/([A-Za-z0-9_-]+)";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SheetIdError {
    #[error("Invalid Google Sheets URL: '{0}'")]
    InvalidUrl(String),
}

// The pattern is a constant, so compilation cannot fail at runtime.
fn sheet_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SHEET_ID_PATTERN).expect("sheet id pattern is a valid regex"))
}

/// Extracts the spreadsheet identifier from a sheet URL.
///
/// Only the first `/d/` segment is considered; the captured value is not
/// checked for plausibility beyond its character set.
///
/// # Errors
/// Returns `SheetIdError::InvalidUrl` if the URL has no `/d/<id>` segment
/// (this includes the empty string).
pub fn extract_id(url: &str) -> Result<&str, SheetIdError> {
    sheet_id_regex()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| SheetIdError::InvalidUrl(url.to_string()))
}
