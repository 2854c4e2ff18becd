//! Defensive cell-value parsers.
//!
//! Statement cells are free text pasted out of HTS clients; every parser here
//! degrades to a default instead of failing so a single malformed cell cannot
//! abort a batch.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    /// First signed decimal number in a cleaned cell, parseFloat-style:
    /// trailing garbage after the number is ignored.
    static ref NUMBER_REGEX: Regex = Regex::new(r"-?\d+(?:\.\d+)?").expect("Invalid regex pattern");

    /// 4-1..2-1..2 digit groups with the separators already normalized away.
    static ref DATE_REGEX: Regex =
        Regex::new(r"(\d{4})-?(\d{1,2})-?(\d{1,2})").expect("Invalid regex pattern");

    /// Runs of date separators (dots, slashes, spaces) collapsed to one dash.
    static ref DATE_SEPARATOR_REGEX: Regex =
        Regex::new(r"[./\s-]+").expect("Invalid regex pattern");
}

/// Parses a locale-formatted number, stripping currency glyphs (₩, $),
/// thousands separators, quotation marks and whitespace.
///
/// Returns zero for empty or non-numeric input. Never fails.
pub fn parse_number(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '\'' | '"' | '₩' | '$') && !c.is_whitespace())
        .collect();
    NUMBER_REGEX
        .find(&cleaned)
        .and_then(|m| Decimal::from_str(m.as_str()).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Parses a loosely-formatted date (`2022/03/08`, `2022-03-08`, `2022.03.08`,
/// `20220308`, single-digit month/day variants) into a calendar date.
///
/// Returns `None` when no date pattern matches or the digits do not form a
/// real date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let normalized = DATE_SEPARATOR_REGEX.replace_all(raw, "-");
    let captures = DATE_REGEX.captures(&normalized)?;
    let year: i32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let day: u32 = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Normalizes a header cell for fuzzy comparison: trim, lower-case, strip
/// internal whitespace. Never applied to data values.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
