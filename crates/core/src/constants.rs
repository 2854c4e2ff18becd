//! Application-wide constants.

/// Reporting currency. Statement rows without a currency column default to it.
pub const REPORTING_CURRENCY: &str = "KRW";

/// Account label used when neither the caller nor the statement names one.
pub const DEFAULT_ACCOUNT_LABEL: &str = "기본계좌";

/// How many leading rows the header-row scan inspects before giving up.
pub const HEADER_SCAN_LIMIT: usize = 10;

/// Two raw rows count as the same economic event when their amounts differ by
/// less than this (sub-unit rounding between a trade leg and its cash leg).
pub const TWIN_AMOUNT_TOLERANCE: &str = "1";
