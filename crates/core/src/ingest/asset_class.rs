//! Heuristic asset-class inference.
//!
//! A prioritized rule chain over name, ticker shape and currency. It is
//! intentionally conservative: when nothing matches, the instrument lands in
//! the plain domestic-stock bucket rather than a speculative one.

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::REPORTING_CURRENCY;
use crate::transactions::AssetClass;

/// Domestic ETF issuer brands; any of these in an instrument name marks it
/// as a KR-listed ETF.
pub const KR_ETF_KEYWORDS: &[&str] = &[
    "KODEX",
    "TIGER",
    "KBSTAR",
    "HANARO",
    "ARIRANG",
    "KOSEF",
    "SOL",
    "ACE",
    "RISE",
    "TIMEFOLIO",
    "FOCUS",
];

/// US ETF issuer brands and generic fund markers.
pub const US_ETF_KEYWORDS: &[&str] = &[
    "ETF",
    "FUND",
    "SPDR",
    "ISHARES",
    "VANGUARD",
    "INVESCO",
    "PROSHARES",
];

lazy_static! {
    /// US exchange symbols are 2-5 capital letters.
    static ref US_TICKER_REGEX: Regex = Regex::new(r"^[A-Z]{2,5}$").expect("Invalid regex pattern");
}

/// Infers the asset class from what the statement row exposes. First match
/// wins, top to bottom.
pub fn detect_asset_class(name: &str, ticker: Option<&str>, currency: &str) -> AssetClass {
    let upper_name = name.to_uppercase();
    let upper_ticker = ticker.unwrap_or_default().to_uppercase();
    let lower_name = name.to_lowercase();

    if name.contains("금현물") || name.contains("금 현물") {
        return AssetClass::Gold;
    }
    if lower_name.contains("채권") || lower_name.contains("bond") {
        return AssetClass::KrBond;
    }
    if currency != REPORTING_CURRENCY && !currency.is_empty() {
        let keyword_hit = US_ETF_KEYWORDS
            .iter()
            .any(|k| upper_name.contains(k) || upper_ticker.contains(k));
        let shape_hit = US_TICKER_REGEX.is_match(&upper_ticker)
            && (upper_name.contains("ETF") || upper_name.contains("FUND"));
        if keyword_hit || shape_hit {
            return AssetClass::UsEtf;
        }
        return AssetClass::UsStock;
    }
    if KR_ETF_KEYWORDS.iter().any(|k| upper_name.contains(k)) {
        return AssetClass::KrEtf;
    }
    AssetClass::KrStock
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gold_marker_wins_first() {
        assert_eq!(detect_asset_class("금현물", None, "KRW"), AssetClass::Gold);
        assert_eq!(
            detect_asset_class("KRX 금 현물", None, "KRW"),
            AssetClass::Gold
        );
    }

    #[test]
    fn bond_marker_beats_currency() {
        assert_eq!(
            detect_asset_class("국고채권 01500-5003", None, "KRW"),
            AssetClass::KrBond
        );
        assert_eq!(
            detect_asset_class("Treasury Bond", None, "USD"),
            AssetClass::KrBond
        );
    }

    #[test]
    fn foreign_currency_splits_etf_and_stock() {
        assert_eq!(
            detect_asset_class("VANGUARD S&P 500", Some("VOO"), "USD"),
            AssetClass::UsEtf
        );
        assert_eq!(
            detect_asset_class("INVESCO QQQ TRUST", Some("QQQ"), "USD"),
            AssetClass::UsEtf
        );
        assert_eq!(
            detect_asset_class("APPLE INC", Some("AAPL"), "USD"),
            AssetClass::UsStock
        );
    }

    #[test]
    fn ticker_shape_plus_fund_marker_is_etf() {
        assert_eq!(
            detect_asset_class("SCHWAB US DIVIDEND EQUITY ETF", Some("SCHD"), "USD"),
            AssetClass::UsEtf
        );
        // Fund marker without a plausible ticker shape still matches the
        // keyword list ("ETF"), so use a non-keyword name here.
        assert_eq!(
            detect_asset_class("SOME TRUST", Some("TOOLONGSYM"), "USD"),
            AssetClass::UsStock
        );
    }

    #[test]
    fn domestic_issuer_keywords_mark_kr_etf() {
        assert_eq!(
            detect_asset_class("KODEX 200", None, "KRW"),
            AssetClass::KrEtf
        );
        assert_eq!(
            detect_asset_class("TIGER 미국나스닥100", None, "KRW"),
            AssetClass::KrEtf
        );
    }

    #[test]
    fn default_is_domestic_stock() {
        assert_eq!(
            detect_asset_class("삼성전자", Some("005930"), "KRW"),
            AssetClass::KrStock
        );
        assert_eq!(detect_asset_class("", None, ""), AssetClass::KrStock);
    }
}
