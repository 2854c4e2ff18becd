//! Header → semantic field mapping.
//!
//! Statement exports never agree on column naming; the alias table below maps
//! the observed Korean HTS jargon (and the occasional English header) onto
//! semantic fields. Matching is exact-first, then substring containment in
//! either direction so compound headers like "거래단가/환율" still map.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;

use super::value_parsers::normalize_header;
use crate::constants::HEADER_SCAN_LIMIT;

/// Semantic statement fields a column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnField {
    Date,
    Name,
    Ticker,
    TxTypeRaw,
    Qty,
    Price,
    Amount,
    AmountKrw,
    Fee,
    Tax,
    FxRate,
    Currency,
    RefId,
    Account,
    AccountNo,
    Memo,
}

/// Mapping from semantic field to column index, built once per table.
/// Unmapped fields are absent; the converter treats them as "use default".
pub type ColumnMap = HashMap<ColumnField, usize>;

/// Alias table in priority order. Normalized header text is compared against
/// the left column; aliases must therefore be lower-case and whitespace-free.
const COLUMN_ALIASES: &[(&str, ColumnField)] = &[
    ("거래일", ColumnField::Date),
    ("거래일자", ColumnField::Date),
    ("체결일", ColumnField::Date),
    ("날짜", ColumnField::Date),
    ("일자", ColumnField::Date),
    ("종목명", ColumnField::Name),
    ("종목", ColumnField::Name),
    ("상품명", ColumnField::Name),
    ("종목/상품명", ColumnField::Name),
    ("종목코드", ColumnField::Ticker),
    ("단축코드", ColumnField::Ticker),
    ("티커", ColumnField::Ticker),
    ("symbol", ColumnField::Ticker),
    ("거래구분", ColumnField::TxTypeRaw),
    ("거래유형", ColumnField::TxTypeRaw),
    ("구분", ColumnField::TxTypeRaw),
    ("유형", ColumnField::TxTypeRaw),
    ("수량", ColumnField::Qty),
    ("거래수량", ColumnField::Qty),
    ("체결수량", ColumnField::Qty),
    ("단가", ColumnField::Price),
    ("거래단가", ColumnField::Price),
    ("체결단가", ColumnField::Price),
    ("거래금액", ColumnField::Amount),
    ("결제금액", ColumnField::Amount),
    ("거래대금", ColumnField::Amount),
    ("금액", ColumnField::Amount),
    ("수수료", ColumnField::Fee),
    ("세금", ColumnField::Tax),
    ("제세금", ColumnField::Tax),
    ("환율", ColumnField::FxRate),
    ("적용환율", ColumnField::FxRate),
    ("통화", ColumnField::Currency),
    ("원화금액", ColumnField::AmountKrw),
    ("원화환산", ColumnField::AmountKrw),
    ("원번호", ColumnField::RefId),
    ("주문번호", ColumnField::RefId),
    ("계좌", ColumnField::Account),
    ("계좌명", ColumnField::Account),
    ("계좌번호", ColumnField::AccountNo),
    ("적요", ColumnField::Memo),
    ("비고", ColumnField::Memo),
    ("메모", ColumnField::Memo),
];

lazy_static! {
    static ref EXACT_ALIASES: HashMap<&'static str, ColumnField> = {
        let mut map = HashMap::new();
        for (alias, field) in COLUMN_ALIASES {
            map.entry(*alias).or_insert(*field);
        }
        map
    };
}

/// Maps a candidate header row to semantic fields.
///
/// First pass assigns exact normalized matches; second pass, only for fields
/// still unmapped, allows substring containment in either direction. Each
/// field is assigned at most once, earliest header wins.
pub fn map_columns(headers: &[String]) -> ColumnMap {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let mut map = ColumnMap::new();

    for (index, header) in normalized.iter().enumerate() {
        if let Some(field) = EXACT_ALIASES.get(header.as_str()) {
            map.entry(*field).or_insert(index);
        }
    }

    for (index, header) in normalized.iter().enumerate() {
        // An empty cell would substring-match every alias.
        if header.is_empty() {
            continue;
        }
        for (alias, field) in COLUMN_ALIASES {
            if map.contains_key(field) {
                continue;
            }
            if header.contains(alias) || alias.contains(header.as_str()) {
                map.insert(*field, index);
            }
        }
    }

    map
}

/// Locates the header row in a raw table.
///
/// Export formats prepend a varying number of metadata rows, so every row in
/// the scan window is tried as a header candidate; the one mapping the most
/// fields wins, earliest row on ties. Returns `None` when no candidate maps
/// a single field, which callers surface as an unrecognized format.
pub fn find_header_row(rows: &[Vec<String>]) -> Option<(usize, ColumnMap)> {
    let mut best: Option<(usize, ColumnMap)> = None;

    for (index, row) in rows.iter().take(HEADER_SCAN_LIMIT).enumerate() {
        let map = map_columns(row);
        let best_len = best.as_ref().map_or(0, |(_, m)| m.len());
        if map.len() > best_len {
            best = Some((index, map));
        }
    }

    match best {
        Some((index, map)) if !map.is_empty() => {
            debug!(
                "Header row detected at index {} ({} fields mapped)",
                index,
                map.len()
            );
            Some((index, map))
        }
        _ => None,
    }
}
