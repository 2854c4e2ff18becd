//! Statement text acquisition: clipboard pastes and uploaded text files into
//! a uniform 2-D table.
//!
//! Handles UTF-8 BOM, EUC-KR fallback decoding (HTS exports are frequently
//! CP949), and delimiter auto-detection across tab, comma and semicolon.
//! Header-row location is NOT handled here; the ingestion pipeline scans for
//! it because some formats prepend metadata rows.

use csv::ReaderBuilder;
use encoding_rs::EUC_KR;
use log::warn;

use crate::errors::{Error, ValidationError};
use crate::Result;

/// Decodes statement bytes and parses them into rows of cells.
pub fn parse_statement_bytes(content: &[u8]) -> Result<Vec<Vec<String>>> {
    let text = decode_content(content);
    parse_statement_text(&text)
}

/// Parses already-decoded statement text into rows of cells.
///
/// Fully-empty rows are dropped. Rows may have uneven lengths; downstream
/// field extraction treats missing cells as empty.
pub fn parse_statement_text(content: &str) -> Result<Vec<Vec<String>>> {
    if content.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Statement text is empty".to_string(),
        )));
    }

    let delimiter = detect_delimiter(content);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        match record {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|cell| cell.to_string()).collect();
                if row.iter().all(|cell| cell.trim().is_empty()) {
                    continue;
                }
                rows.push(row);
            }
            Err(e) => {
                warn!("Failed to parse statement row {}: {}", index + 1, e);
            }
        }
    }

    if rows.is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Statement contains no non-empty rows".to_string(),
        )));
    }

    Ok(rows)
}

/// Decodes content bytes, handling a UTF-8 BOM and falling back to EUC-KR
/// when the bytes are not valid UTF-8.
fn decode_content(content: &[u8]) -> String {
    let content =
        if content.len() >= 3 && content[0] == 0xEF && content[1] == 0xBB && content[2] == 0xBF {
            &content[3..]
        } else {
            content
        };

    match std::str::from_utf8(content) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, had_errors) = EUC_KR.decode(content);
            if had_errors {
                warn!("Statement bytes are neither UTF-8 nor clean EUC-KR; some characters may be replaced");
            }
            decoded.into_owned()
        }
    }
}

/// Auto-detects the delimiter by scoring candidates on the first lines:
/// occurrences on the first line times the number of lines agreeing with
/// that count. Ties keep the earlier candidate; comma is the default.
fn detect_delimiter(content: &str) -> u8 {
    let lines: Vec<&str> = content.lines().take(10).collect();
    let mut best_delimiter = b',';
    let mut best_score = 0usize;

    for delimiter in [b',', b';', b'\t'] {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.matches(delimiter as char).count())
            .collect();
        let first_count = counts.first().copied().unwrap_or(0);
        if first_count == 0 {
            continue;
        }
        let consistent = counts.iter().filter(|&&c| c == first_count).count();
        let score = first_count * consistent;
        if score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    best_delimiter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_separated_clipboard_text() {
        let text = "날짜\t종목명\t수량\n2023-01-05\t삼성전자\t10";
        let rows = parse_statement_text(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["날짜", "종목명", "수량"]);
        assert_eq!(rows[1], vec!["2023-01-05", "삼성전자", "10"]);
    }

    #[test]
    fn parses_comma_separated_text() {
        let text = "날짜,종목명,수량\n2023-01-05,삼성전자,10";
        let rows = parse_statement_text(text).unwrap();
        assert_eq!(rows[1][1], "삼성전자");
    }

    #[test]
    fn tab_wins_when_fields_contain_commas() {
        let text = "날짜\t종목명\t금액\n2023-01-05\tKODEX 200\t\"1,234,567\"";
        let rows = parse_statement_text(text).unwrap();
        assert_eq!(rows[1][2], "1,234,567");
    }

    #[test]
    fn drops_fully_empty_rows() {
        let text = "날짜,수량\n2023-01-05,10\n,\n2023-01-06,20";
        let rows = parse_statement_text(text).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn strips_utf8_bom() {
        let bytes = b"\xEF\xBB\xBF\xEB\x82\xA0\xEC\xA7\x9C,\xEC\x88\x98\xEB\x9F\x89\n2023-01-05,10";
        let rows = parse_statement_bytes(bytes).unwrap();
        assert_eq!(rows[0][0], "날짜");
    }

    #[test]
    fn decodes_euc_kr_fallback() {
        // "날짜" encoded as EUC-KR.
        let bytes = b"\xB3\xAF\xC2\xA5,10\n2023-01-05,10";
        let rows = parse_statement_bytes(bytes).unwrap();
        assert_eq!(rows[0][0], "날짜");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(parse_statement_text("").is_err());
        assert!(parse_statement_bytes(b"   \n  ").is_err());
    }
}
