//! Statement ingestion: header detection, normalization, classification,
//! twin-row reconciliation and batch assembly.

pub mod asset_class;
pub mod column_mapper;
pub mod dedup;
pub mod pipeline;
pub mod row_converter;
pub mod statement_text;
pub mod tx_type_mapper;
pub mod value_parsers;

pub use asset_class::{detect_asset_class, KR_ETF_KEYWORDS, US_ETF_KEYWORDS};
pub use column_mapper::{find_header_row, map_columns, ColumnField, ColumnMap};
pub use dedup::deduplicate_transactions;
pub use pipeline::{process_raw_data, ImportOutcome, StatementImport};
pub use row_converter::rows_to_transactions;
pub use statement_text::{parse_statement_bytes, parse_statement_text};
pub use tx_type_mapper::{is_bond_related, map_tx_type, TypeOutcome};
pub use value_parsers::{normalize_header, parse_date, parse_number};
