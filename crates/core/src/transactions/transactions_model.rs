use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// The closed set of transaction kinds every raw statement label is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxType {
    Buy,
    Sell,
    Deposit,
    Withdrawal,
    Dividend,
    Tax,
    Fee,
    MergerSplit,
    Interest,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        use crate::transactions::transactions_constants::*;
        match self {
            TxType::Buy => TX_TYPE_BUY,
            TxType::Sell => TX_TYPE_SELL,
            TxType::Deposit => TX_TYPE_DEPOSIT,
            TxType::Withdrawal => TX_TYPE_WITHDRAWAL,
            TxType::Dividend => TX_TYPE_DIVIDEND,
            TxType::Tax => TX_TYPE_TAX,
            TxType::Fee => TX_TYPE_FEE,
            TxType::MergerSplit => TX_TYPE_MERGER_SPLIT,
            TxType::Interest => TX_TYPE_INTEREST,
        }
    }

    /// True for the two trade kinds that move both cash and quantity.
    pub fn is_trade(&self) -> bool {
        matches!(self, TxType::Buy | TxType::Sell)
    }

    /// True for kinds that reference a concrete instrument, i.e. the kinds
    /// whose rows are worth surfacing for manual ticker resolution.
    pub fn needs_instrument(&self) -> bool {
        matches!(self, TxType::Buy | TxType::Sell | TxType::Dividend)
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use crate::transactions::transactions_constants::*;
        match s {
            s if s == TX_TYPE_BUY => Ok(TxType::Buy),
            s if s == TX_TYPE_SELL => Ok(TxType::Sell),
            s if s == TX_TYPE_DEPOSIT => Ok(TxType::Deposit),
            s if s == TX_TYPE_WITHDRAWAL => Ok(TxType::Withdrawal),
            s if s == TX_TYPE_DIVIDEND => Ok(TxType::Dividend),
            s if s == TX_TYPE_TAX => Ok(TxType::Tax),
            s if s == TX_TYPE_FEE => Ok(TxType::Fee),
            s if s == TX_TYPE_MERGER_SPLIT => Ok(TxType::MergerSplit),
            s if s == TX_TYPE_INTEREST => Ok(TxType::Interest),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

/// Asset class inferred once at conversion time and frozen on the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    KrStock,
    KrEtf,
    UsStock,
    UsEtf,
    KrBond,
    Gold,
    Pension,
    Cash,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::KrStock => "KR_STOCK",
            AssetClass::KrEtf => "KR_ETF",
            AssetClass::UsStock => "US_STOCK",
            AssetClass::UsEtf => "US_ETF",
            AssetClass::KrBond => "KR_BOND",
            AssetClass::Gold => "GOLD",
            AssetClass::Pension => "PENSION",
            AssetClass::Cash => "CASH",
        }
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KR_STOCK" => Ok(AssetClass::KrStock),
            "KR_ETF" => Ok(AssetClass::KrEtf),
            "US_STOCK" => Ok(AssetClass::UsStock),
            "US_ETF" => Ok(AssetClass::UsEtf),
            "KR_BOND" => Ok(AssetClass::KrBond),
            "GOLD" => Ok(AssetClass::Gold),
            "PENSION" => Ok(AssetClass::Pension),
            "CASH" => Ok(AssetClass::Cash),
            _ => Err(format!("Unknown asset class: {}", s)),
        }
    }
}

/// Canonical transaction record, the unit everything downstream consumes.
///
/// `amount` is in statement currency; `amount_krw` is the same event valued
/// in the reporting currency. `tx_type_raw` keeps the original free-text
/// label for audit. Ids are assigned after deduplication and are stable only
/// within one imported batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub name: String,
    pub ticker: Option<String>,
    pub tx_type: TxType,
    pub tx_type_raw: String,
    pub qty: Decimal,
    pub price: Decimal,
    pub amount: Decimal,
    #[serde(rename = "amountKRW")]
    pub amount_krw: Decimal,
    pub fee: Decimal,
    pub tax: Decimal,
    pub fx_rate: Decimal,
    pub currency: String,
    pub ref_id: String,
    pub account: String,
    pub asset_class: AssetClass,
}

impl Transaction {
    /// True when this row should be offered for manual ticker resolution.
    pub fn needs_ticker(&self) -> bool {
        self.ticker.is_none() && !self.name.is_empty() && self.tx_type.needs_instrument()
    }
}

/// A converted statement row before deduplication and id assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: Option<NaiveDate>,
    pub name: String,
    pub ticker: Option<String>,
    pub tx_type: TxType,
    pub tx_type_raw: String,
    pub qty: Decimal,
    pub price: Decimal,
    pub amount: Decimal,
    #[serde(rename = "amountKRW")]
    pub amount_krw: Decimal,
    pub fee: Decimal,
    pub tax: Decimal,
    pub fx_rate: Decimal,
    pub currency: String,
    pub ref_id: String,
    pub account: String,
    pub asset_class: AssetClass,
}

impl NewTransaction {
    pub fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            date: self.date,
            name: self.name,
            ticker: self.ticker,
            tx_type: self.tx_type,
            tx_type_raw: self.tx_type_raw,
            qty: self.qty,
            price: self.price,
            amount: self.amount,
            amount_krw: self.amount_krw,
            fee: self.fee,
            tax: self.tax,
            fx_rate: self.fx_rate,
            currency: self.currency,
            ref_id: self.ref_id,
            account: self.account,
            asset_class: self.asset_class,
        }
    }
}

/// An instrument name the pipeline could not resolve to a ticker, surfaced
/// for the user to fill in. `ticker` is the (initially empty) answer slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmappedName {
    pub name: String,
    pub ticker: String,
}

impl UnmappedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: String::new(),
        }
    }
}

/// One persisted name → ticker association, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerMapping {
    pub name: String,
    pub ticker: String,
}

/// A user-defined portfolio grouping, keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub tickers: Vec<String>,
    pub target_weights: HashMap<String, Decimal>,
    pub created_at: String,
}
