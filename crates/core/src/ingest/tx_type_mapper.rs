//! Free-text transaction-label classification.
//!
//! Brokerage statements describe the same economic event with a wide
//! vocabulary ("매수", "주식매수입고", "장내매수" are all buys). The alias
//! table below maps that vocabulary onto the closed [`TxType`] set using
//! longest-alias-first substring containment, so a specific phrase such as
//! "채권매수출금" wins over the generic "매수" it contains.

use lazy_static::lazy_static;

use crate::transactions::TxType;

/// Classification result for one raw label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOutcome {
    Mapped(TxType),
    /// The row is the redundant half of a paired posting and must be dropped
    /// outright; keeping it would double count the event.
    Ignore,
}

enum AliasOutcome {
    Type(TxType),
    Ignore,
    /// Generic "매매" labels carry the buy/sell direction in the memo column.
    TradeFromMemo,
}

const TX_TYPE_ALIASES: &[(&str, AliasOutcome)] = &[
    ("매수", AliasOutcome::Type(TxType::Buy)),
    ("주식매수", AliasOutcome::Type(TxType::Buy)),
    ("장내매수", AliasOutcome::Type(TxType::Buy)),
    ("주식매수입고", AliasOutcome::Type(TxType::Buy)),
    ("주식매수출금", AliasOutcome::Type(TxType::Buy)),
    ("교체매매매수", AliasOutcome::Type(TxType::Buy)),
    ("buy", AliasOutcome::Type(TxType::Buy)),
    ("매도", AliasOutcome::Type(TxType::Sell)),
    ("주식매도", AliasOutcome::Type(TxType::Sell)),
    ("장내매도", AliasOutcome::Type(TxType::Sell)),
    ("주식매도입금", AliasOutcome::Type(TxType::Sell)),
    ("sell", AliasOutcome::Type(TxType::Sell)),
    ("매매", AliasOutcome::TradeFromMemo),
    ("입금", AliasOutcome::Type(TxType::Deposit)),
    ("현금입금", AliasOutcome::Type(TxType::Deposit)),
    ("예수금입금", AliasOutcome::Type(TxType::Deposit)),
    ("상환금입금", AliasOutcome::Type(TxType::Deposit)),
    ("deposit", AliasOutcome::Type(TxType::Deposit)),
    ("출금", AliasOutcome::Type(TxType::Withdrawal)),
    ("현금출금", AliasOutcome::Type(TxType::Withdrawal)),
    ("withdrawal", AliasOutcome::Type(TxType::Withdrawal)),
    ("배당금", AliasOutcome::Type(TxType::Dividend)),
    ("배당", AliasOutcome::Type(TxType::Dividend)),
    ("dividend", AliasOutcome::Type(TxType::Dividend)),
    ("이자", AliasOutcome::Type(TxType::Interest)),
    ("예탁금이용료", AliasOutcome::Type(TxType::Interest)),
    ("제세금", AliasOutcome::Type(TxType::Tax)),
    ("배당세", AliasOutcome::Type(TxType::Tax)),
    ("세금", AliasOutcome::Type(TxType::Tax)),
    ("수수료", AliasOutcome::Type(TxType::Fee)),
    ("보관수수료", AliasOutcome::Type(TxType::Fee)),
    ("adr수수료", AliasOutcome::Type(TxType::Fee)),
    ("합병", AliasOutcome::Type(TxType::MergerSplit)),
    ("액면병합", AliasOutcome::Type(TxType::MergerSplit)),
    ("분할", AliasOutcome::Type(TxType::MergerSplit)),
    ("액면분할", AliasOutcome::Type(TxType::MergerSplit)),
    // Bond cash legs; the trade half is excluded by the bond filter anyway.
    ("채권매수출금", AliasOutcome::Ignore),
    ("채권매도입금", AliasOutcome::Ignore),
];

lazy_static! {
    /// Alias table ordered longest-first so specific phrases win; table order
    /// breaks ties between equal-length aliases.
    static ref SORTED_ALIASES: Vec<&'static (&'static str, AliasOutcome)> = {
        let mut aliases: Vec<_> = TX_TYPE_ALIASES.iter().collect();
        aliases.sort_by_key(|(alias, _)| std::cmp::Reverse(alias.chars().count()));
        aliases
    };
}

fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Classifies a raw transaction-type label, consulting `memo` only for
/// direction-ambiguous trade labels.
///
/// Unmatched labels fall back to DEPOSIT: treating an unknown row as a cash
/// movement is recoverable, silently dropping it is not.
pub fn map_tx_type(raw: &str, memo: Option<&str>) -> TypeOutcome {
    let normalized = normalize_label(raw);
    if normalized.is_empty() {
        return TypeOutcome::Mapped(TxType::Deposit);
    }

    for (alias, outcome) in SORTED_ALIASES.iter() {
        if !normalized.contains(alias) {
            continue;
        }
        return match outcome {
            AliasOutcome::Type(tx_type) => TypeOutcome::Mapped(*tx_type),
            AliasOutcome::Ignore => TypeOutcome::Ignore,
            AliasOutcome::TradeFromMemo => {
                let is_sell = memo
                    .map(|m| normalize_label(m).contains("매도"))
                    .unwrap_or(false);
                TypeOutcome::Mapped(if is_sell { TxType::Sell } else { TxType::Buy })
            }
        };
    }

    TypeOutcome::Mapped(TxType::Deposit)
}

/// Bond rows are excluded from ingestion regardless of their nominal type;
/// the holdings model does not track fixed income.
pub fn is_bond_related(name: &str, label: &str) -> bool {
    let name = name.to_lowercase();
    let label = label.to_lowercase();
    name.contains("채권") || name.contains("bond") || label.contains("채권") || label.contains("bond")
}
