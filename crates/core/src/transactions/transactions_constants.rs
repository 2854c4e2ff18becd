/// Transaction types
///
/// Each constant represents one of the supported transaction categories.

/// Purchase of an instrument. Increases quantity and cost basis.
pub const TX_TYPE_BUY: &str = "BUY";

/// Disposal of an instrument. Decreases quantity, realizes P&L.
pub const TX_TYPE_SELL: &str = "SELL";

/// Cash paid into the account.
pub const TX_TYPE_DEPOSIT: &str = "DEPOSIT";

/// Cash taken out of the account.
pub const TX_TYPE_WITHDRAWAL: &str = "WITHDRAWAL";

/// Cash dividend received for a held instrument.
pub const TX_TYPE_DIVIDEND: &str = "DIVIDEND";

/// Withholding or transaction tax booked on its own row.
pub const TX_TYPE_TAX: &str = "TAX";

/// Stand-alone brokerage or custody fee not tied to a trade.
pub const TX_TYPE_FEE: &str = "FEE";

/// Merger, par-value change, split or reverse split.
pub const TX_TYPE_MERGER_SPLIT: &str = "MERGER_SPLIT";

/// Interest on idle cash (예탁금이용료) or fixed income.
pub const TX_TYPE_INTEREST: &str = "INTEREST";

/// Kinds that move both cash and quantity.
pub const TRADE_TX_TYPES: [&str; 2] = [TX_TYPE_BUY, TX_TYPE_SELL];

/// Kinds that reference a concrete instrument; rows of these kinds with an
/// unresolved ticker are surfaced as unmapped names.
pub const INSTRUMENT_TX_TYPES: [&str; 3] = [TX_TYPE_BUY, TX_TYPE_SELL, TX_TYPE_DIVIDEND];
