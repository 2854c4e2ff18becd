#[cfg(test)]
mod tests {
    use crate::holdings::build_holdings;
    use crate::ingest::{process_raw_data, ImportOutcome};
    use crate::transactions::{AssetClass, Transaction, TxType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    struct TxSpec {
        tx_type: TxType,
        date: Option<NaiveDate>,
        qty: Decimal,
        price: Decimal,
        fee: Decimal,
        tax: Decimal,
    }

    impl TxSpec {
        fn new(tx_type: TxType, d: Option<NaiveDate>, qty: Decimal, price: Decimal) -> Self {
            Self {
                tx_type,
                date: d,
                qty,
                price,
                fee: Decimal::ZERO,
                tax: Decimal::ZERO,
            }
        }

        fn fee(mut self, fee: Decimal) -> Self {
            self.fee = fee;
            self
        }

        fn tax(mut self, tax: Decimal) -> Self {
            self.tax = tax;
            self
        }

        fn build(self, id: i64, name: &str, ticker: Option<&str>) -> Transaction {
            let amount = self.qty * self.price;
            Transaction {
                id,
                date: self.date,
                name: name.to_string(),
                ticker: ticker.map(|t| t.to_string()),
                tx_type: self.tx_type,
                tx_type_raw: String::new(),
                qty: self.qty,
                price: self.price,
                amount,
                amount_krw: amount,
                fee: self.fee,
                tax: self.tax,
                fx_rate: Decimal::ONE,
                currency: "KRW".to_string(),
                ref_id: String::new(),
                account: "계좌".to_string(),
                asset_class: AssetClass::KrStock,
            }
        }
    }

    fn samsung(id: i64, spec: TxSpec) -> Transaction {
        spec.build(id, "삼성전자", Some("005930"))
    }

    #[test]
    fn full_round_trip_closes_position() {
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(10), dec!(100))),
            samsung(2, TxSpec::new(TxType::Sell, date(2023, 2, 5), dec!(10), dec!(150))),
        ];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.qty, Decimal::ZERO);
        assert_eq!(h.avg_cost, Decimal::ZERO);
        assert_eq!(h.total_cost, Decimal::ZERO);
        assert_eq!(h.realized_pnl, dec!(500));
        assert_eq!(h.last_sell_date, date(2023, 2, 5));
    }

    #[test]
    fn partial_sell_preserves_average_cost() {
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(10), dec!(100))),
            samsung(2, TxSpec::new(TxType::Buy, date(2023, 2, 5), dec!(10), dec!(200))),
            samsung(3, TxSpec::new(TxType::Sell, date(2023, 3, 5), dec!(5), dec!(300))),
        ];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.qty, dec!(15));
        assert_eq!(h.avg_cost, dec!(150));
        assert_eq!(h.total_cost, dec!(2250));
        assert_eq!(h.realized_pnl, dec!(750));
    }

    #[test]
    fn buy_fee_enters_cost_basis() {
        let txs = vec![samsung(
            1,
            TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(10), dec!(100)).fee(dec!(50)),
        )];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.total_cost, dec!(1050));
        assert_eq!(h.avg_cost, dec!(105));
        assert_eq!(h.fees, dec!(50));
    }

    #[test]
    fn sell_fee_and_tax_reduce_realized_pnl() {
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(10), dec!(100))),
            samsung(
                2,
                TxSpec::new(TxType::Sell, date(2023, 2, 5), dec!(10), dec!(150))
                    .fee(dec!(30))
                    .tax(dec!(20)),
            ),
        ];
        let holdings = build_holdings(&txs);
        assert_eq!(holdings["005930"].realized_pnl, dec!(450));
    }

    #[test]
    fn oversell_clamps_quantity_to_zero() {
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(5), dec!(100))),
            samsung(2, TxSpec::new(TxType::Sell, date(2023, 2, 5), dec!(10), dec!(100))),
        ];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.qty, Decimal::ZERO);
        // P&L is computed against the full sell quantity at the pre-sell
        // average cost, not truncated to the tracked quantity.
        assert_eq!(h.realized_pnl, Decimal::ZERO);
        assert_eq!(h.total_cost, Decimal::ZERO);
        assert_eq!(h.avg_cost, Decimal::ZERO);
    }

    #[test]
    fn reopening_after_close_starts_fresh_average() {
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(10), dec!(100))),
            samsung(2, TxSpec::new(TxType::Sell, date(2023, 2, 5), dec!(10), dec!(150))),
            samsung(3, TxSpec::new(TxType::Buy, date(2023, 3, 5), dec!(4), dec!(400))),
        ];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.qty, dec!(4));
        assert_eq!(h.avg_cost, dec!(400));
        assert_eq!(h.total_cost, dec!(1600));
        // Realized P&L from the earlier round trip is retained.
        assert_eq!(h.realized_pnl, dec!(500));
    }

    #[test]
    fn dividends_accumulate_without_touching_cost() {
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(10), dec!(100))),
            samsung(2, TxSpec::new(TxType::Dividend, date(2023, 4, 1), dec!(1), dec!(361))),
            samsung(3, TxSpec::new(TxType::Dividend, date(2023, 7, 1), dec!(1), dec!(361))),
        ];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.dividends, dec!(722));
        assert_eq!(h.total_cost, dec!(1000));
        assert_eq!(h.qty, dec!(10));
    }

    #[test]
    fn standalone_fee_event_reinflates_average_cost() {
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(10), dec!(100))),
            samsung(2, TxSpec::new(TxType::Fee, date(2023, 2, 5), dec!(1), dec!(100))),
        ];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.total_cost, dec!(1100));
        assert_eq!(h.avg_cost, dec!(110));
        assert_eq!(h.qty, dec!(10));
    }

    #[test]
    fn fee_event_on_empty_position_leaves_avg_cost_zero() {
        let txs = vec![samsung(
            1,
            TxSpec::new(TxType::Fee, date(2023, 2, 5), dec!(1), dec!(100)),
        )];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.total_cost, dec!(100));
        assert_eq!(h.avg_cost, Decimal::ZERO);
    }

    #[test]
    fn cash_level_events_do_not_move_positions() {
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(10), dec!(100))),
            samsung(2, TxSpec::new(TxType::Deposit, date(2023, 2, 1), dec!(0), dec!(0))),
            samsung(3, TxSpec::new(TxType::Tax, date(2023, 2, 2), dec!(0), dec!(0))),
            samsung(4, TxSpec::new(TxType::Interest, date(2023, 2, 3), dec!(0), dec!(0))),
            samsung(5, TxSpec::new(TxType::MergerSplit, date(2023, 2, 4), dec!(0), dec!(0))),
        ];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.qty, dec!(10));
        assert_eq!(h.total_cost, dec!(1000));
        // Every contributing transaction is kept for drill-down.
        assert_eq!(h.transactions.len(), 5);
    }

    #[test]
    fn replay_is_date_ordered_regardless_of_input_order() {
        // Sell arrives before the buys in input order; sorting must put the
        // buys first or the sell would clamp against an empty position.
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Sell, date(2023, 3, 5), dec!(5), dec!(300))),
            samsung(2, TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(10), dec!(100))),
            samsung(3, TxSpec::new(TxType::Buy, date(2023, 2, 5), dec!(10), dec!(200))),
        ];
        let holdings = build_holdings(&txs);
        let h = &holdings["005930"];

        assert_eq!(h.qty, dec!(15));
        assert_eq!(h.realized_pnl, dec!(750));
    }

    #[test]
    fn same_day_transactions_keep_input_order() {
        let d = date(2023, 1, 5);
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Buy, d, dec!(10), dec!(100))),
            samsung(2, TxSpec::new(TxType::Sell, d, dec!(10), dec!(150))),
        ];
        let holdings = build_holdings(&txs);
        assert_eq!(holdings["005930"].realized_pnl, dec!(500));
    }

    #[test]
    fn undated_transactions_replay_first() {
        let txs = vec![
            samsung(1, TxSpec::new(TxType::Sell, date(2023, 1, 5), dec!(10), dec!(150))),
            samsung(2, TxSpec::new(TxType::Buy, None, dec!(10), dec!(100))),
        ];
        let holdings = build_holdings(&txs);
        assert_eq!(holdings["005930"].realized_pnl, dec!(500));
    }

    #[test]
    fn unresolved_tickers_are_keyed_by_name() {
        let txs = vec![
            TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(1), dec!(500))
                .build(1, "엔비디아", None),
            TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(1), dec!(300))
                .build(2, "팔란티어", None),
        ];
        let holdings = build_holdings(&txs);

        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings["엔비디아"].qty, dec!(1));
        assert_eq!(holdings["팔란티어"].qty, dec!(1));
    }

    #[test]
    fn rows_with_no_key_are_skipped() {
        let txs = vec![TxSpec::new(TxType::Deposit, date(2023, 1, 5), dec!(0), dec!(0))
            .build(1, "", None)];
        assert!(build_holdings(&txs).is_empty());
    }

    #[test]
    fn fx_rate_tracks_last_seen_value() {
        let mut first = TxSpec::new(TxType::Buy, date(2023, 1, 5), dec!(1), dec!(100))
            .build(1, "APPLE INC", Some("AAPL"));
        first.fx_rate = dec!(1250);
        let mut second = TxSpec::new(TxType::Buy, date(2023, 2, 5), dec!(1), dec!(100))
            .build(2, "APPLE INC", Some("AAPL"));
        second.fx_rate = dec!(1320);

        let holdings = build_holdings(&[first, second]);
        assert_eq!(holdings["AAPL"].fx_rate, dec!(1320));
    }

    #[test]
    fn empty_input_builds_empty_map() {
        assert!(build_holdings(&[]).is_empty());
    }

    #[test]
    fn statement_ingestion_feeds_holdings_end_to_end() {
        let rows: Vec<Vec<String>> = [
            vec!["날짜", "종목명", "종목코드", "거래구분", "수량", "단가"],
            vec!["2023-01-05", "삼성전자", "005930", "매수", "10", "70000"],
            vec!["2023-06-10", "삼성전자", "005930", "매도", "10", "85000"],
        ]
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

        let ImportOutcome::Imported(batch) =
            process_raw_data(&rows, &HashMap::new(), "테스트계좌")
        else {
            panic!("expected recognized format");
        };
        assert_eq!(batch.transactions.len(), 2);
        assert!(batch.unmapped_names.is_empty());

        let holdings = build_holdings(&batch.transactions);
        let h = &holdings["005930"];
        assert_eq!(h.qty, Decimal::ZERO);
        assert_eq!(h.realized_pnl, dec!(150000));
        assert_eq!(h.total_cost, Decimal::ZERO);
    }
}
