//! Property tests for derived calendar fields and day deltas.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use txseq_model::{OrderingMode, PreprocessOptions};
use txseq_transform::calendar::{calendar_fields, parse_compact_date};
use txseq_transform::{TransactionRecord, preprocess_records};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..4000).prop_map(|offset| base_date().checked_add_days(Days::new(offset)).unwrap())
}

proptest! {
    #[test]
    fn calendar_fields_stay_in_range(date in date_strategy()) {
        let fields = calendar_fields(date).unwrap();
        prop_assert!(fields.month < 12);
        prop_assert!(fields.day < 31);
        prop_assert!(fields.dow < 7);
        prop_assert!(fields.dtme < 31);
    }

    #[test]
    fn compact_dates_parse_back(date in date_strategy()) {
        let text = date.format("%y%m%d").to_string();
        prop_assert_eq!(parse_compact_date(&text), Some(date));
    }

    #[test]
    fn sorted_preprocessing_has_non_negative_deltas(
        rows in prop::collection::vec(
            (1i64..4, date_strategy(), 0.0f64..10_000.0, 18.0f64..90.0, any::<bool>()),
            4..40,
        )
    ) {
        let records: Vec<TransactionRecord> = rows
            .iter()
            .map(|(account, date, amount, age, credit)| {
                let type_ = if *credit { "CREDIT" } else { "DEBIT" };
                TransactionRecord::new(
                    *account,
                    date.format("%y%m%d").to_string(),
                    *amount,
                    type_,
                    "OP",
                    "SYM",
                    *age,
                )
            })
            .collect();

        let options = PreprocessOptions::default().with_ordering(OrderingMode::SortByAccountDate);
        let result = preprocess_records(&records, &options);
        prop_assume!(result.is_ok());
        let df = result.unwrap().frame;

        let accounts = df.column("account_id").unwrap().i64().unwrap().clone();
        let tds = df.column("td").unwrap().i64().unwrap().clone();
        let amounts = df.column("amount").unwrap().f64().unwrap().clone();
        let raw_amounts = df.column("raw_amount").unwrap().f64().unwrap().clone();
        let dates: Vec<NaiveDate> = df
            .column("datetime")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .map(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap())
            .collect();

        let mut previous: Option<(i64, NaiveDate)> = None;
        for (row, date) in dates.into_iter().enumerate() {
            let (account, td) = (accounts.get(row).unwrap(), tds.get(row).unwrap());
            prop_assert!(td >= 0);
            match previous {
                Some((prev_account, prev_date)) if prev_account == account => {
                    prop_assert_eq!(td, (date - prev_date).num_days());
                }
                _ => prop_assert_eq!(td, 0),
            }
            prop_assert_eq!(raw_amounts.get(row).unwrap().abs(), amounts.get(row).unwrap());
            previous = Some((account, date));
        }
    }
}
