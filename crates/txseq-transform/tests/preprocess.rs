//! Tests for the preprocessing pass.

use polars::prelude::*;
use txseq_model::{CategoricalField, MISSING_CATEGORY, OrderingMode, PreprocessOptions};
use txseq_transform::{
    ENRICHED_COLUMNS, PreprocessError, PreprocessOutput, TransactionRecord, preprocess,
    preprocess_records,
};

fn sample_records() -> Vec<TransactionRecord> {
    vec![
        TransactionRecord::new(1, "930101", 100.0, "CREDIT", "X", "Y", 40.0),
        TransactionRecord::new(2, "930110", 250.0, "DEBIT", "W", "Z", 55.0),
        TransactionRecord::new(1, "930105", 30.0, "DEBIT", "W", "Z", 40.0),
        TransactionRecord::new(2, "930112", 1000.0, "CREDIT", "X", "Y", 55.0),
        TransactionRecord::new(1, "931231", 5.0, "DEBIT", "W", "", 40.0),
    ]
}

fn sample_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new("account_id".into(), vec![1i64, 2, 1, 2, 1]).into_column(),
        Series::new("date".into(), vec![930101i64, 930110, 930105, 930112, 931231])
            .into_column(),
        Series::new("amount".into(), vec![100.0f64, 250.0, 30.0, 1000.0, 5.0]).into_column(),
        Series::new("type".into(), vec!["CREDIT", "DEBIT", "DEBIT", "CREDIT", "DEBIT"])
            .into_column(),
        Series::new("operation".into(), vec!["X", "W", "W", "X", "W"]).into_column(),
        Series::new(
            "k_symbol".into(),
            vec![Some("Y"), Some("Z"), Some("Z"), Some("Y"), None],
        )
        .into_column(),
        Series::new("age".into(), vec![40i64, 55, 40, 55, 40]).into_column(),
    ])
    .unwrap()
}

fn run(records: &[TransactionRecord]) -> PreprocessOutput {
    preprocess_records(records, &PreprocessOptions::default()).unwrap()
}

fn i64s(df: &DataFrame, name: &str) -> Vec<i64> {
    df.column(name).unwrap().i64().unwrap().into_no_null_iter().collect()
}

fn u32s(df: &DataFrame, name: &str) -> Vec<u32> {
    df.column(name).unwrap().u32().unwrap().into_no_null_iter().collect()
}

fn f64s(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name).unwrap().f64().unwrap().into_no_null_iter().collect()
}

fn strs(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_no_null_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn first_credit_row_of_an_account() {
    let df = run(&sample_records()).frame;

    assert_eq!(i64s(&df, "td")[0], 0);
    assert_eq!(f64s(&df, "raw_amount")[0], 100.0);
    assert_eq!(strs(&df, "tcode")[0], "CREDIT__X__Y");
    assert_eq!(u32s(&df, "tcode_num")[0], 0);
    assert_eq!(u32s(&df, "month")[0], 1);
    assert_eq!(u32s(&df, "day")[0], 1);
    assert_eq!(u32s(&df, "dow")[0], 4); // Friday
    assert_eq!(u32s(&df, "dtme")[0], 30);
    assert_eq!(
        df.column("year").unwrap().i32().unwrap().get(0),
        Some(1993)
    );
}

#[test]
fn day_deltas_follow_each_account() {
    let df = run(&sample_records()).frame;
    assert_eq!(i64s(&df, "td"), vec![0, 0, 4, 2, 360]);
}

#[test]
fn debits_are_negative() {
    let df = run(&sample_records()).frame;
    assert_eq!(
        f64s(&df, "raw_amount"),
        vec![100.0, -250.0, -30.0, 1000.0, -5.0]
    );
}

#[test]
fn custom_credit_label() {
    let options = PreprocessOptions::default().with_credit_label("PRIJEM");
    let df = preprocess_records(&sample_records(), &options).unwrap().frame;
    assert!(f64s(&df, "raw_amount").iter().all(|amount| *amount < 0.0));
}

#[test]
fn year_end_folds_to_zero_and_blank_symbol_uses_sentinel() {
    let df = run(&sample_records()).frame;
    assert_eq!(u32s(&df, "month")[4], 0);
    assert_eq!(u32s(&df, "day")[4], 0);
    assert_eq!(u32s(&df, "dtme")[4], 0);
    assert_eq!(strs(&df, "k_symbol")[4], MISSING_CATEGORY);
    assert_eq!(strs(&df, "tcode")[4], format!("DEBIT__W__{MISSING_CATEGORY}"));
    assert_eq!(u32s(&df, "tcode_num")[4], 2);
}

#[test]
fn padded_categories_keep_their_own_ids() {
    let records = vec![
        TransactionRecord::new(1, "930101", 100.0, "CREDIT", "X", "Y", 40.0),
        TransactionRecord::new(1, "930105", 50.0, "CREDIT ", "X ", "Y", 50.0),
        TransactionRecord::new(2, "930110", 20.0, "DEBIT", "X", "Y", 60.0),
    ];
    let output = run(&records);
    let operations = output.vocabularies.get(CategoricalField::Operation);
    assert_eq!(operations.len(), 2);
    assert_eq!(operations.id_of("X "), Some(1));
    assert_eq!(u32s(&output.frame, "operation_num"), vec![0, 1, 0]);
    assert_eq!(
        strs(&output.frame, "tcode"),
        vec!["CREDIT__X__Y", "CREDIT __X __Y", "DEBIT__X__Y"]
    );
    assert_eq!(f64s(&output.frame, "raw_amount"), vec![100.0, -50.0, -20.0]);
}

#[test]
fn vocabularies_are_first_seen_and_invertible() {
    let output = run(&sample_records());
    let tcodes = output.vocabularies.get(CategoricalField::Tcode);
    assert_eq!(tcodes.category(0), Some("CREDIT__X__Y"));
    assert_eq!(tcodes.category(1), Some("DEBIT__W__Z"));

    for field in CategoricalField::ALL {
        let vocab = output.vocabularies.get(field);
        for category in vocab.categories() {
            let id = vocab.id_of(category).unwrap();
            assert_eq!(vocab.category(id), Some(category.as_str()));
        }
        let categories = strs(&output.frame, field.column());
        let ids = u32s(&output.frame, &format!("{}_num", field.column()));
        for (category, id) in categories.iter().zip(ids) {
            assert_eq!(vocab.category(id), Some(category.as_str()));
        }
    }
}

#[test]
fn scaled_columns_reconstruct_originals() {
    let output = run(&sample_records());
    let (df, scales) = (&output.frame, output.scales);

    let rows = f64s(df, "log_amount")
        .into_iter()
        .zip(f64s(df, "log_amount_sc"))
        .zip(i64s(df, "td").into_iter().zip(f64s(df, "td_sc")))
        .zip(f64s(df, "age").into_iter().zip(f64s(df, "age_sc")))
        .zip(f64s(df, "amount"));
    for ((((log_amount, log_amount_sc), (td, td_sc)), (age, age_sc)), amount) in rows {
        assert!((log_amount_sc * scales.log_amount_scale - log_amount).abs() < 1e-9);
        assert!((td_sc * scales.td_scale - td as f64).abs() < 1e-9);
        assert!((age_sc * scales.attr_scale - age).abs() < 1e-9);
        assert!((scales.amount_from_log_amount_sc(log_amount_sc) - amount).abs() < 1e-6);
    }
    assert_eq!(scales.start_date.to_string(), "1993-01-01");
}

#[test]
fn zero_variance_age_aborts() {
    let records = vec![
        TransactionRecord::new(1, "930101", 100.0, "CREDIT", "X", "Y", 40.0),
        TransactionRecord::new(1, "930103", 200.0, "CREDIT", "X", "Y", 40.0),
        TransactionRecord::new(1, "930110", 300.0, "CREDIT", "X", "Y", 40.0),
    ];
    let err = preprocess_records(&records, &PreprocessOptions::default()).unwrap_err();
    assert!(matches!(err, PreprocessError::DegenerateScale { ref column, .. } if column == "age"));
}

#[test]
fn single_row_has_no_usable_scale() {
    let records = vec![TransactionRecord::new(1, "930101", 100.0, "CREDIT", "X", "Y", 40.0)];
    let err = preprocess_records(&records, &PreprocessOptions::default()).unwrap_err();
    assert!(matches!(err, PreprocessError::DegenerateScale { .. }));
}

#[test]
fn malformed_date_aborts() {
    let mut records = sample_records();
    records[3].date = "931341".to_string();
    let err = preprocess_records(&records, &PreprocessOptions::default()).unwrap_err();
    assert!(matches!(err, PreprocessError::InvalidDate { row: 3, ref value } if value == "931341"));
}

#[test]
fn amount_below_minus_one_aborts() {
    let mut records = sample_records();
    records[2].amount = -2.0;
    let err = preprocess_records(&records, &PreprocessOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        PreprocessError::InvalidValue { ref column, row: 2, .. } if column == "amount"
    ));
}

#[test]
fn empty_input_aborts() {
    let err = preprocess_records(&[], &PreprocessOptions::default()).unwrap_err();
    assert!(matches!(err, PreprocessError::EmptyInput));
}

#[test]
fn explicit_sort_orders_accounts_chronologically() {
    let records = vec![
        TransactionRecord::new(2, "930301", 10.0, "CREDIT", "X", "Y", 30.0),
        TransactionRecord::new(1, "930120", 20.0, "DEBIT", "W", "Z", 45.0),
        TransactionRecord::new(1, "930102", 30.0, "CREDIT", "X", "Y", 45.0),
        TransactionRecord::new(2, "930201", 40.0, "DEBIT", "W", "Z", 30.0),
    ];

    let as_given = run(&records).frame;
    assert_eq!(i64s(&as_given, "td"), vec![0, 0, -18, -28]);

    let options = PreprocessOptions::default().with_ordering(OrderingMode::SortByAccountDate);
    let sorted = preprocess_records(&records, &options).unwrap().frame;
    let order: Vec<(i64, String)> = i64s(&sorted, "account_id")
        .into_iter()
        .zip(strs(&sorted, "date"))
        .collect();
    assert_eq!(
        order,
        vec![
            (1, "930102".to_string()),
            (1, "930120".to_string()),
            (2, "930201".to_string()),
            (2, "930301".to_string()),
        ]
    );
    assert_eq!(i64s(&sorted, "td"), vec![0, 18, 0, 28]);
    // Category ids are assigned in the sorted order.
    assert_eq!(u32s(&sorted, "tcode_num")[0], 0);
    assert_eq!(strs(&sorted, "tcode")[0], "CREDIT__X__Y");
}

#[test]
fn polars_frame_is_enriched() {
    let output = preprocess(&sample_frame(), &PreprocessOptions::default()).unwrap();
    let df = &output.frame;

    assert_eq!(df.height(), 5);
    let names: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
    assert_eq!(names, ENRICHED_COLUMNS);
    assert_eq!(i64s(df, "td")[2], 4);
    assert_eq!(strs(df, "date")[0], "930101");
    assert_eq!(strs(df, "tcode")[0], "CREDIT__X__Y");
    assert_eq!(strs(df, "tcode")[4], "DEBIT__W___nan");
    assert_eq!(u32s(df, "dow")[0], 4);
    assert_eq!(strs(df, "datetime")[0], "1993-01-01");
    assert_eq!(f64s(df, "age")[1], 55.0);
}

#[test]
fn frame_missing_column_aborts() {
    let df = sample_frame().drop("operation").unwrap();
    let err = preprocess(&df, &PreprocessOptions::default()).unwrap_err();
    assert!(matches!(err, PreprocessError::MissingColumn { ref column } if column == "operation"));
}
