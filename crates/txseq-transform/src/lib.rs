//! Feature derivation for transaction logs.
//!
//! - **calendar**: `yyMMdd` parsing, folded calendar fields and their columns
//! - **deltas**: per-account day deltas and explicit chronological ordering
//! - **scaling**: standard-deviation scales with degenerate-column checks
//! - **records**: raw rows and the typed input frame
//! - **preprocess**: the single preprocessing pass

pub mod calendar;
pub mod deltas;
pub mod error;
pub mod preprocess;
pub mod records;
pub mod scaling;

pub use error::{PreprocessError, Result};
pub use preprocess::{
    ENRICHED_COLUMNS, PreprocessOutput, TCODE_SEP, compound_tcode, preprocess, preprocess_records,
};
pub use records::{TransactionRecord, input_frame, transactions_frame};
