use std::path::PathBuf;

use txseq_model::{CategoricalField, OrderingMode, ScaleParameters};

use txseq_cli::pipeline::OutputPaths;

#[derive(Debug)]
pub struct PrepareResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub rows: usize,
    pub accounts: usize,
    pub ordering: OrderingMode,
    pub scales: ScaleParameters,
    pub vocabulary_sizes: Vec<(CategoricalField, usize)>,
    /// `None` on a dry run.
    pub outputs: Option<OutputPaths>,
}
