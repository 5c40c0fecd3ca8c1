//! Pipeline stages used by the `prepare` and `layout` commands.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use serde::Serialize;
use tracing::{debug, info};
use txseq_ingest::read_transactions_csv;
use txseq_model::{CategoricalField, PreprocessOptions};
use txseq_transform::{PreprocessOutput, preprocess};

pub const ENRICHED_FILE: &str = "enriched.csv";
pub const SCALES_FILE: &str = "scales.json";
pub const VOCABULARIES_FILE: &str = "vocabularies.json";

/// Files written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub enriched: PathBuf,
    pub scales: PathBuf,
    pub vocabularies: PathBuf,
}

/// Output directory used when none is given: `prepared/` next to the input.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("prepared")
}

pub fn load_transactions(path: &Path) -> Result<DataFrame> {
    let df = read_transactions_csv(path)
        .with_context(|| format!("read transactions from {}", path.display()))?;
    info!(rows = df.height(), columns = df.width(), "loaded transactions");
    Ok(df)
}

pub fn run_preprocess(df: &DataFrame, options: &PreprocessOptions) -> Result<PreprocessOutput> {
    let output = preprocess(df, options).context("preprocess transactions")?;
    for field in CategoricalField::ALL {
        debug!(
            field = field.column(),
            categories = output.vocabularies.get(field).len(),
            "vocabulary"
        );
    }
    Ok(output)
}

/// Writes the enriched table, scales and vocabularies into `dir`.
pub fn write_outputs(output: &mut PreprocessOutput, dir: &Path) -> Result<OutputPaths> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let paths = OutputPaths {
        enriched: dir.join(ENRICHED_FILE),
        scales: dir.join(SCALES_FILE),
        vocabularies: dir.join(VOCABULARIES_FILE),
    };

    let file = File::create(&paths.enriched)
        .with_context(|| format!("create {}", paths.enriched.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut output.frame)
        .with_context(|| format!("write {}", paths.enriched.display()))?;
    write_json(&paths.scales, &output.scales)?;
    write_json(&paths.vocabularies, &output.vocabularies)?;

    info!(dir = %dir.display(), "wrote prepared outputs");
    Ok(paths)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, format!("{json}\n")).with_context(|| format!("write {}", path.display()))
}

/// Number of transaction codes recorded in a `vocabularies.json`.
pub fn tcode_classes_from_vocabularies(path: &Path) -> Result<usize> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    let key = CategoricalField::Tcode.to_num_key();
    value
        .get(&key)
        .and_then(serde_json::Value::as_object)
        .map(serde_json::Map::len)
        .ok_or_else(|| anyhow!("{} has no {key} mapping", path.display()))
}
