use anyhow::{Context, Result};
use tracing::{info, info_span};

use txseq_cli::config::PipelineConfig;
use txseq_cli::pipeline::{
    default_output_dir, load_transactions, run_preprocess, tcode_classes_from_vocabularies,
    write_outputs,
};
use txseq_layout::{render_layout, select_strategy};
use txseq_model::{CategoricalField, OrderingMode};

use crate::cli::{LayoutArgs, PrepareArgs};
use crate::summary::print_scenarios;
use crate::types::PrepareResult;

pub fn run_prepare(args: &PrepareArgs) -> Result<PrepareResult> {
    let mut config = PipelineConfig::load_or_default(args.config.as_deref())?;
    if args.sort_by_account_date {
        config.preprocess.ordering = OrderingMode::SortByAccountDate;
    }
    if let Some(label) = &args.credit_label {
        config.preprocess.credit_label = label.clone();
    }
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));

    let prepare_span = info_span!("prepare", input = %args.input.display());
    let _prepare_guard = prepare_span.enter();

    let df = info_span!("ingest").in_scope(|| load_transactions(&args.input))?;
    let accounts = df
        .column("account_id")
        .and_then(|column| column.n_unique())
        .context("count accounts")?;

    let mut output = info_span!(
        "preprocess",
        ordering = %config.preprocess.ordering,
        credit_label = %config.preprocess.credit_label
    )
    .in_scope(|| run_preprocess(&df, &config.preprocess))?;

    let outputs = if args.dry_run {
        info!("dry run, skipping output files");
        None
    } else {
        let span = info_span!("output", dir = %output_dir.display());
        Some(span.in_scope(|| write_outputs(&mut output, &output_dir))?)
    };

    Ok(PrepareResult {
        input: args.input.clone(),
        output_dir,
        rows: output.frame.height(),
        accounts,
        ordering: config.preprocess.ordering,
        scales: output.scales,
        vocabulary_sizes: CategoricalField::ALL
            .into_iter()
            .map(|field| (field, output.vocabularies.get(field).len()))
            .collect(),
        outputs,
    })
}

pub fn run_layout(args: &LayoutArgs) -> Result<()> {
    let mut config = PipelineConfig::load_or_default(args.config.as_deref())?;
    if let Some(preset) = &args.preset {
        config.preset = preset.clone();
    }
    if let Some(scenario) = &args.scenario {
        config.scenario = select_strategy(scenario).context("select scenario")?;
    }
    if let Some(path) = &args.vocabularies {
        config.tcode_classes = Some(tcode_classes_from_vocabularies(path)?);
    }
    if let Some(classes) = args.tcode_classes {
        config.tcode_classes = Some(classes);
    }

    let info = info_span!("layout", preset = %config.preset, scenario = %config.scenario)
        .in_scope(|| config.build_layout())?;

    if args.json {
        let json = serde_json::to_string_pretty(&info.to_config())?;
        println!("{json}");
    } else {
        print!("{}", render_layout(&info));
    }
    Ok(())
}

pub fn run_scenarios() {
    print_scenarios();
}
