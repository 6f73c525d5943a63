//! QARank CLI: score, rank and evaluate candidate answers for tagged questions.

use anyhow::{Context, Result};
use clap::Parser;
use qarank::{
    ingest::{self, ParserRegistry},
    report::{DocumentReport, Report, ReportFormat},
    scoring::OverlapMode,
    Config, ScoringOptions,
};
use std::io::Write;
use std::path::PathBuf;

/// Rank candidate answers by lexical overlap with their question.
#[derive(Parser, Debug)]
#[command(name = "qarank", version)]
struct Args {
    /// Input files or directories (tagged text `.txt`/`.tag`/`.pos`, or `.json`).
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Config file (default: $QARANK_CONFIG, then ./config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overlap counting mode.
    #[arg(long, value_enum)]
    mode: Option<OverlapMode>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Show answers with identical text more than once.
    #[arg(long)]
    no_dedupe: bool,

    /// Exit with status 1 when mean gold Precision@N is below this value.
    #[arg(long)]
    min_gold_precision: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", &config.qarank.log_level)
    ).init();

    if let Some(mode) = args.mode {
        config.scoring.overlap_mode = mode;
    }
    if let Some(format) = args.format {
        config.report.format = format;
    }
    if args.no_dedupe {
        config.report.dedupe_answers = false;
    }
    if let Some(threshold) = args.min_gold_precision {
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("--min-gold-precision must be between 0.0 and 1.0");
        }
        config.report.min_gold_precision = Some(threshold);
    }

    let files = ingest::collect_inputs(&args.paths)?;
    if files.is_empty() {
        anyhow::bail!("No input files found");
    }

    let registry = ParserRegistry::new(config.segmenter.markers());
    let mut documents = Vec::with_capacity(files.len());
    let mut failed = 0usize;
    for file in &files {
        match ingest::load_document(file, &registry) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                log::error!("Skipping {}: {}", file.relative_path, e);
                failed += 1;
            }
        }
    }

    if documents.is_empty() {
        anyhow::bail!("None of the {} input file(s) could be loaded", files.len());
    }

    log::info!(
        "Evaluating {} document(s) ({:?} overlap)",
        documents.len(),
        config.scoring.overlap_mode
    );

    let options = ScoringOptions::from_config(&config);
    let reports: Vec<DocumentReport> = documents
        .iter()
        .map(|doc| {
            let result = qarank::evaluate_document(doc, &options);
            DocumentReport::new(&result, config.report.dedupe_answers)
        })
        .collect();
    let report = Report::new(reports);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report
        .write(&mut out, config.report.format)
        .context("Failed to write report")?;
    out.flush().context("Failed to flush report")?;

    if failed > 0 {
        log::warn!("{} input file(s) failed to load", failed);
    }

    if let Some(threshold) = config.report.min_gold_precision {
        match report.summary.mean_gold_precision {
            Some(p) if p >= threshold => {
                log::info!("Mean gold P@N {:.4} meets threshold {:.4}", p, threshold);
            }
            Some(p) => {
                eprintln!("Mean gold P@N {:.4} is below threshold {:.4}", p, threshold);
                std::process::exit(1);
            }
            None => {
                eprintln!("No gold labels in input; cannot check threshold {:.4}", threshold);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
