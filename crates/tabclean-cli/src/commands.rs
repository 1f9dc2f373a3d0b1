use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tabclean_ingest::{Delimiter, ReadOptions, read_delimited, write_delimited};
use tabclean_model::{Category, DayOrder, ExecutionHint, NormalizationOptions, NormalizeError};
use tabclean_transform::{ColumnClassifier, Normalizer, TableReport, table_from_frame, table_to_frame};

use crate::cli::{ClassifyArgs, CleanArgs, DelimiterArg};

/// Outcome of a `clean` run.
#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report_path: Option<PathBuf>,
    pub report: TableReport,
}

/// Load normalization options from a JSON file; defaults when no file is given.
///
/// Missing fields take their default values.
pub fn load_options(path: Option<&Path>) -> Result<NormalizationOptions> {
    let Some(path) = path else {
        return Ok(NormalizationOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    Ok(options)
}

/// Config file options with command line flags applied on top.
pub fn build_options(args: &CleanArgs) -> Result<NormalizationOptions> {
    let mut options = load_options(args.config.as_deref())?;
    if args.keep_time {
        options = options.with_keep_time_of_day(true);
    }
    if args.month_first {
        options = options.with_day_order(DayOrder::MonthFirst);
    }
    if args.no_permissive {
        options = options.with_permissive_dates(false);
    }
    if args.row_wise {
        options = options.with_hint(ExecutionHint::RowWise);
    }
    Ok(options)
}

/// `<stem>_clean.<ext>` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{stem}_clean.{}", ext.to_string_lossy()),
        None => format!("{stem}_clean"),
    };
    input.with_file_name(name)
}

fn delimiter(arg: DelimiterArg) -> Delimiter {
    match arg {
        DelimiterArg::Auto => Delimiter::Auto,
        DelimiterArg::Comma => Delimiter::Comma,
        DelimiterArg::Tab => Delimiter::Tab,
    }
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let span = info_span!("clean", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = build_options(args)?;
    let normalizer = Normalizer::new(options).context("invalid normalization options")?;

    let read_options = ReadOptions {
        delimiter: delimiter(args.delimiter),
        strip_thousands: args.strip_thousands,
        ..ReadOptions::default()
    };
    let df = read_delimited(&args.input, &read_options)
        .with_context(|| format!("read {}", args.input.display()))?;

    let table = table_from_frame(&df).context("convert input frame")?;
    let normalized = normalizer
        .normalize_table(table)
        .context("normalize table")?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    let mut out = table_to_frame(&normalized.table).context("build output frame")?;
    write_delimited(&mut out, &output, read_options.delimiter)
        .with_context(|| format!("write {}", output.display()))?;

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&normalized.report).context("serialize report")?;
        fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    }

    info!(
        rows = normalized.report.rows,
        columns = normalized.report.columns.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Clean finished"
    );

    Ok(CleanResult {
        input: args.input.clone(),
        output,
        report_path: args.report.clone(),
        report: normalized.report,
    })
}

/// Classify column names with the configured ruleset, in argument order.
pub fn run_classify(args: &ClassifyArgs) -> Result<Vec<(String, Category)>> {
    let options = load_options(args.config.as_deref())?;
    options.validate().context("invalid normalization options")?;
    let classifier = ColumnClassifier::new(options.ruleset);
    Ok(args
        .names
        .iter()
        .map(|name| (name.clone(), classifier.classify(name)))
        .collect())
}

/// Prefix for a failed run on stderr.
///
/// Configuration mistakes are labeled apart from shape and I/O failures.
pub fn failure_label(error: &anyhow::Error) -> &'static str {
    let configuration = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<NormalizeError>())
        .any(NormalizeError::is_configuration);
    if configuration {
        "configuration error"
    } else {
        "error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/claims.tsv")),
            PathBuf::from("/data/claims_clean.tsv")
        );
        assert_eq!(
            default_output_path(Path::new("claims")),
            PathBuf::from("claims_clean")
        );
    }

    #[test]
    fn test_no_config_is_default() {
        assert_eq!(load_options(None).unwrap(), NormalizationOptions::default());
    }
}
