//! Delimited file writing.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::error::{IngestError, Result};

use super::reader::Delimiter;

/// Write a frame with a header row; nulls are written as empty fields.
///
/// `Delimiter::Auto` resolves against the output path, so `out.tsv` is
/// written tab-separated.
pub fn write_delimited(df: &mut DataFrame, path: &Path, delimiter: Delimiter) -> Result<()> {
    let file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    CsvWriter::new(file)
        .include_header(true)
        .with_separator(delimiter.resolve(path))
        .finish(df)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Wrote delimited file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;
    use tempfile::TempDir;

    #[test]
    fn test_write_tsv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.tsv");
        let mut df = DataFrame::new(vec![
            Column::new("a".into(), vec![Some("x"), None]),
            Column::new("b_amt".into(), vec![Some(1.5f64), Some(2.0)]),
        ])
        .unwrap();

        write_delimited(&mut df, &path, Delimiter::Auto).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "a\tb_amt");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("x\t1.5"));
    }
}
