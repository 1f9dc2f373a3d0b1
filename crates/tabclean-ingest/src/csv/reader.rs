//! Delimited file reading with every column loaded as text.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::thousands::strip_thousands_in_frame;

/// Maximum file size for loading (500 MB default).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Field separator of a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// Tab for `.tsv`, `.tab` and `.txt` files, comma otherwise.
    #[default]
    Auto,
    Comma,
    Tab,
}

impl Delimiter {
    /// The separator byte used for `path`.
    pub fn resolve(self, path: &Path) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Auto => {
                let tabbed = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        ["tsv", "tab", "txt"]
                            .iter()
                            .any(|known| ext.eq_ignore_ascii_case(known))
                    });
                if tabbed { b'\t' } else { b',' }
            }
        }
    }
}

/// Options for [`read_delimited`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    pub delimiter: Delimiter,
    /// Remove thousands separators from grouped numbers after loading.
    pub strip_thousands: bool,
    pub max_file_size: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Auto,
            strip_thousands: false,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reject files that start with a UTF-16 byte order mark.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Fail unless the first line holds a header.
fn ensure_header(path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut first = String::new();
    BufReader::new(file)
        .read_line(&mut first)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    // Skip BOM if present
    let cleaned = first.strip_prefix('\u{feff}').unwrap_or(&first);
    if cleaned.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Validate the frame shape after loading.
///
/// Blank column names are rejected; a header-only file is accepted and logged.
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        tracing::warn!(path = %path.display(), "File has a header but no data rows");
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Read a CSV or TSV file into a DataFrame of string columns.
///
/// No schema inference is done: every value reaches the normalizer as the
/// text that was in the file, and empty fields become nulls.
pub fn read_delimited(path: &Path, options: &ReadOptions) -> Result<DataFrame> {
    check_file_size_with_limit(path, options.max_file_size)?;
    validate_encoding(path)?;
    ensure_header(path)?;

    let separator = options.delimiter.resolve(path);
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|parse| parse.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_dataframe_shape(&df, path)?;

    let df = if options.strip_thousands {
        strip_thousands_in_frame(&df)?
    } else {
        df
    };

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Loaded delimited file"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_delimiter_auto() {
        assert_eq!(Delimiter::Auto.resolve(Path::new("a.TSV")), b'\t');
        assert_eq!(Delimiter::Auto.resolve(Path::new("a.txt")), b'\t');
        assert_eq!(Delimiter::Auto.resolve(Path::new("a.csv")), b',');
        assert_eq!(Delimiter::Auto.resolve(Path::new("noext")), b',');
        assert_eq!(Delimiter::Comma.resolve(Path::new("a.tsv")), b',');
    }

    #[test]
    fn test_read_csv_as_strings() {
        let file = create_temp_file("col_no1,col_ym1\n1,202501\n2,2025-03-02\n", ".csv");
        let df = read_delimited(file.path(), &ReadOptions::default()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &polars::prelude::DataType::String);
        }
    }

    #[test]
    fn test_read_tsv() {
        let file = create_temp_file("a\tb\n1,234\tx\n", ".tsv");
        let df = read_delimited(file.path(), &ReadOptions::default()).unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(
            df.column("a").unwrap().str().unwrap().get(0),
            Some("1,234")
        );
    }

    #[test]
    fn test_strip_thousands_option() {
        let file = create_temp_file("a\tb\n1,234\tx\n", ".tsv");
        let options = ReadOptions {
            strip_thousands: true,
            ..ReadOptions::default()
        };
        let df = read_delimited(file.path(), &options).unwrap();
        assert_eq!(df.column("a").unwrap().str().unwrap().get(0), Some("1234"));
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_file("", ".csv");
        let result = read_delimited(file.path(), &ReadOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = read_delimited(Path::new("/nonexistent/input.csv"), &ReadOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_size_limit() {
        let file = create_temp_file("a\n1\n", ".csv");
        let options = ReadOptions {
            max_file_size: 2,
            ..ReadOptions::default()
        };
        let result = read_delimited(file.path(), &options);
        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(&[0xFF, 0xFE, b'a', 0]).unwrap();
        let result = read_delimited(file.path(), &ReadOptions::default());
        assert!(matches!(result, Err(IngestError::UnsupportedEncoding { .. })));
    }
}
