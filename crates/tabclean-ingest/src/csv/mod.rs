//! Delimited file reading and writing.

mod reader;
mod writer;

pub use reader::{
    Delimiter, MAX_FILE_SIZE, ReadOptions, check_file_size_with_limit, read_delimited,
    validate_dataframe_shape, validate_encoding,
};
pub use writer::write_delimited;
