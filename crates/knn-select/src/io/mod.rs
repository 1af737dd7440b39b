//! Dataset file readers.
pub mod dataset_reader;

pub use dataset_reader::{
    parse_whitespace_rows, read_dataset, read_dataset_with_config, DatasetReaderConfig,
};
