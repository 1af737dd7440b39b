//! knn-select: greedy wrapper feature selection for nearest-neighbor classifiers.
//!
//! This crate scores feature subsets by leave-one-out cross-validated accuracy
//! of a 1-nearest-neighbor classifier and searches the subset space greedily,
//! either growing the subset (forward selection) or shrinking it (backward
//! elimination). Dataset readers and a serializable search configuration are
//! provided for the command-line front end.
//!
//! The evaluator and search are single-threaded and deterministic unless the
//! `parallel` option is switched on, which only changes how a level's
//! candidates are scheduled, never the order they are reported in.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod evaluation;
pub mod feature_selection;
pub mod io;
pub mod math;
pub mod models;

pub use config::{SearchConfig, SearchDirection};
pub use data_handling::Dataset;
pub use error::SelectionError;
pub use evaluation::loocv_accuracy;
pub use feature_selection::subset::FeatureSubset;
pub use feature_selection::wrapper_selection::{
    run_backward_search, run_forward_search, GreedySearch, LevelResult, SearchEvent,
    SearchEvents, SearchOutcome,
};
