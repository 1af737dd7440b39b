//! Command-line front end for knn-select.
//!
//! Reads a dataset, reports the all-features baseline, runs the selected
//! greedy search and prints its progress transcript.
pub mod search;
pub mod util;
