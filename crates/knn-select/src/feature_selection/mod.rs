//! Feature selection utilities.
//!
//! This module contains the `FeatureSubset` set type and the greedy wrapper
//! searches (forward selection, backward elimination) that score subsets by
//! leave-one-out nearest-neighbor accuracy.
pub mod subset;
pub mod wrapper_selection;
