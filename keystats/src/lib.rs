//! Evaluation toolkit for hot-key detection algorithms.
//!
//! Loads the key-statistics CSV files a workload measurement run leaves
//! behind, scores each detection algorithm's hot-key set against the
//! groundtruth and renders the comparison charts.

pub mod analysis;
pub mod config;
pub mod data_handling;
pub mod helper_functions;
pub mod models;
