// Library for the binaries and tests

pub mod aggregation;
pub mod chart;
pub mod config;
pub mod git_sync;
pub mod log_parser;
pub mod log_writer;
pub mod logging;
pub mod models;
pub mod paths;
pub mod probe;
pub mod sink;
pub mod timestamp;
pub mod wifi;
