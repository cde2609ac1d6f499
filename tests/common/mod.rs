//! Common test utilities module
//!
//! Provides shared utilities for tests including:
//! - Temporary CSV files with automatic cleanup
//! - Daily datasets built from plain values

#![allow(dead_code, unused_imports)]

pub mod test_utils;

pub use test_utils::{daily_dataset, daily_timestamps, values, write_temp_csv, write_temp_file};
