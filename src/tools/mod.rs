//! The tools module provides helpers around the codec.
//!
//! The tools are:
//! - cli: Command line interface for hufvault.
//! - freq_count: Frequency count of the input and the serialized frequency table.
//! - report: Size and timing summary printed after each file.
//!
pub mod cli;
pub mod freq_count;
pub mod report;
