//! Command-line workflow shared by the binary and its tests

pub mod orchestration;
