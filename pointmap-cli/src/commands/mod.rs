//! CLI command implementations.

pub mod common;
pub mod config;
pub mod features;
pub mod tap;
