//! Speedboard - benchmark comparison and regression-tripwire engine
//!
//! This library turns raw timing, memory and JIT-counter samples collected
//! under several interpreter configurations into comparative statistics,
//! regression tripwires and chart-ready geometry, with text, CSV and SVG
//! renderings of the results.

pub mod aggregate;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod error;
pub mod headline;
pub mod layout;
pub mod metadata;
pub mod report;
pub mod resolve;
pub mod store;
pub mod svg_output;
pub mod tripwire;

pub use error::{CompareError, Result};
