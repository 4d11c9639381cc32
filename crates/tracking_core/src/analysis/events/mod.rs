//! # Events Module
//!
//! Event extraction from derived series.
//!
//! - `sprint_extractor` - Discrete sprint segments and intensity split

pub mod sprint_extractor;

pub use sprint_extractor::*;
