//! Free-text culture report parsing.
//!
//! - **report**: identification blocks, organism names, per-organism panels
//! - **panel**: whole-report susceptibility panels and resistance lookups

pub mod panel;
pub mod report;

pub use panel::{marker_reported, parse_panel, reports_resistance};
pub use report::{identification_blocks, parse_report};
