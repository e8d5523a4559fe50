// ABOUTME: Extraction of field values from review-table rows.
// ABOUTME: Includes the per-field extractor and the compiled selectors it relies on.

//! Field extraction module.
//!
//! Submodules:
//! - `selectors`: Review-table selectors, compiled once.
//! - `field`: Cell lookup and per-kind value extraction for one row.

pub mod field;
pub mod selectors;
