// ABOUTME: Library entry point for shelfcopy, the Goodreads review-table exporter.
// ABOUTME: Re-exports the public API: Exporter, ExporterBuilder, the field list, the extractor, and the CSV writer.

//! shelfcopy - Export a Goodreads shelf from its paginated review table.
//!
//! The listing is read page by page, each `tr.bookalike.review` row is turned into a
//! [`Record`] through the fixed [`GOODREADS_FIELDS`] list, and the records are written
//! as CSV in the column layout of the official Goodreads export.
//!
//! # Example
//!
//! ```no_run
//! use shelfcopy::{Exporter, ExportError};
//!
//! fn main() -> Result<(), ExportError> {
//!     let exporter = Exporter::builder("12345-alice").build()?;
//!     let today = chrono::Local::now().date_naive();
//!     let path = exporter.export_to_dir(std::path::Path::new("."), today)?;
//!     println!("wrote {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod assemble;
pub mod date_parse;
pub mod error;
pub mod export;
pub mod exporter;
pub mod extractors;
pub mod fields;
pub mod options;
pub mod pagination;
pub mod record;
pub mod resource;

pub use crate::assemble::assemble_page;
pub use crate::date_parse::{parse_listing_date, reformat_date};
pub use crate::error::ExportError;
pub use crate::export::{export_file_name, export_to_dir, write_records};
pub use crate::exporter::Exporter;
pub use crate::extractors::field::extract;
pub use crate::fields::{map_rating, Field, FieldKind, GOODREADS_FIELDS, RATING_LEXICON};
pub use crate::options::{ExporterBuilder, Options};
pub use crate::pagination::locate_last_page;
pub use crate::record::Record;
pub use crate::resource::{FilePageSource, HttpPageSource, PageSource};
