// ABOUTME: Record assembly for one listing page.
// ABOUTME: Runs the field extractor over every review row in document order.

use scraper::Html;

use crate::error::ExportError;
use crate::extractors::field::extract;
use crate::extractors::selectors::listing;
use crate::fields::Field;
use crate::record::Record;

/// Rows holding one book entry each.
pub const ROW_SELECTOR: &str = "tr.bookalike.review";

/// Builds one record per review row of `doc`, keeping the rows' document order.
///
/// A page without rows yields an empty vector. A structurally missing field fails
/// the whole page, with the 1-based row number attached.
pub fn assemble_page(doc: &Html, fields: &[Field]) -> Result<Vec<Record>, ExportError> {
    doc.select(&listing().row)
        .enumerate()
        .map(|(i, row)| {
            fields
                .iter()
                .map(|field| extract(row, field).map(|value| (field.name, value)))
                .collect::<Result<Record, ExportError>>()
                .map_err(|e| e.in_row(i + 1))
        })
        .collect()
}
