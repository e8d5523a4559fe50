// ABOUTME: Page count discovery from the review list's pagination control.
// ABOUTME: Reads the last numbered link of #reviewPagination on the first listing page.

use scraper::Html;

use crate::error::ExportError;
use crate::extractors::field::element_text;
use crate::extractors::selectors::listing;

/// Numbered pagination links, excluding the "next" control.
pub const PAGINATION_LINKS: &str = "#reviewPagination a:not(.next_page)";

/// Returns the number of listing pages, read from the last numbered pagination link.
///
/// Fails with `PaginationNotFound` when page 1 has no pagination links, and with
/// `InvalidPageCount` when the last link is not a positive number.
pub fn locate_last_page(doc: &Html) -> Result<u32, ExportError> {
    let last = doc
        .select(&listing().pagination)
        .last()
        .ok_or(ExportError::PaginationNotFound)?;

    let text = element_text(last);
    match text.parse::<u32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(ExportError::InvalidPageCount(text)),
    }
}
