// ABOUTME: The Exporter drives a full run: locate the page count, assemble every page, write the CSV.
// ABOUTME: Owns the record accumulator so the extractor and assembler stay stateless.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use scraper::Html;
use tracing::info;

use crate::assemble::assemble_page;
use crate::error::ExportError;
use crate::export::export_to_dir;
use crate::fields::Field;
use crate::options::ExporterBuilder;
use crate::pagination::locate_last_page;
use crate::record::Record;
use crate::resource::{HttpPageSource, PageSource};

/// Exports a paginated review listing served by a [`PageSource`].
///
/// Pages are fetched and assembled one at a time, in increasing order. The first
/// failure ends the run; nothing is written until every page has been assembled.
#[derive(Debug, Clone)]
pub struct Exporter<S = HttpPageSource> {
    source: S,
    fields: &'static [Field],
}

impl Exporter<HttpPageSource> {
    /// Create a builder for exporting `username`'s shelf over HTTP.
    pub fn builder(username: impl Into<String>) -> ExporterBuilder {
        ExporterBuilder::new(username)
    }
}

impl<S: PageSource> Exporter<S> {
    pub fn new(source: S, fields: &'static [Field]) -> Self {
        Self { source, fields }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Collects the records of every listing page, in page then row order.
    ///
    /// The page count comes from page 1's pagination links. A listing without
    /// pagination links is a single page.
    pub fn collect(&self) -> Result<Vec<Record>, ExportError> {
        let first = Html::parse_document(&self.source.fetch_page(1)?);
        let last_page = match locate_last_page(&first) {
            Ok(count) => count,
            Err(e) if e.is_pagination_not_found() => {
                info!("no pagination links, exporting a single page");
                1
            }
            Err(e) => return Err(e.in_page(1)),
        };
        info!(pages = last_page, "listing located");

        let mut records = Vec::new();
        self.collect_page(1, &first, &mut records)?;
        for page in 2..=last_page {
            let doc = Html::parse_document(&self.source.fetch_page(page)?);
            self.collect_page(page, &doc, &mut records)?;
        }
        Ok(records)
    }

    /// Collects the records of pages `1..=count` without consulting pagination.
    pub fn collect_pages(&self, count: u32) -> Result<Vec<Record>, ExportError> {
        let mut records = Vec::new();
        for page in 1..=count {
            let doc = Html::parse_document(&self.source.fetch_page(page)?);
            self.collect_page(page, &doc, &mut records)?;
        }
        Ok(records)
    }

    /// Collects every page and writes the dated export file into `dir`.
    pub fn export_to_dir(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf, ExportError> {
        let records = self.collect()?;
        export_to_dir(dir, &records, self.fields, date)
    }

    fn collect_page(
        &self,
        page: u32,
        doc: &Html,
        records: &mut Vec<Record>,
    ) -> Result<(), ExportError> {
        let page_records = assemble_page(doc, self.fields).map_err(|e| e.in_page(page))?;
        info!(page, rows = page_records.len(), "page assembled");
        records.extend(page_records);
        Ok(())
    }
}
