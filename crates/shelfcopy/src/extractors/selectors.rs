// ABOUTME: CSS selectors for the review table, compiled once for the whole process.
// ABOUTME: Covers rows, pagination, value containers, and the cell of every Goodreads field.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::Selector;

use crate::assemble::ROW_SELECTOR;
use crate::error::ExportError;
use crate::fields::{FieldKind, GOODREADS_FIELDS};
use crate::pagination::PAGINATION_LINKS;

static LISTING: Lazy<ListingSelectors> = Lazy::new(ListingSelectors::compile);

/// The compiled selectors of the review table.
pub fn listing() -> &'static ListingSelectors {
    &LISTING
}

/// Compiles `css`, reporting invalid input as [`ExportError::Selector`].
pub fn compile(css: &str) -> Result<Selector, ExportError> {
    Selector::parse(css).map_err(|_| ExportError::Selector(css.to_string()))
}

/// Selectors used by the locator, the assembler, and the field extractor.
///
/// Cell and value-span selectors of [`GOODREADS_FIELDS`] are compiled up front;
/// other field ids are compiled when asked for.
#[derive(Debug)]
pub struct ListingSelectors {
    pub row: Selector,
    pub pagination: Selector,
    pub container: Selector,
    pub link: Selector,
    pub span: Selector,
    by_field: HashMap<String, Selector>,
}

impl ListingSelectors {
    fn compile() -> Self {
        let by_field = GOODREADS_FIELDS
            .iter()
            .flat_map(|field| {
                let value_span = match field.kind {
                    FieldKind::Date {
                        value_class: Some(class),
                    } => Some(span_css(class)),
                    _ => None,
                };
                std::iter::once(cell_css(field.id)).chain(value_span)
            })
            .filter_map(|css| Selector::parse(&css).ok().map(|sel| (css, sel)))
            .collect();

        Self {
            row: Selector::parse(ROW_SELECTOR).unwrap(),
            pagination: Selector::parse(PAGINATION_LINKS).unwrap(),
            container: Selector::parse("div").unwrap(),
            link: Selector::parse("a").unwrap(),
            span: Selector::parse("span").unwrap(),
            by_field,
        }
    }

    /// The `td.field.<id>` cell selector of a field.
    pub fn cell(&self, id: &str) -> Result<Cow<'_, Selector>, ExportError> {
        self.by_field_or_compile(cell_css(id))
    }

    /// The `span.<class>` selector holding a date inside its container.
    pub fn value_span(&self, class: &str) -> Result<Cow<'_, Selector>, ExportError> {
        self.by_field_or_compile(span_css(class))
    }

    fn by_field_or_compile(&self, css: String) -> Result<Cow<'_, Selector>, ExportError> {
        match self.by_field.get(&css) {
            Some(sel) => Ok(Cow::Borrowed(sel)),
            None => compile(&css).map(Cow::Owned),
        }
    }
}

fn cell_css(id: &str) -> String {
    format!("td.field.{id}")
}

fn span_css(class: &str) -> String {
    format!("span.{class}")
}
