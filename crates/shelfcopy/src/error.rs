// ABOUTME: Error types for listing export operations.
// ABOUTME: Provides ExportError with pagination, field, fetch, and write variants plus page/row context wrappers.

use std::io;

use thiserror::Error;

/// Errors that can occur while locating, extracting, or exporting a listing.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Page 1 carries no pagination links.
    #[error("pagination links not found")]
    PaginationNotFound,

    /// The last pagination link is not a positive page number.
    #[error("invalid page count {0:?}")]
    InvalidPageCount(String),

    /// A declared field has no cell, value container, or required inner element.
    #[error("field `{field}` is missing its {part}")]
    FieldMissing { field: String, part: &'static str },

    /// A date-like value could not be parsed.
    #[error("unparseable date {0:?}")]
    DateParse(String),

    /// The listing URL could not be built.
    #[error("invalid listing URL: {0}")]
    InvalidUrl(String),

    /// The request for a page failed before a response arrived.
    #[error("failed to fetch page {page} from {url}")]
    Fetch {
        page: u32,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The server answered a page request with a non-success status.
    #[error("page {page} from {url} returned HTTP {status}")]
    Status { page: u32, url: String, status: u16 },

    /// A CSS selector failed to compile.
    #[error("invalid selector {0:?}")]
    Selector(String),

    /// Extraction failed on a specific row of a page (1-based).
    #[error("row {row}")]
    Row {
        row: usize,
        #[source]
        source: Box<ExportError>,
    },

    /// Extraction failed on a specific page (1-based).
    #[error("page {page}")]
    Page {
        page: u32,
        #[source]
        source: Box<ExportError>,
    },

    #[error("failed to write export")]
    Io(#[from] io::Error),

    #[error("failed to write CSV")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    /// Creates a FieldMissing error for the given field id.
    pub fn field_missing(field: impl Into<String>, part: &'static str) -> Self {
        ExportError::FieldMissing {
            field: field.into(),
            part,
        }
    }

    /// Wraps this error with the 1-based row it occurred on.
    pub fn in_row(self, row: usize) -> Self {
        ExportError::Row {
            row,
            source: Box::new(self),
        }
    }

    /// Wraps this error with the 1-based page it occurred on.
    pub fn in_page(self, page: u32) -> Self {
        ExportError::Page {
            page,
            source: Box::new(self),
        }
    }

    /// Returns true if page 1 had no pagination links.
    pub fn is_pagination_not_found(&self) -> bool {
        matches!(self, ExportError::PaginationNotFound)
    }

    /// Returns true if this is a fetch or HTTP status failure, looking through context wrappers.
    pub fn is_fetch(&self) -> bool {
        match self {
            ExportError::Fetch { .. } | ExportError::Status { .. } => true,
            ExportError::Row { source, .. } | ExportError::Page { source, .. } => source.is_fetch(),
            _ => false,
        }
    }

    /// Returns true if a declared field was structurally absent, looking through context wrappers.
    pub fn is_field_missing(&self) -> bool {
        match self {
            ExportError::FieldMissing { .. } => true,
            ExportError::Row { source, .. } | ExportError::Page { source, .. } => {
                source.is_field_missing()
            }
            _ => false,
        }
    }
}
