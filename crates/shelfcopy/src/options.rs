// ABOUTME: Configuration options for the exporter and the ExporterBuilder fluent API.
// ABOUTME: Covers the listing location (base URL, shelf), HTTP client settings, and the field list.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::ExportError;
use crate::exporter::Exporter;
use crate::fields::{Field, GOODREADS_FIELDS};
use crate::resource::HttpPageSource;

pub const DEFAULT_BASE_URL: &str = "https://www.goodreads.com";
pub const DEFAULT_SHELF: &str = "read";

/// Configuration options for an HTTP-backed exporter.
#[derive(Debug, Clone)]
pub struct Options {
    pub base_url: String,
    pub shelf: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<Client>,
    pub fields: &'static [Field],
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            shelf: DEFAULT_SHELF.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("shelfcopy/", env!("CARGO_PKG_VERSION")).to_string(),
            http_client: None,
            fields: GOODREADS_FIELDS,
        }
    }
}

/// Builder for constructing HTTP-backed Exporter instances.
#[derive(Debug, Clone)]
pub struct ExporterBuilder {
    username: String,
    opts: Options,
}

impl ExporterBuilder {
    /// Create a new ExporterBuilder for `username` with default options.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            opts: Options::default(),
        }
    }

    /// Set the site root the listing URLs are built on.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = base_url.into();
        self
    }

    /// Set the shelf to export.
    pub fn shelf(mut self, shelf: impl Into<String>) -> Self {
        self.opts.shelf = shelf.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client. Timeout and User-Agent settings are then ignored.
    pub fn http_client(mut self, client: Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Set the exported fields.
    pub fn fields(mut self, fields: &'static [Field]) -> Self {
        self.opts.fields = fields;
        self
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Build the Exporter, validating the listing URL and constructing the HTTP client.
    pub fn build(self) -> Result<Exporter<HttpPageSource>, ExportError> {
        let source = HttpPageSource::new(self.username, &self.opts)?;
        Ok(Exporter::new(source, self.opts.fields))
    }
}
