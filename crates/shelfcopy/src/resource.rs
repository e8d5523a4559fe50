// ABOUTME: Page retrieval for the review list: URL construction, blocking HTTP fetch, and charset decoding.
// ABOUTME: Defines the PageSource seam so the exporter can run against HTTP or saved pages.

use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;
use encoding_rs::Encoding;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::error::ExportError;
use crate::options::Options;

/// Supplies the raw markup of listing pages by 1-based page number.
pub trait PageSource {
    fn fetch_page(&self, page: u32) -> Result<String, ExportError>;
}

/// Builds the table-view, print-layout URL of one page of a user's shelf.
pub fn listing_url(
    base_url: &str,
    username: &str,
    shelf: &str,
    page: u32,
) -> Result<Url, ExportError> {
    let mut url =
        Url::parse(base_url).map_err(|e| ExportError::InvalidUrl(format!("{base_url}: {e}")))?;
    if username.is_empty() {
        return Err(ExportError::InvalidUrl("username is empty".to_string()));
    }

    url.path_segments_mut()
        .map_err(|_| ExportError::InvalidUrl(format!("{base_url}: cannot be a base")))?
        .pop_if_empty()
        .extend(["review", "list", username]);
    url.query_pairs_mut()
        .clear()
        .append_pair("page", &page.to_string())
        .append_pair("print", "true")
        .append_pair("shelf", shelf)
        .append_pair("view", "table");
    Ok(url)
}

/// Fetches listing pages over HTTP with a blocking client.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: String,
    username: String,
    shelf: String,
}

impl HttpPageSource {
    pub fn new(username: impl Into<String>, opts: &Options) -> Result<Self, ExportError> {
        let username = username.into();
        // Validate once so a bad base URL fails before any request.
        listing_url(&opts.base_url, &username, &opts.shelf, 1)?;

        let client = match &opts.http_client {
            Some(client) => client.clone(),
            None => Client::builder()
                .timeout(opts.timeout)
                .user_agent(opts.user_agent.clone())
                .build()
                .map_err(ExportError::Client)?,
        };

        Ok(Self {
            client,
            base_url: opts.base_url.clone(),
            username,
            shelf: opts.shelf.clone(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, page: u32) -> Result<String, ExportError> {
        let url = listing_url(&self.base_url, &self.username, &self.shelf, page)?;
        debug!(page, url = %url, "fetching listing page");

        let fetch_err = |source: reqwest::Error| ExportError::Fetch {
            page,
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Status {
                page,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let declared = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(declared_encoding);
        let body = response.bytes().map_err(fetch_err)?;
        Ok(decode_page(&body, declared))
    }
}

/// Serves saved listing pages from disk, page `n` being the `n`th path.
#[derive(Debug, Clone)]
pub struct FilePageSource {
    paths: Vec<PathBuf>,
}

impl FilePageSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn page_count(&self) -> u32 {
        u32::try_from(self.paths.len()).unwrap_or(u32::MAX)
    }
}

impl PageSource for FilePageSource {
    fn fetch_page(&self, page: u32) -> Result<String, ExportError> {
        let path = page
            .checked_sub(1)
            .and_then(|i| self.paths.get(i as usize))
            .ok_or(ExportError::InvalidPageCount(page.to_string()))?;
        let bytes = fs::read(path)?;
        Ok(decode_page(&bytes, None))
    }
}

/// The encoding named by the `charset` parameter of a `Content-Type` value, if
/// encoding_rs knows the label.
pub fn declared_encoding(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, label)| {
            let label = label.trim().trim_matches(|c: char| c == '"' || c == '\'');
            Encoding::for_label(label.as_bytes())
        })
}

/// Decodes listing page bytes with the declared encoding, or with the one chardetng
/// guesses when the server or the saved file declares none.
pub fn decode_page(bytes: &[u8], declared: Option<&'static Encoding>) -> String {
    let encoding = declared.unwrap_or_else(|| {
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(bytes, true);
        detector.guess(None, true)
    });
    let (text, _, malformed) = encoding.decode(bytes);
    if malformed {
        debug!(encoding = encoding.name(), "page has malformed byte sequences");
    }
    text.into_owned()
}
