//! Remote page session boundary.
//!
//! The pipeline only ever talks to the registries through [`PageSession`]:
//! navigate to a page, read text or attributes behind fixed selectors, and
//! issue a name-keyed search. Each fetch attempt opens its own session via a
//! [`SessionFactory`] and drops it when the attempt ends, success or failure,
//! so sessions never outlive an attempt or get shared between entrants.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that can occur at the remote session boundary
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Malformed selector constant
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// Selector matched nothing on the current page
    #[error("Element not found: {0}")]
    NotFound(String),

    /// Element matched but the requested attribute is absent
    #[error("Attribute '{attr}' missing on {selector}")]
    MissingAttribute { selector: String, attr: String },

    /// Operation exceeded its time budget
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Read attempted before any navigation
    #[error("No page loaded")]
    NoPage,
}

/// A located element: its text content and the first link under it, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementHandle {
    pub text: String,
    pub link: Option<String>,
}

/// One exclusive browsing session against the remote registries.
#[async_trait]
pub trait PageSession: Send {
    /// Load the given page, replacing whatever was loaded before.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Submit a single-field query against a search page and load the result.
    async fn search(&mut self, url: &str, field: &str, value: &str) -> Result<()>;

    /// Text content of the first element matching the selector.
    async fn inner_text(&mut self, selector: &str) -> Result<String>;

    /// Text content of every element matching the selector, in page order.
    async fn inner_texts(&mut self, selector: &str) -> Result<Vec<String>>;

    /// Attribute value of the first element matching the selector.
    async fn attribute(&mut self, selector: &str, attr: &str) -> Result<String>;

    /// Every element matching the selector, with text and first link.
    async fn elements(&mut self, selector: &str) -> Result<Vec<ElementHandle>>;
}

/// Creates a fresh exclusive session per fetch attempt.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    type Session: PageSession;

    async fn open(&self) -> Result<Self::Session>;
}

/// Navigate with a hard time limit.
pub async fn navigate_within(
    session: &mut impl PageSession,
    url: &str,
    limit: Duration,
) -> Result<()> {
    match timeout(limit, session.navigate(url)).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Timeout(format!("navigating to {url}"))),
    }
}

/// Search with a hard time limit.
pub async fn search_within(
    session: &mut impl PageSession,
    url: &str,
    field: &str,
    value: &str,
    limit: Duration,
) -> Result<()> {
    match timeout(limit, session.search(url, field, value)).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Timeout(format!("searching {url}"))),
    }
}

/// First-match text with a hard time limit.
pub async fn text_within(
    session: &mut impl PageSession,
    selector: &str,
    limit: Duration,
) -> Result<String> {
    match timeout(limit, session.inner_text(selector)).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Timeout(format!("waiting for {selector}"))),
    }
}

/// All-match texts with a hard time limit.
pub async fn texts_within(
    session: &mut impl PageSession,
    selector: &str,
    limit: Duration,
) -> Result<Vec<String>> {
    match timeout(limit, session.inner_texts(selector)).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Timeout(format!("waiting for {selector}"))),
    }
}

/// First-match attribute with a hard time limit.
pub async fn attribute_within(
    session: &mut impl PageSession,
    selector: &str,
    attr: &str,
    limit: Duration,
) -> Result<String> {
    match timeout(limit, session.attribute(selector, attr)).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Timeout(format!("waiting for {selector}"))),
    }
}

/// All-match elements with a hard time limit.
pub async fn elements_within(
    session: &mut impl PageSession,
    selector: &str,
    limit: Duration,
) -> Result<Vec<ElementHandle>> {
    match timeout(limit, session.elements(selector)).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Timeout(format!("waiting for {selector}"))),
    }
}

/// HTTP-backed page session.
///
/// Fetches page HTML with a browser user agent and answers selector queries
/// against the most recently loaded document. The document is re-parsed per
/// query so nothing non-`Send` is held across await points.
pub struct HttpPageSession {
    client: Client,
    html: Option<String>,
}

impl HttpPageSession {
    /// Create a new session with its own HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36")
            .build()?;

        Ok(Self { client, html: None })
    }

    fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| ScrapeError::Selector(format!("{selector}: {e}")))
    }

    fn document(&self) -> Result<Html> {
        match &self.html {
            Some(html) => Ok(Html::parse_document(html)),
            None => Err(ScrapeError::NoPage),
        }
    }

    async fn load(&mut self, request: reqwest::RequestBuilder, url: &str) -> Result<()> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        self.html = Some(response.text().await?);
        Ok(())
    }
}

#[async_trait]
impl PageSession for HttpPageSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let request = self.client.get(url);
        self.load(request, url).await
    }

    async fn search(&mut self, url: &str, field: &str, value: &str) -> Result<()> {
        let request = self.client.get(url).query(&[(field, value)]);
        self.load(request, url).await
    }

    async fn inner_text(&mut self, selector: &str) -> Result<String> {
        let parsed = Self::parse_selector(selector)?;
        let document = self.document()?;
        let element = document
            .select(&parsed)
            .next()
            .ok_or_else(|| ScrapeError::NotFound(selector.to_string()))?;
        Ok(element.text().collect::<String>().trim().to_string())
    }

    async fn inner_texts(&mut self, selector: &str) -> Result<Vec<String>> {
        let parsed = Self::parse_selector(selector)?;
        let document = self.document()?;
        Ok(document
            .select(&parsed)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .collect())
    }

    async fn attribute(&mut self, selector: &str, attr: &str) -> Result<String> {
        let parsed = Self::parse_selector(selector)?;
        let document = self.document()?;
        let element = document
            .select(&parsed)
            .next()
            .ok_or_else(|| ScrapeError::NotFound(selector.to_string()))?;
        element
            .value()
            .attr(attr)
            .map(str::to_string)
            .ok_or_else(|| ScrapeError::MissingAttribute {
                selector: selector.to_string(),
                attr: attr.to_string(),
            })
    }

    async fn elements(&mut self, selector: &str) -> Result<Vec<ElementHandle>> {
        let parsed = Self::parse_selector(selector)?;
        let link_selector = Self::parse_selector("a")?;
        let document = self.document()?;
        Ok(document
            .select(&parsed)
            .map(|element| {
                let link = if element.value().name() == "a" {
                    element.value().attr("href").map(str::to_string)
                } else {
                    element
                        .select(&link_selector)
                        .next()
                        .and_then(|a| a.value().attr("href"))
                        .map(str::to_string)
                };
                ElementHandle {
                    text: element.text().collect::<String>().trim().to_string(),
                    link,
                }
            })
            .collect())
    }
}

/// Factory producing [`HttpPageSession`] values, one per fetch attempt.
#[derive(Debug, Clone, Default)]
pub struct HttpSessionFactory;

impl HttpSessionFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionFactory for HttpSessionFactory {
    type Session = HttpPageSession;

    async fn open(&self) -> Result<HttpPageSession> {
        HttpPageSession::new()
    }
}
