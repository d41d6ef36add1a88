use crate::error::Result;
use std::time::Duration;

/// Browser actions for automation
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait until `selector` matches, failing with `BrowserError::Timeout`
    /// once `timeout` has elapsed
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// All elements matching `selector`, in document order
    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>>;

    /// Release the session. Safe to call more than once.
    async fn close(&self) -> Result<()>;
}

/// An element handle on the current page
#[async_trait::async_trait]
pub trait PageElement: Send + Sync {
    /// First descendant matching `selector`, or `BrowserError::SelectorNotFound`
    async fn find(&self, selector: &str) -> Result<Box<dyn PageElement>>;

    /// Rendered text content
    async fn text(&self) -> Result<String>;

    /// Attribute value, `None` when the attribute is absent
    async fn attribute(&self, name: &str) -> Result<Option<String>>;
}

/// Opens a fresh browser session per scrape
#[async_trait::async_trait]
pub trait SessionFactory: Send + Sync {
    type Session: BrowserActions;

    async fn open(&self) -> Result<Self::Session>;
}
