use crate::actions::{BrowserActions, PageElement, SessionFactory};
use crate::error::{BrowserError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures_util::stream::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// How often `wait_for_selector` re-queries the DOM.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launch options for a Chromium session
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub headless: bool,
    pub user_agent: Option<String>,
}

/// Browser automation engine backed by a Chromium process
pub struct BrowserEngine {
    browser: Mutex<Option<Browser>>,
    page: Page,
    handler: JoinHandle<()>,
}

impl BrowserEngine {
    /// Launch Chromium and open a blank tab
    pub async fn launch(options: &EngineOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder().no_sandbox();
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.arg(format!("--user-agent={user_agent}"));
        }
        let config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Drive the CDP connection until the browser goes away
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(BrowserError::ChromiumError(e.to_string()));
            }
        };

        tracing::debug!(headless = options.headless, "Chromium session started");

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            page,
            handler,
        })
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let poll = async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, poll).await.map_err(|_| {
            BrowserError::Timeout(format!("{selector} not present after {timeout:?}"))
        })
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        Ok(elements
            .into_iter()
            .map(|element| Box::new(ChromiumElement(element)) as Box<dyn PageElement>)
            .collect())
    }

    async fn close(&self) -> Result<()> {
        let Some(mut browser) = self.browser.lock().await.take() else {
            return Ok(());
        };

        let closed = browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()));
        let exited = if closed.is_ok() {
            browser.wait().await.map(|_| ())
        } else {
            Ok(())
        };
        self.handler.abort();

        tracing::debug!("Chromium session closed");
        closed?;
        exited?;
        Ok(())
    }
}

struct ChromiumElement(Element);

#[async_trait::async_trait]
impl PageElement for ChromiumElement {
    async fn find(&self, selector: &str) -> Result<Box<dyn PageElement>> {
        let element = self
            .0
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        Ok(Box::new(ChromiumElement(element)))
    }

    async fn text(&self) -> Result<String> {
        let text = self
            .0
            .inner_text()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.0
            .attribute(name)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }
}

/// Launches one Chromium process per session
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    options: EngineOptions,
}

impl ChromiumLauncher {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }
}

#[async_trait::async_trait]
impl SessionFactory for ChromiumLauncher {
    type Session = BrowserEngine;

    async fn open(&self) -> Result<BrowserEngine> {
        BrowserEngine::launch(&self.options).await
    }
}
