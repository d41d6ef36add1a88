//! A browser session over a fixed HTML document.
//!
//! Used to replay a saved results page without launching Chromium, and as
//! the page double in scraper tests. `scraper::Html` is not `Send`, so
//! elements are addressed by a path of `(selector, index)` steps and the
//! document is re-parsed on every access.

use crate::actions::{BrowserActions, PageElement, SessionFactory};
use crate::error::{BrowserError, Result};
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source document shared by every session opened from it
#[derive(Debug, Clone)]
pub struct StaticPageSource {
    html: Arc<str>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl StaticPageSource {
    pub fn new(html: impl Into<Arc<str>>) -> Self {
        Self {
            html: html.into(),
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::new(html))
    }

    /// Number of sessions opened so far
    pub fn opened_sessions(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of sessions closed so far
    pub fn closed_sessions(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SessionFactory for StaticPageSource {
    type Session = StaticPage;

    async fn open(&self) -> Result<StaticPage> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(StaticPage {
            html: Arc::clone(&self.html),
            closed: Arc::clone(&self.closed),
        })
    }
}

/// One session over a [`StaticPageSource`]
pub struct StaticPage {
    html: Arc<str>,
    closed: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl BrowserActions for StaticPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("Static page ignores navigation to {url}");
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        // The document never changes, so absent now means absent at the deadline
        let parsed = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        if document.root_element().select(&parsed).next().is_some() {
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!(
                "{selector} not present after {timeout:?}"
            )))
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>> {
        let parsed = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        let count = document.root_element().select(&parsed).count();

        Ok((0..count)
            .map(|index| {
                Box::new(StaticElement {
                    html: Arc::clone(&self.html),
                    path: vec![(selector.to_string(), index)],
                }) as Box<dyn PageElement>
            })
            .collect())
    }

    async fn close(&self) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Element of a [`StaticPage`]
#[derive(Debug, Clone)]
pub struct StaticElement {
    html: Arc<str>,
    path: Vec<(String, usize)>,
}

impl StaticElement {
    fn with_element<T>(&self, f: impl FnOnce(ElementRef<'_>) -> T) -> Result<T> {
        let document = Html::parse_document(&self.html);
        let mut current = document.root_element();
        for (selector, index) in &self.path {
            let parsed = parse_selector(selector)?;
            current = current
                .select(&parsed)
                .nth(*index)
                .ok_or_else(|| BrowserError::SelectorNotFound(selector.clone()))?;
        }
        Ok(f(current))
    }
}

#[async_trait::async_trait]
impl PageElement for StaticElement {
    async fn find(&self, selector: &str) -> Result<Box<dyn PageElement>> {
        let parsed = parse_selector(selector)?;
        let present = self.with_element(|el| el.select(&parsed).next().is_some())?;
        if !present {
            return Err(BrowserError::SelectorNotFound(selector.to_string()));
        }

        let mut path = self.path.clone();
        path.push((selector.to_string(), 0));
        Ok(Box::new(StaticElement {
            html: Arc::clone(&self.html),
            path,
        }))
    }

    async fn text(&self) -> Result<String> {
        self.with_element(|el| el.text().collect::<String>())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.with_element(|el| el.value().attr(name).map(str::to_string))
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| BrowserError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
