//! Browser automation for JavaScript-rendered search pages.
//!
//! The scraper only talks to the [`BrowserActions`] / [`PageElement`] traits.
//! Two implementations are provided: [`BrowserEngine`] drives a real
//! Chromium over CDP, [`StaticPage`] serves a fixed HTML document.

pub mod actions;
pub mod engine;
pub mod error;
pub mod static_page;

pub use actions::{BrowserActions, PageElement, SessionFactory};
pub use engine::{BrowserEngine, ChromiumLauncher, EngineOptions};
pub use error::{BrowserError, Result};
pub use static_page::{StaticElement, StaticPage, StaticPageSource};
