//! The slice of browser automation the scraper needs. `Droid` drives a real
//! WebDriver session through it; tests use an in-memory HTML fixture.
#![allow(async_fn_in_trait)]

use std::path::Path;

use url::Url;

use crate::error::ScrapeError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub trait Browser {
    type Page: Page;

    /// Opens a fresh page context. Callers close it when done.
    async fn new_page(&self) -> Result<Self::Page, ScrapeError>;
}

pub trait Page {
    type Element: Element;

    /// Navigates and waits for the document to load.
    async fn goto(&self, url: &str) -> Result<(), ScrapeError>;
    async fn reload(&self) -> Result<(), ScrapeError>;
    async fn current_url(&self) -> Result<Url, ScrapeError>;
    async fn find(&self, selector: &str) -> Result<Option<Self::Element>, ScrapeError>;
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, ScrapeError>;
    async fn screenshot(&self, path: &Path) -> Result<(), ScrapeError>;
    async fn close(&self) -> Result<(), ScrapeError>;
}

pub trait Element: Sized {
    async fn find(&self, selector: &str) -> Result<Option<Self>, ScrapeError>;
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, ScrapeError>;
    async fn text(&self) -> Result<String, ScrapeError>;
    /// DOM property, so `href` comes back resolved where the driver supports it.
    async fn property(&self, name: &str) -> Result<Option<String>, ScrapeError>;
    async fn rect(&self) -> Result<Rect, ScrapeError>;
    async fn click(&self) -> Result<(), ScrapeError>;
    /// Clicks at an offset from the centre of the element.
    async fn click_with_offset(&self, x: f64, y: f64) -> Result<(), ScrapeError>;
    async fn type_text(&self, text: &str) -> Result<(), ScrapeError>;
    async fn hover(&self) -> Result<(), ScrapeError>;
}
