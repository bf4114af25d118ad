//! In-memory browser over static HTML routes, used by the tests.
//!
//! Each route holds one or more documents; successive loads of the same URL
//! step through them and then stay on the last one, which is how captcha
//! pages that clear after a few reloads are scripted. Clicking an element
//! with a `data-href` attribute navigates the page to that URL.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    path::Path,
    rc::Rc,
};

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{
    configuration::{Settings, SiteSelectors},
    error::ScrapeError,
};

use super::browser::{Browser, Element, Page, Rect};

pub const SITE: &str = "https://findadentist.test/";
pub const RESULTS: &str = "https://findadentist.test/search-results";

#[derive(Default)]
struct FixtureSite {
    routes: RefCell<HashMap<String, Vec<String>>>,
    loads: RefCell<HashMap<String, usize>>,
    events: RefCell<Vec<String>>,
    open_pages: Cell<usize>,
}

impl FixtureSite {
    fn log(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

fn normalize(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("bad selector `{css}`: {e:?}"))
}

#[derive(Clone, Default)]
pub struct FixtureBrowser {
    site: Rc<FixtureSite>,
}

impl FixtureBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: &str, html: impl Into<String>) -> &Self {
        self.route_sequence(url, vec![html.into()])
    }

    pub fn route_sequence(&self, url: &str, documents: Vec<String>) -> &Self {
        self.site
            .routes
            .borrow_mut()
            .insert(normalize(url), documents);
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.site.events.borrow().clone()
    }

    pub fn loads(&self, url: &str) -> usize {
        self.site
            .loads
            .borrow()
            .get(&normalize(url))
            .copied()
            .unwrap_or(0)
    }

    pub fn open_pages(&self) -> usize {
        self.site.open_pages.get()
    }
}

impl Browser for FixtureBrowser {
    type Page = FixturePage;

    async fn new_page(&self) -> Result<FixturePage, ScrapeError> {
        self.site.open_pages.set(self.site.open_pages.get() + 1);
        Ok(FixturePage {
            state: Rc::new(PageState {
                site: self.site.clone(),
                current: RefCell::new(None),
            }),
        })
    }
}

struct PageState {
    site: Rc<FixtureSite>,
    current: RefCell<Option<(String, String)>>,
}

impl PageState {
    fn load(&self, url: &str) -> Result<(), ScrapeError> {
        let url = normalize(url);
        let routes = self.site.routes.borrow();
        let documents = routes.get(&url).ok_or_else(|| ScrapeError::Navigation {
            url: url.clone(),
            reason: "no such route".to_string(),
        })?;

        let mut loads = self.site.loads.borrow_mut();
        let count = loads.entry(url.clone()).or_insert(0);
        let html = documents[(*count).min(documents.len() - 1)].clone();
        *count += 1;

        *self.current.borrow_mut() = Some((url, html));
        Ok(())
    }

    fn current(&self) -> Result<(String, String), ScrapeError> {
        self.current
            .borrow()
            .clone()
            .ok_or_else(|| ScrapeError::Navigation {
                url: "about:blank".to_string(),
                reason: "nothing loaded".to_string(),
            })
    }
}

pub struct FixturePage {
    state: Rc<PageState>,
}

impl Page for FixturePage {
    type Element = FixtureElement;

    async fn goto(&self, url: &str) -> Result<(), ScrapeError> {
        self.state.site.log(format!("goto {}", normalize(url)));
        self.state.load(url)
    }

    async fn reload(&self) -> Result<(), ScrapeError> {
        let (url, _) = self.state.current()?;
        self.state.site.log(format!("reload {url}"));
        self.state.load(&url)
    }

    async fn current_url(&self) -> Result<Url, ScrapeError> {
        let (url, _) = self.state.current()?;
        Url::parse(&url).map_err(|e| ScrapeError::Navigation {
            url,
            reason: e.to_string(),
        })
    }

    async fn find(&self, css: &str) -> Result<Option<FixtureElement>, ScrapeError> {
        Ok(self.find_all(css).await?.into_iter().next())
    }

    async fn find_all(&self, css: &str) -> Result<Vec<FixtureElement>, ScrapeError> {
        let (_, html) = self.state.current()?;
        let document = Html::parse_document(&html);
        Ok(document
            .select(&selector(css))
            .map(|e| FixtureElement::capture(e, &self.state))
            .collect())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), ScrapeError> {
        let (url, html) = self.state.current()?;
        std::fs::write(path, html).map_err(|source| ScrapeError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        self.state.site.log(format!("screenshot {url}"));
        Ok(())
    }

    async fn close(&self) -> Result<(), ScrapeError> {
        let site = &self.state.site;
        site.open_pages.set(site.open_pages.get() - 1);
        Ok(())
    }
}

pub struct FixtureElement {
    outer_html: String,
    text: String,
    attrs: HashMap<String, String>,
    page: Rc<PageState>,
}

impl FixtureElement {
    fn capture(element: ElementRef<'_>, page: &Rc<PageState>) -> Self {
        FixtureElement {
            outer_html: element.html(),
            text: element.text().collect(),
            attrs: element
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            page: page.clone(),
        }
    }

    fn label(&self) -> String {
        ["id", "for", "title"]
            .iter()
            .find_map(|attr| self.attrs.get(*attr).cloned())
            .unwrap_or_else(|| self.text.trim().to_string())
    }

    fn follow(&self) -> Result<(), ScrapeError> {
        match self.attrs.get("data-href") {
            Some(url) => self.page.load(url),
            None => Ok(()),
        }
    }
}

impl Element for FixtureElement {
    async fn find(&self, css: &str) -> Result<Option<Self>, ScrapeError> {
        Ok(self.find_all(css).await?.into_iter().next())
    }

    async fn find_all(&self, css: &str) -> Result<Vec<Self>, ScrapeError> {
        let fragment = Html::parse_fragment(&self.outer_html);
        Ok(fragment
            .select(&selector(css))
            .map(|e| FixtureElement::capture(e, &self.page))
            .collect())
    }

    async fn text(&self) -> Result<String, ScrapeError> {
        Ok(self.text.clone())
    }

    async fn property(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        Ok(self.attrs.get(name).cloned())
    }

    async fn rect(&self) -> Result<Rect, ScrapeError> {
        let parts: Vec<f64> = self
            .attrs
            .get("data-rect")
            .map(|r| r.split(',').filter_map(|p| p.trim().parse().ok()).collect())
            .unwrap_or_default();

        Ok(match parts.as_slice() {
            [x, y, width, height] => Rect {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            },
            _ => Rect {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 20.0,
            },
        })
    }

    async fn click(&self) -> Result<(), ScrapeError> {
        self.page.site.log(format!("click {}", self.label()));
        self.follow()
    }

    async fn click_with_offset(&self, x: f64, y: f64) -> Result<(), ScrapeError> {
        self.page
            .site
            .log(format!("click {} at {x},{y}", self.label()));
        self.follow()
    }

    async fn type_text(&self, text: &str) -> Result<(), ScrapeError> {
        self.page
            .site
            .log(format!("type {} into {}", text, self.label()));
        Ok(())
    }

    async fn hover(&self) -> Result<(), ScrapeError> {
        self.page.site.log(format!("hover {}", self.label()));
        Ok(())
    }
}

/// Settings pointing at the fixture site with every delay zeroed.
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.scraper.site_url = SITE.to_string();
    settings.scraper.timeout_ms = 0;
    settings.scraper.captcha_delay_ms = 0;
    settings.scraper.listing_wait_ms = 0;
    settings.scraper.poll_interval_ms = 0;
    settings
}

pub fn test_selectors() -> SiteSelectors {
    SiteSelectors::default()
}

pub const CAPTCHA_PAGE: &str = r#"<html><body>
<div class="high-traffic-captcha-container">We are seeing unusually high traffic.</div>
</body></html>"#;

pub fn landing_page(specialties: &[&str]) -> String {
    let options: String = specialties
        .iter()
        .map(|s| format!(r#"<li class="specialty-filter__option">{s}</li>"#))
        .collect();

    format!(
        r#"<html><body>
<div class="specialty-filter">
  <button class="specialty-filter__toggle" id="specialty-toggle">Specialty</button>
  <ul>{options}</ul>
</div>
<form>
  <input title="Address or ZIP Code" id="zip">
  <input type="checkbox" id="terms" hidden>
  <label for="terms" data-rect="10,200,250,20">I accept the <a href="/terms">Terms of Use</a></label>
  <button type="submit" id="search" data-href="{RESULTS}">Search</button>
</form>
</body></html>"#
    )
}

/// Landing page whose form has no terms label.
pub fn landing_page_without_terms() -> String {
    format!(
        r#"<html><body>
<form>
  <input title="Address or ZIP Code" id="zip">
  <button type="submit" id="search" data-href="{RESULTS}">Search</button>
</form>
</body></html>"#
    )
}

pub fn results_page(links: &[&str]) -> String {
    let items: String = links
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(
                r#"<li class="dentist-list__item"><h2><a href="{href}">Practice {i}</a></h2><a href="tel:555-010{i}">555-010{i}</a></li>"#
            )
        })
        .collect();

    format!(r#"<html><body><ul class="dentist-list">{items}</ul></body></html>"#)
}

pub fn detail_page(name: &str, lists: &[(&str, &[(&str, &str)])]) -> String {
    let lists: String = lists
        .iter()
        .map(|(class, pairs)| {
            let body: String = pairs
                .iter()
                .map(|(dt, dd)| format!("<dt>{dt}</dt><dd>{dd}</dd>"))
                .collect();
            format!(r#"<dl class="{class}">{body}</dl>"#)
        })
        .collect();

    format!(
        r#"<html><body>
<div class="name"><h1>{name}</h1></div>
<div class="dentist-details">{lists}</div>
</body></html>"#
    )
}

pub fn detail_page_without_name() -> String {
    r#"<html><body>
<div class="dentist-details"><dl class="contact"><dt>Phone</dt><dd>555-0199</dd></dl></div>
</body></html>"#
        .to_string()
}
