use std::path::PathBuf;

use url::Url;

use crate::{
    configuration::{Settings, SiteSelectors},
    domain::{
        crawl_result::CrawlResult, dentist::DentistRecord, search_request::SearchRequest,
    },
    error::ScrapeError,
};

use super::{
    browser::{Browser, Element, Page},
    detail_scraper::scrape_dentist_detail,
    navigator::Navigator,
};

/// Drives one postal code search end to end: filter, submit, collect the
/// listing links, then scrape every listing in turn.
pub struct ListingScraper<'a, B: Browser> {
    browser: &'a B,
    navigator: Navigator,
    selectors: SiteSelectors,
    site_url: String,
    screenshot_dir: Option<PathBuf>,
}

impl<'a, B: Browser> ListingScraper<'a, B> {
    pub fn new(browser: &'a B, settings: &Settings) -> Self {
        ListingScraper {
            browser,
            navigator: Navigator::new(
                settings.scraper.throttle_policy(),
                settings.selectors.captcha_marker.clone(),
            ),
            selectors: settings.selectors.clone(),
            site_url: settings.scraper.site_url.clone(),
            screenshot_dir: settings.scraper.screenshot_dir.clone(),
        }
    }

    pub async fn scrape(&self, request: &SearchRequest) -> Result<CrawlResult, ScrapeError> {
        let page = self.browser.new_page().await?;
        let result = self.scrape_search(&page, request).await;

        if let Err(e) = page.close().await {
            log::warn!("Could not close page for {}: {}", request.postal_code, e);
        }

        result
    }

    async fn scrape_search(
        &self,
        page: &B::Page,
        request: &SearchRequest,
    ) -> Result<CrawlResult, ScrapeError> {
        self.navigator.goto(page, &self.site_url).await?;

        if !self.apply_specialty_filter(page, &request.specialty).await {
            log::info!("Searching {} without a specialty filter", request.postal_code);
        }
        self.enter_zip_code(page, &request.postal_code).await?;

        self.navigator.settle(page).await?;
        self.navigator
            .wait_for(page, &self.selectors.listing_ready)
            .await?;
        log::info!("Dentist list loaded for {}", request.postal_code);

        if let Some(dir) = &self.screenshot_dir {
            let path = dir.join(format!("{}.png", request.postal_code));
            if let Err(e) = page.screenshot(&path).await {
                log::warn!("Could not save screenshot to {}: {}", path.display(), e);
            }
        }

        let links = self.collect_listing_links(page).await?;
        log::info!(
            "Found {} listings for {}",
            links.len(),
            request.postal_code
        );

        let mut result = CrawlResult::new(request.clone(), links.len());
        for link in links {
            match self.scrape_listing(&link).await {
                Ok(record) => result.push_record(record),
                Err(e) => {
                    log::error!("Could not crawl a page {}: {}", link, e);
                    result.push_failure(link, e);
                }
            }
        }

        Ok(result)
    }

    /// Picks the specialty from the filter dropdown. Returns whether the
    /// filter took; any failure is logged and the search goes ahead
    /// unfiltered.
    async fn apply_specialty_filter(&self, page: &B::Page, specialty: &str) -> bool {
        match self.select_specialty(page, specialty).await {
            Ok(filtered) => filtered,
            Err(e) => {
                log::warn!("Specialty filter \"{}\" failed: {}", specialty.trim(), e);
                false
            }
        }
    }

    async fn select_specialty(
        &self,
        page: &B::Page,
        specialty: &str,
    ) -> Result<bool, ScrapeError> {
        let specialty = specialty.trim();
        if specialty.is_empty() {
            return Ok(false);
        }

        let Some(toggle) = page.find(&self.selectors.specialty_toggle).await? else {
            log::warn!("No specialty filter on page, searching without \"{}\"", specialty);
            return Ok(false);
        };
        toggle.click().await?;

        for option in page.find_all(&self.selectors.specialty_option).await? {
            if option.text().await?.trim().eq_ignore_ascii_case(specialty) {
                option.click().await?;
                log::info!("Filtering by specialty \"{}\"", specialty);
                return Ok(true);
            }
        }

        log::warn!("Could not find specialty \"{}\", searching without it", specialty);
        Ok(false)
    }

    /// Types the zip code, accepts the terms and submits the search form.
    async fn enter_zip_code(&self, page: &B::Page, zip_code: &str) -> Result<(), ScrapeError> {
        let zip_input = page
            .find(&self.selectors.zip_input)
            .await?
            .ok_or_else(|| ScrapeError::ElementNotFound("Zip Code Input".to_string()))?;
        let submit_button = page
            .find(&self.selectors.submit_button)
            .await?
            .ok_or_else(|| ScrapeError::ElementNotFound("submit button".to_string()))?;
        // The terms checkbox is hidden and the site rejects scripted clicks
        // on it, so the label gets clicked instead.
        let terms_label = page
            .find(&self.selectors.terms_label)
            .await?
            .ok_or_else(|| ScrapeError::ElementNotFound("accept terms label".to_string()))?;

        zip_input.type_text(zip_code).await?;

        terms_label.hover().await?;
        // A fifth of the way in, clear of the Terms of Use link.
        let rect = terms_label.rect().await?;
        terms_label
            .click_with_offset(rect.width / 5.0 - rect.width / 2.0, 0.0)
            .await?;

        submit_button.click().await
    }

    async fn collect_listing_links(&self, page: &B::Page) -> Result<Vec<Url>, ScrapeError> {
        let base = page.current_url().await?;
        let mut links = vec![];

        for anchor in page.find_all(&self.selectors.listing_link).await? {
            let Some(href) = anchor.property("href").await? else {
                log::warn!("Listing link without href on {}", base);
                continue;
            };

            match resolve_link(&base, &href) {
                Ok(url) => links.push(url),
                Err(e) => log::warn!("{}", e),
            }
        }

        Ok(links)
    }

    async fn scrape_listing(&self, link: &Url) -> Result<DentistRecord, ScrapeError> {
        let page = self.browser.new_page().await?;
        let record = scrape_dentist_detail(&page, link, &self.navigator, &self.selectors).await;

        if let Err(e) = page.close().await {
            log::warn!("Could not close page for {}: {}", link, e);
        }

        record
    }
}

pub fn resolve_link(base: &Url, href: &str) -> Result<Url, ScrapeError> {
    base.join(href.trim()).map_err(|source| ScrapeError::InvalidLink {
        href: href.to_string(),
        source,
    })
}
