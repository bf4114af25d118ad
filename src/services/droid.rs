use std::path::Path;

use thirtyfour::{
    By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement, WindowHandle,
};
use url::Url;

use crate::{configuration::BrowserSettings, error::ScrapeError};

use super::browser::{Browser, Element, Page, Rect};

/// A single WebDriver session. Every page is its own window in that session.
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(settings: &BrowserSettings) -> Result<Self, ScrapeError> {
        let mut caps = DesiredCapabilities::chrome();
        if settings.headless {
            caps.set_headless()?;
        }

        let driver = WebDriver::new(settings.webdriver_url.as_str(), caps).await?;
        if settings.maximize_window {
            driver.maximize_window().await?;
        }
        log::info!("Connected to webdriver at {}", settings.webdriver_url);

        Ok(Droid { driver })
    }

    pub async fn quit(self) -> Result<(), ScrapeError> {
        self.driver.quit().await?;
        Ok(())
    }
}

impl Browser for Droid {
    type Page = DroidPage;

    async fn new_page(&self) -> Result<DroidPage, ScrapeError> {
        let window = self.driver.new_window().await?;
        let page = DroidPage {
            driver: self.driver.clone(),
            window,
        };
        page.focus().await?;
        Ok(page)
    }
}

#[derive(Clone)]
pub struct DroidPage {
    driver: WebDriver,
    window: WindowHandle,
}

impl DroidPage {
    async fn focus(&self) -> Result<(), ScrapeError> {
        self.driver.switch_to_window(self.window.clone()).await?;
        Ok(())
    }

    fn wrap(&self, element: WebElement) -> DroidElement {
        DroidElement {
            element,
            page: self.clone(),
        }
    }
}

impl Page for DroidPage {
    type Element = DroidElement;

    async fn goto(&self, url: &str) -> Result<(), ScrapeError> {
        self.focus().await?;
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn reload(&self) -> Result<(), ScrapeError> {
        self.focus().await?;
        self.driver.refresh().await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<Url, ScrapeError> {
        self.focus().await?;
        Ok(self.driver.current_url().await?)
    }

    async fn find(&self, selector: &str) -> Result<Option<DroidElement>, ScrapeError> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<DroidElement>, ScrapeError> {
        self.focus().await?;
        let elements = self.driver.find_all(By::Css(selector.to_string())).await?;
        Ok(elements.into_iter().map(|e| self.wrap(e)).collect())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), ScrapeError> {
        self.focus().await?;
        self.driver.screenshot(path).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), ScrapeError> {
        self.focus().await?;
        self.driver.close_window().await?;
        Ok(())
    }
}

pub struct DroidElement {
    element: WebElement,
    page: DroidPage,
}

impl Element for DroidElement {
    async fn find(&self, selector: &str) -> Result<Option<Self>, ScrapeError> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, ScrapeError> {
        self.page.focus().await?;
        let elements = self.element.find_all(By::Css(selector.to_string())).await?;
        Ok(elements.into_iter().map(|e| self.page.wrap(e)).collect())
    }

    async fn text(&self) -> Result<String, ScrapeError> {
        self.page.focus().await?;
        // textContent, so values in collapsed sections are still read.
        Ok(self.element.prop("textContent").await?.unwrap_or_default())
    }

    async fn property(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        self.page.focus().await?;
        Ok(self.element.prop(name).await?)
    }

    async fn rect(&self) -> Result<Rect, ScrapeError> {
        self.page.focus().await?;
        let rect = self.element.rect().await?;
        Ok(Rect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        })
    }

    async fn click(&self) -> Result<(), ScrapeError> {
        self.page.focus().await?;
        self.element.click().await?;
        Ok(())
    }

    async fn click_with_offset(&self, x: f64, y: f64) -> Result<(), ScrapeError> {
        self.page.focus().await?;
        self.page
            .driver
            .action_chain()
            .move_to_element_with_offset(&self.element, x.round() as i64, y.round() as i64)
            .click()
            .perform()
            .await?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), ScrapeError> {
        self.page.focus().await?;
        self.element.send_keys(text).await?;
        Ok(())
    }

    async fn hover(&self) -> Result<(), ScrapeError> {
        self.page.focus().await?;
        self.element.scroll_into_view().await?;
        self.page
            .driver
            .action_chain()
            .move_to_element_center(&self.element)
            .perform()
            .await?;
        Ok(())
    }
}
