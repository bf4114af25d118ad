use url::Url;

use crate::{
    configuration::SiteSelectors,
    domain::dentist::{merge_definitions, DentistRecord},
    error::ScrapeError,
};

use super::{
    browser::{Element, Page},
    definition_list::extract_definition_list,
    navigator::Navigator,
};

/// Loads one dentist's page and folds every definition list in the details
/// section, bar opening hours, into a single record.
pub async fn scrape_dentist_detail<P: Page>(
    page: &P,
    url: &Url,
    navigator: &Navigator,
    selectors: &SiteSelectors,
) -> Result<DentistRecord, ScrapeError> {
    navigator.goto(page, url.as_str()).await?;

    let name = match page.find(&selectors.dentist_name).await? {
        Some(el) => el.text().await?.trim().to_string(),
        None => return Err(ScrapeError::ElementNotFound("dentist name".to_string())),
    };

    let lists = page.find_all(&selectors.detail_lists).await?;
    let mut definitions = Vec::with_capacity(lists.len());
    for list in lists.iter() {
        definitions.push(extract_definition_list(list).await?);
    }

    log::debug!("Scraped {} from {} lists at {}", name, definitions.len(), url);

    Ok(DentistRecord::new(Some(name), merge_definitions(definitions)))
}
