use crate::{domain::dentist::DentistInfo, error::ScrapeError};

use super::browser::Element;

/// Reads the `dt`/`dd` pairs of a definition list, position by position,
/// stopping at the first position missing either half.
pub async fn extract_definition_list<E: Element>(list: &E) -> Result<DentistInfo, ScrapeError> {
    let mut definitions = DentistInfo::new();

    for position in 1.. {
        let Some(term) = list.find(&format!("dt:nth-of-type({position})")).await? else {
            break;
        };
        let Some(value) = list.find(&format!("dd:nth-of-type({position})")).await? else {
            break;
        };

        let term = term.text().await?.trim().to_lowercase();
        definitions.insert(term, value.text().await?);
    }

    Ok(definitions)
}
