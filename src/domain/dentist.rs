use std::collections::BTreeMap;

use serde::Serialize;

pub type DentistInfo = BTreeMap<String, String>;

/// One practice as scraped from its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DentistRecord {
    pub name: Option<String>,
    pub info: DentistInfo,
}

impl DentistRecord {
    pub fn new(name: Option<String>, info: DentistInfo) -> Self {
        DentistRecord { name, info }
    }
}

/// Folds definition lists into one map. Later lists overwrite earlier ones on
/// shared keys.
pub fn merge_definitions(lists: impl IntoIterator<Item = DentistInfo>) -> DentistInfo {
    lists
        .into_iter()
        .fold(DentistInfo::new(), |mut merged, list| {
            merged.extend(list);
            merged
        })
}
