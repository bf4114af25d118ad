pub const DEFAULT_SPECIALTY: &str = "General Practice";

/// Parameters for one postal code crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub postal_code: String,
    pub specialty: String,
}

impl SearchRequest {
    pub fn new(postal_code: impl Into<String>, specialty: impl Into<String>) -> Self {
        SearchRequest {
            postal_code: postal_code.into(),
            specialty: specialty.into(),
        }
    }
}

#[cfg(test)]
impl From<&str> for SearchRequest {
    fn from(postal_code: &str) -> Self {
        SearchRequest::new(postal_code, DEFAULT_SPECIALTY)
    }
}
