use serde::{Deserialize, Serialize};

use super::{Cleaner, FieldErrors};

/// Raw search query string.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct SearchForm {
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchData {
    pub query: String,
}

pub fn validate_search(form: &SearchForm) -> Result<SearchData, FieldErrors> {
    let mut cleaner = Cleaner::default();

    let query = cleaner
        .required("q", form.q.as_deref())
        .filter(|q| cleaner.max_length("q", q, 200));

    cleaner.finish(query.map(|query| SearchData { query }))
}
