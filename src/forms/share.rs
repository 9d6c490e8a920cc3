use serde::{Deserialize, Serialize};

use super::{Cleaner, FieldErrors};

/// Raw "email this post" submission.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ShareForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub to: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareData {
    pub name: String,
    pub email: String,
    pub to: String,
    pub comments: String,
}

pub fn validate_share(form: &ShareForm) -> Result<ShareData, FieldErrors> {
    let mut cleaner = Cleaner::default();

    let name = cleaner
        .required("name", form.name.as_deref())
        .filter(|name| cleaner.max_length("name", name, 25));
    let email = cleaner.required_email("email", form.email.as_deref());
    let to = cleaner.required_email("to", form.to.as_deref());
    let comments = cleaner.optional(form.comments.as_deref());

    let cleaned = match (name, email, to) {
        (Some(name), Some(email), Some(to)) => Some(ShareData {
            name,
            email,
            to,
            comments,
        }),
        _ => None,
    };
    cleaner.finish(cleaned)
}
