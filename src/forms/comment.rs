use serde::{Deserialize, Serialize};

use super::{Cleaner, FieldErrors};

/// Raw comment submission.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct CommentForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentData {
    pub name: String,
    pub email: String,
    pub body: String,
}

pub fn validate_comment(form: &CommentForm) -> Result<CommentData, FieldErrors> {
    let mut cleaner = Cleaner::default();

    let name = cleaner
        .required("name", form.name.as_deref())
        .filter(|name| cleaner.max_length("name", name, 80));
    let email = cleaner.required_email("email", form.email.as_deref());
    let body = cleaner.required("body", form.body.as_deref());

    let cleaned = match (name, email, body) {
        (Some(name), Some(email), Some(body)) => Some(CommentData { name, email, body }),
        _ => None,
    };
    cleaner.finish(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, body: &str) -> CommentForm {
        CommentForm {
            name: Some(name.into()),
            email: Some(email.into()),
            body: Some(body.into()),
        }
    }

    #[test]
    fn accepts_and_trims() {
        let data = validate_comment(&form(" Ann ", "ann@example.com", " Nice post ")).unwrap();
        assert_eq!(data.name, "Ann");
        assert_eq!(data.body, "Nice post");
    }

    #[test]
    fn reports_every_bad_field() {
        let errors = validate_comment(&CommentForm {
            name: None,
            email: Some("nope".into()),
            body: Some("".into()),
        })
        .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["email"], vec!["Enter a valid email address."]);
    }

    #[test]
    fn name_length_is_capped() {
        let errors = validate_comment(&form(&"x".repeat(81), "a@b.co", "hi")).unwrap_err();
        assert_eq!(
            errors["name"],
            vec!["Ensure this value has at most 80 characters (it has 81)."]
        );
    }
}
