//! Explicit form validation. Each form is a plain struct deserialized from the
//! request and a function turning it into cleaned data or per-field errors.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use validator::ValidateEmail;

mod comment;
mod search;
mod share;

pub use comment::{CommentData, CommentForm, validate_comment};
pub use search::{SearchForm, validate_search};
pub use share::{ShareForm, validate_share};

/// The domain must end in a real top-level label: letters, or punycode.
static EMAIL_TLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:[a-z]{2,63}|xn--[a-z0-9]{1,59})$").expect("tld pattern is valid")
});

/// Field name to error messages, ordered by field name.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

/// A form as rendered into a page: the submitted values and any errors.
#[derive(Debug, Serialize)]
pub struct BoundForm<T: Serialize> {
    pub is_bound: bool,
    pub data: T,
    pub errors: FieldErrors,
}

impl<T: Serialize + Default> BoundForm<T> {
    pub fn unbound() -> Self {
        Self {
            is_bound: false,
            data: T::default(),
            errors: FieldErrors::new(),
        }
    }
}

impl<T: Serialize> BoundForm<T> {
    pub fn bound(data: T, errors: FieldErrors) -> Self {
        Self {
            is_bound: true,
            data,
            errors,
        }
    }
}

/// Collects errors while a form is being cleaned.
#[derive(Default)]
struct Cleaner {
    errors: FieldErrors,
}

impl Cleaner {
    fn add(&mut self, field: &'static str, message: String) {
        self.errors.entry(field).or_default().push(message);
    }

    /// Trimmed value, or `None` with a "required" error when blank.
    fn required(&mut self, field: &'static str, value: Option<&str>) -> Option<String> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Some(v.to_string()),
            None => {
                self.add(field, "This field is required.".to_string());
                None
            }
        }
    }

    fn optional(&mut self, value: Option<&str>) -> String {
        value.map(str::trim).unwrap_or_default().to_string()
    }

    fn max_length(&mut self, field: &'static str, value: &str, max: usize) -> bool {
        let len = value.chars().count();
        if len > max {
            self.add(
                field,
                format!(
                    "Ensure this value has at most {} characters (it has {}).",
                    max, len
                ),
            );
            return false;
        }
        true
    }

    fn required_email(&mut self, field: &'static str, value: Option<&str>) -> Option<String> {
        let value = self.required(field, value)?;
        if !is_valid_email(&value) {
            self.add(field, "Enter a valid email address.".to_string());
            return None;
        }
        Some(value)
    }

    fn finish<T>(self, cleaned: Option<T>) -> Result<T, FieldErrors> {
        match cleaned {
            Some(data) if self.errors.is_empty() => Ok(data),
            _ => Err(self.errors),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    value.validate_email()
        && value
            .rsplit_once('@')
            .is_some_and(|(_, domain)| EMAIL_TLD_RE.is_match(domain))
}
