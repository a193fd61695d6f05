//! Form validation engine
//!
//! A `Form` holds the submitted field/value mapping alongside the validation
//! errors accumulated against it. Rules are plain methods that mutate the
//! error set in place; they perform no I/O and never fail the request
//! themselves. The caller checks `valid()` and decides whether to re-render
//! the page with the collected messages.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Pattern used to sanity-check email addresses at signup.
pub static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("EMAIL_RX is a valid regex pattern")
});

/// Validation error messages keyed by field name. Messages for a field keep
/// the order in which the checks ran.
#[derive(Debug, Clone, Default)]
pub struct Errors(HashMap<String, Vec<String>>);

impl Errors {
    /// Append an error message for the given field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// First error message recorded for the field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field)?.first().map(String::as_str)
    }

    /// All messages recorded for the field, in check order.
    pub fn all(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A submitted form: the field/value mapping plus its error set.
///
/// Standard form semantics apply to the mapping: when a key is submitted more
/// than once the last value wins. A field absent from the submission behaves
/// exactly like a field submitted with an empty value for every rule except
/// `required`.
#[derive(Debug, Clone, Default)]
pub struct Form {
    values: HashMap<String, String>,
    pub errors: Errors,
}

impl Form {
    /// Build a form from decoded key/value pairs, last value per key winning.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        let mut values = HashMap::new();
        for (key, value) in pairs {
            values.insert(key, value);
        }
        Form {
            values,
            errors: Errors::default(),
        }
    }

    /// An empty form, used when rendering an input page for the first time.
    pub fn empty() -> Self {
        Form::default()
    }

    /// Submitted value for a field; empty string when absent.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Check that the given fields are present and not blank.
    pub fn required(&mut self, fields: &[&str]) {
        for field in fields {
            if self.get(field).trim().is_empty() {
                self.errors.add(field, "This field cannot be blank");
            }
        }
    }

    /// Check that a field contains at most `max` characters. Length is counted
    /// in Unicode scalar values, not bytes. Empty fields are skipped.
    pub fn max_length(&mut self, field: &str, max: usize) {
        let value = self.get(field);
        if value.is_empty() {
            return;
        }
        if value.chars().count() > max {
            self.errors.add(
                field,
                format!("This field is too long (maximum is {max} characters)"),
            );
        }
    }

    /// Check that a field contains at least `min` characters. Length is counted
    /// in Unicode scalar values, not bytes. Empty fields are skipped.
    pub fn min_length(&mut self, field: &str, min: usize) {
        let value = self.get(field);
        if value.is_empty() {
            return;
        }
        if value.chars().count() < min {
            self.errors.add(
                field,
                format!("This field is too short (minimum is {min} characters)"),
            );
        }
    }

    /// Check that a field exactly equals one of the permitted options.
    /// Comparison is case-sensitive with no trimming. Empty fields are skipped.
    pub fn permitted_values(&mut self, field: &str, opts: &[&str]) {
        let value = self.get(field);
        if value.is_empty() {
            return;
        }
        if !opts.contains(&value) {
            self.errors.add(field, "This field is invalid");
        }
    }

    /// Check that a field matches the given pattern. Empty fields are skipped.
    pub fn matches_pattern(&mut self, field: &str, pattern: &Regex) {
        let value = self.get(field);
        if value.is_empty() {
            return;
        }
        if !pattern.is_match(value) {
            self.errors.add(field, "This field is invalid");
        }
    }

    /// True iff no rule has recorded an error on any field.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }
}
