//! Optional response validation.
//!
//! Decoding into the typed models already rejects missing fields and wrong
//! JSON types. [`Validate`] adds the semantic checks a decode cannot express
//! (non-empty names, absolute resource URLs, positive ids), and
//! [`maybe_validate`] applies them only when validation is enabled.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// One problem found in a response, located by a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Schema rules for a decoded response.
pub trait Validate {
    /// All issues found; empty when the value conforms.
    fn issues(&self) -> Vec<ValidationIssue>;
}

/// Returns `value` unchanged when `enabled` is false or it has no issues.
pub fn maybe_validate<T: Validate>(value: T, enabled: bool) -> Result<T> {
    if !enabled {
        return Ok(value);
    }
    let issues = value.issues();
    if issues.is_empty() {
        Ok(value)
    } else {
        Err(Error::Validation(issues))
    }
}

/// Collects issues while walking nested values.
#[derive(Debug, Default)]
pub(crate) struct Issues {
    prefix: String,
    found: Vec<ValidationIssue>,
}

impl Issues {
    fn path(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else if field.starts_with('[') {
            format!("{}{}", self.prefix, field)
        } else {
            format!("{}.{}", self.prefix, field)
        }
    }

    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        let path = self.path(field);
        self.found.push(ValidationIssue::new(path, message));
    }

    pub(crate) fn non_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        }
    }

    pub(crate) fn positive(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.push(field, format!("must be positive, got {value}"));
        }
    }

    pub(crate) fn absolute_url(&mut self, field: &str, value: &str) {
        match url::Url::parse(value) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            Ok(u) => self.push(field, format!("unsupported URL scheme '{}'", u.scheme())),
            Err(e) => self.push(field, format!("invalid URL: {e}")),
        }
    }

    /// Validate a nested value under `field`.
    pub(crate) fn nested<V: Validate + ?Sized>(&mut self, field: &str, value: &V) {
        let prefix = self.path(field);
        for issue in value.issues() {
            let path = if issue.path.starts_with('[') {
                format!("{prefix}{}", issue.path)
            } else {
                format!("{prefix}.{}", issue.path)
            };
            self.found.push(ValidationIssue::new(path, issue.message));
        }
    }

    pub(crate) fn each<V: Validate>(&mut self, field: &str, values: &[V]) {
        for (i, value) in values.iter().enumerate() {
            self.nested(&format!("{field}[{i}]"), value);
        }
    }

    pub(crate) fn finish(self) -> Vec<ValidationIssue> {
        self.found
    }
}
