//! Text form state shared by the dashboard editors.
//!
//! A form is a list of labelled string fields with one focused field.
//! Parsing into typed payloads happens in `editor.rs`.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl Form {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            fields: labels
                .iter()
                .map(|&label| Field {
                    label,
                    value: String::new(),
                })
                .collect(),
            focus: 0,
        }
    }

    /// Value of the field with `label`, or `""` if there is no such field.
    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    pub fn set(&mut self, label: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.label == label) {
            field.value = value.into();
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }
}

/// A field that could not be parsed. Shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError(pub String);

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FormError {}

pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn optional_number<T: FromStr>(label: &str, raw: &str) -> Result<Option<T>, FormError> {
    match optional_text(raw) {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| FormError(format!("{label} must be a number"))),
    }
}

pub fn optional_date(label: &str, raw: &str) -> Result<Option<NaiveDate>, FormError> {
    match optional_text(raw) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FormError(format!("{label} must be a date (YYYY-MM-DD)"))),
    }
}

pub fn optional_flag(label: &str, raw: &str) -> Result<Option<bool>, FormError> {
    match optional_text(raw).map(|text| text.to_ascii_lowercase()).as_deref() {
        None => Ok(None),
        Some("yes" | "y" | "true" | "1") => Ok(Some(true)),
        Some("no" | "n" | "false" | "0") => Ok(Some(false)),
        Some(_) => Err(FormError(format!("{label} must be yes or no"))),
    }
}
