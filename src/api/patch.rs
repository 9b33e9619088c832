//! Tri-state field update for partial payloads.
//!
//! A plain `Option<T>` cannot tell "leave this alone" from "set this to
//! null". `Patch<T>` can. Pair it with
//! `#[serde(skip_serializing_if = "Patch::is_keep")]` on the field.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: PartialEq> Patch<T> {
    /// `Keep` if nothing changed, otherwise `Set` or `Clear`.
    pub fn diff(current: Option<&T>, edited: Option<T>) -> Patch<T> {
        match (current, edited) {
            (Some(old), Some(new)) if *old == new => Patch::Keep,
            (None, None) => Patch::Keep,
            (_, Some(new)) => Patch::Set(new),
            (Some(_), None) => Patch::Clear,
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(value) => value.serialize(serializer),
            // Keep is normally skipped by the field attribute
            Patch::Keep | Patch::Clear => serializer.serialize_none(),
        }
    }
}
