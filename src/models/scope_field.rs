//! # Scope Fields
//!
//! A task attribute that is either left open (`Any`) or pinned to a concrete
//! value (`Specific`). An open field admits every concrete value a visit can
//! supply, which is the wildcard rule the visit resolver is built on.
//!
//! Storage represents `Any` as SQL `NULL`; the conversion happens once, at the
//! row boundary, through `From<Option<T>>`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<T>", into = "Option<T>")]
pub enum ScopeField<T: Clone> {
    #[default]
    Any,
    Specific(T),
}

impl<T: Clone> ScopeField<T> {
    /// Whether this field accepts the given concrete value
    pub fn admits<Q>(&self, value: &Q) -> bool
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        match self {
            ScopeField::Any => true,
            ScopeField::Specific(own) => own == value,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, ScopeField::Any)
    }

    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl ScopeField<String> {
    /// Text columns treat blank strings like `NULL`
    pub fn from_text(value: Option<String>) -> Self {
        match value {
            Some(text) if !text.trim().is_empty() => ScopeField::Specific(text.trim().to_string()),
            _ => ScopeField::Any,
        }
    }
}

impl<T: Clone> From<Option<T>> for ScopeField<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => ScopeField::Specific(value),
            None => ScopeField::Any,
        }
    }
}

impl<T: Clone> From<ScopeField<T>> for Option<T> {
    fn from(field: ScopeField<T>) -> Self {
        match field {
            ScopeField::Any => None,
            ScopeField::Specific(value) => Some(value),
        }
    }
}
