use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::parse::Deprecation;

/// How strongly generated code should discourage using a deprecated item.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    /// The item still works, but has a deprecation date in the future,
    /// or no date at all.
    Warning,
    /// The item's deprecation date has passed.
    Error,
}

/// An obsolescence annotation for a deprecated call, datatype,
/// or property.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Obsolete<'a> {
    pub replaced_by: Option<&'a str>,
    pub severity: Severity,
}

impl<'a> Obsolete<'a> {
    /// Returns the annotation for an item's deprecation metadata,
    /// or `None` if the item isn't deprecated.
    ///
    /// The severity is decided against `now`, so it reflects the time
    /// of generation, not the time the generated code runs.
    pub fn new(deprecation: Option<&'a Deprecation>, now: DateTime<Utc>) -> Option<Self> {
        let deprecation = deprecation?;
        let severity = match deprecation.deprecated_after {
            Some(after) if now > after => Severity::Error,
            _ => Severity::Warning,
        };
        Some(Self {
            replaced_by: deprecation.replaced_by.as_deref(),
            severity,
        })
    }

    pub fn message(&self) -> Cow<'a, str> {
        match self.replaced_by {
            Some(name) => Cow::Owned(format!("Use '{name}' instead")),
            None => Cow::Borrowed("No longer available"),
        }
    }
}
