use std::borrow::Cow;

use unicase::UniCase;

use super::error::NamingError;

/// The suffix appended to property names that collide with a reserved name.
const PROPERTY_SUFFIX: char = '_';

/// A fixed set of identifiers that collide with built-in names in the
/// target environment.
///
/// Membership is case-insensitive.
#[derive(Clone, Copy, Debug)]
pub struct ReservedNames(&'static [&'static str]);

impl ReservedNames {
    #[inline]
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self(names)
    }

    /// Returns `true` if `name` case-insensitively equals a reserved name.
    pub fn contains(&self, name: &str) -> bool {
        let name = UniCase::new(name);
        self.0.iter().any(|&reserved| UniCase::new(reserved) == name)
    }

    #[inline]
    pub fn iter(self) -> impl Iterator<Item = &'static str> {
        self.0.iter().copied()
    }
}

/// Renames classes and properties that would shadow reserved names.
///
/// A reserved class name gets the brand as a prefix (`Node` becomes
/// `PlayFabNode`); a reserved property name gets a trailing underscore
/// (`Thread` becomes `Thread_`). All other names pass through unchanged.
///
/// Construction checks that neither rule maps a reserved name onto
/// another reserved name, which makes both rules idempotent.
#[derive(Clone, Debug)]
pub struct NameSanitizer {
    reserved: ReservedNames,
    brand: String,
}

impl NameSanitizer {
    pub fn new(reserved: ReservedNames, brand: impl Into<String>) -> Result<Self, NamingError> {
        let brand = brand.into();
        for name in reserved.iter() {
            if reserved.contains(&format!("{brand}{name}")) {
                return Err(NamingError::PrefixCollision {
                    brand,
                    reserved: name,
                });
            }
            if reserved.contains(&format!("{name}{PROPERTY_SUFFIX}")) {
                return Err(NamingError::SuffixCollision { reserved: name });
            }
        }
        Ok(Self { reserved, brand })
    }

    #[inline]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[inline]
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Returns a class name that doesn't collide with a reserved name.
    pub fn class_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.is_reserved(name) {
            Cow::Owned(format!("{}{name}", self.brand))
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Returns a property name that doesn't collide with a reserved name.
    pub fn property_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.is_reserved(name) {
            Cow::Owned(format!("{name}{PROPERTY_SUFFIX}"))
        } else {
            Cow::Borrowed(name)
        }
    }
}
