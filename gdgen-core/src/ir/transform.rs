use std::{
    borrow::Cow,
    fmt::{self, Display},
};

use tracing::info;

use crate::parse::{ActualType, ApiDescription};

use super::naming::NameSanitizer;

/// A sanitized copy of an [`ApiDescription`].
#[derive(Clone, Debug)]
pub struct Sanitized {
    pub api: ApiDescription,
    /// Every rename applied, in schema order.
    pub renames: Vec<Rename>,
}

/// A rename applied by [`transform`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rename {
    Class {
        from: String,
        to: String,
    },
    Property {
        class: String,
        from: String,
        to: String,
    },
    /// A property's complex type that refers to a renamed class.
    TypeReference {
        class: String,
        property: String,
        from: String,
        to: String,
    },
}

impl Display for Rename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class { from, to } => write!(f, "class `{from}` to `{to}`"),
            Self::Property { class, from, to } => {
                write!(f, "property `{from}` to `{to}` in class `{class}`")
            }
            Self::TypeReference {
                class,
                property,
                from,
                to,
            } => write!(f, "type `{from}` to `{to}` for property `{class}.{property}`"),
        }
    }
}

/// Sanitizes every datatype name, property name, and complex type
/// reference in `api`, leaving `api` itself untouched.
///
/// Renamed properties keep their original name as
/// [`Property::original_name`][crate::parse::Property::original_name],
/// so that generated code still reads and writes the original keys.
pub fn transform(api: &ApiDescription, names: &NameSanitizer) -> Sanitized {
    let mut api = api.clone();
    let mut renames = Vec::new();

    for datatype in &mut api.datatypes {
        if let Some(name) = changed(names.class_name(&datatype.name)) {
            let from = std::mem::replace(&mut datatype.name, name);
            renames.push(Rename::Class {
                from,
                to: datatype.name.clone(),
            });
        }

        for property in &mut datatype.properties {
            if let Some(name) = changed(names.property_name(&property.name)) {
                let from = std::mem::replace(&mut property.name, name);
                renames.push(Rename::Property {
                    class: datatype.name.clone(),
                    from: from.clone(),
                    to: property.name.clone(),
                });
                property.original_name.get_or_insert(from);
            }

            if let ActualType::Complex(target) = &mut property.actual_type
                && let Some(name) = changed(names.class_name(target))
            {
                let from = std::mem::replace(target, name);
                renames.push(Rename::TypeReference {
                    class: datatype.name.clone(),
                    property: property.name.clone(),
                    from,
                    to: target.clone(),
                });
            }
        }
    }

    for rename in &renames {
        info!("Renamed {rename} to avoid a reserved name");
    }

    Sanitized { api, renames }
}

/// Returns the new name if sanitization changed it.
fn changed(name: Cow<'_, str>) -> Option<String> {
    match name {
        Cow::Owned(name) => Some(name),
        Cow::Borrowed(_) => None,
    }
}
