use std::fmt::{self, Display};

use gdgen_core::{
    ir::NameSanitizer,
    parse::{ActualType, Collection},
};

/// A GDScript type annotation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GdType {
    Bool,
    Int,
    Float,
    String,
    /// An untyped `Array`.
    Array,
    /// A `Dictionary` with string keys and untyped values.
    Dictionary,
    /// A generated model class.
    Class(String),
}

impl GdType {
    /// Maps a property's declared type to a GDScript type.
    ///
    /// Collections are untyped, whatever their elements. Godot has no
    /// calendar type, so `DateTime`s are ISO 8601 strings.
    pub fn new(ty: &ActualType, collection: Option<Collection>, names: &NameSanitizer) -> Self {
        match (collection, ty) {
            (Some(Collection::Array), _) => Self::Array,
            (Some(Collection::Map), _) => Self::Dictionary,
            (None, ActualType::Boolean) => Self::Bool,
            (
                None,
                ActualType::Int16
                | ActualType::Int32
                | ActualType::Int64
                | ActualType::UInt16
                | ActualType::UInt32
                | ActualType::UInt64,
            ) => Self::Int,
            (None, ActualType::Float | ActualType::Double) => Self::Float,
            (None, ActualType::String | ActualType::DateTime) => Self::String,
            (None, ActualType::Object) => Self::Dictionary,
            (None, ActualType::Complex(name)) => Self::Class(names.class_name(name).into_owned()),
        }
    }

    /// Returns the zero value that a required property of this type
    /// starts with.
    pub fn zero(&self) -> GdLiteral {
        match self {
            Self::Bool => GdLiteral::False,
            Self::Int => GdLiteral::Zero,
            Self::Float => GdLiteral::ZeroFloat,
            Self::String => GdLiteral::EmptyString,
            Self::Array => GdLiteral::EmptyArray,
            Self::Dictionary => GdLiteral::EmptyDictionary,
            Self::Class(_) => GdLiteral::Null,
        }
    }
}

impl Display for GdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "String",
            Self::Array => "Array",
            Self::Dictionary => "Dictionary",
            Self::Class(name) => name,
        })
    }
}

/// A GDScript literal for a property's initial value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GdLiteral {
    Null,
    False,
    Zero,
    ZeroFloat,
    EmptyString,
    EmptyArray,
    EmptyDictionary,
}

impl Display for GdLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::False => "false",
            Self::Zero => "0",
            Self::ZeroFloat => "0.0",
            Self::EmptyString => r#""""#,
            Self::EmptyArray => "[]",
            Self::EmptyDictionary => "{}",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gdgen_core::ir::ReservedNames;
    use pretty_assertions::assert_eq;

    use crate::GODOT_RESERVED_CLASS_NAMES;

    fn names() -> NameSanitizer {
        NameSanitizer::new(GODOT_RESERVED_CLASS_NAMES, "PlayFab").unwrap()
    }

    fn gd(ty: &str, collection: Option<Collection>) -> GdType {
        GdType::new(&ActualType::from(ty), collection, &names())
    }

    #[test]
    fn test_collections_ignore_element_type() {
        for ty in ["Boolean", "int32", "String", "object", "EntityKey", "Node"] {
            assert_eq!(gd(ty, Some(Collection::Array)), GdType::Array);
            assert_eq!(gd(ty, Some(Collection::Map)), GdType::Dictionary);
        }
    }

    #[test]
    fn test_integer_widths() {
        for ty in ["int16", "int32", "int64", "uint16", "uint32", "uint64"] {
            assert_eq!(gd(ty, None), GdType::Int);
            assert_eq!(gd(ty, None).zero(), GdLiteral::Zero);
        }
    }

    #[test]
    fn test_scalars() {
        assert_eq!(gd("Boolean", None).to_string(), "bool");
        assert_eq!(gd("float", None).to_string(), "float");
        assert_eq!(gd("double", None).to_string(), "float");
        assert_eq!(gd("String", None).to_string(), "String");
        assert_eq!(gd("DateTime", None).to_string(), "String");
        assert_eq!(gd("object", None).to_string(), "Dictionary");
    }

    #[test]
    fn test_complex_types_are_sanitized() {
        assert_eq!(gd("EntityKey", None), GdType::Class("EntityKey".to_owned()));
        assert_eq!(gd("Object", None), GdType::Class("PlayFabObject".to_owned()));
        assert_eq!(gd("Texture", None).zero(), GdLiteral::Null);
    }

    #[test]
    fn test_literals() {
        assert_eq!(GdLiteral::EmptyString.to_string(), r#""""#);
        assert_eq!(GdLiteral::ZeroFloat.to_string(), "0.0");
        assert_eq!(GdLiteral::EmptyDictionary.to_string(), "{}");
    }

    #[test]
    fn test_unreserved_table_passes_classes_through() {
        const EMPTY: ReservedNames = ReservedNames::new(&[]);
        let names = NameSanitizer::new(EMPTY, "PlayFab").unwrap();
        assert_eq!(
            GdType::new(&ActualType::from("Node"), None, &names),
            GdType::Class("Node".to_owned())
        );
    }
}
