use std::borrow::Cow;

use gdgen_core::{ir::NameSanitizer, parse::Property};

use super::{
    emit::{INDENT, quote},
    primitive::{GdLiteral, GdType},
};

/// A model property, rendered as a GDScript member variable.
///
/// Works on both original and sanitized properties: the member name is
/// always sanitized, and serialized data always uses the original key.
#[derive(Clone, Copy, Debug)]
pub struct CodegenProperty<'a> {
    names: &'a NameSanitizer,
    property: &'a Property,
}

impl<'a> CodegenProperty<'a> {
    pub fn new(names: &'a NameSanitizer, property: &'a Property) -> Self {
        Self { names, property }
    }

    #[inline]
    pub fn property(&self) -> &'a Property {
        self.property
    }

    /// Returns the member variable's name.
    pub fn name(&self) -> Cow<'a, str> {
        self.names.property_name(&self.property.name)
    }

    /// Returns the key that this property uses in serialized data.
    pub fn wire_name(&self) -> &'a str {
        self.property.wire_name()
    }

    /// Returns the GDScript type of this property, ignoring whether
    /// it's optional.
    pub fn ty(&self) -> GdType {
        GdType::new(
            &self.property.actual_type,
            self.property.collection,
            self.names,
        )
    }

    /// Returns the type annotation for the member variable, or `None`
    /// for an optional property, which must be able to hold `null`.
    pub fn type_hint(&self) -> Option<GdType> {
        (!self.property.optional).then(|| self.ty())
    }

    pub fn default_value(&self) -> GdLiteral {
        match self.type_hint() {
            Some(ty) => ty.zero(),
            None => GdLiteral::Null,
        }
    }

    /// Returns `var <name>[: <type>] = <default>`.
    pub fn declaration(&self) -> String {
        match self.type_hint() {
            Some(ty) => format!("var {}: {ty} = {}", self.name(), self.default_value()),
            None => format!("var {} = {}", self.name(), self.default_value()),
        }
    }

    /// Returns the statement that reads this property from a `data`
    /// dictionary in `_init`.
    pub fn deserialize_statement(&self) -> String {
        let key = quote(self.wire_name());
        format!(
            "if data.has({key}):\n{INDENT}{name} = data[{key}]",
            name = self.name()
        )
    }

    /// Returns the statement that writes this property to a `result`
    /// dictionary in `to_dict`.
    pub fn serialize_statement(&self) -> String {
        format!(
            "result[{}] = {}",
            quote(self.wire_name()),
            self.name()
        )
    }
}
