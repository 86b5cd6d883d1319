use std::fmt::{self, Display};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::SerdeError;

/// A language-agnostic description of a remote API.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescription {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_datatypes")]
    pub datatypes: Vec<Datatype>,
    #[serde(default)]
    pub calls: Vec<ApiCall>,
    #[serde(default)]
    pub error_list: Vec<String>,
    #[serde(default)]
    pub errors: IndexMap<String, ErrorCode>,
}

impl ApiDescription {
    /// Parses an API description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SerdeError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let result = serde_path_to_error::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(result)
    }

    /// Parses an API description from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SerdeError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml);
        let result = serde_path_to_error::deserialize(deserializer)?;
        Ok(result)
    }
}

/// A named request, result, or shared model type.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Datatype {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<Deprecation>,
}

/// A single field of a [`Datatype`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(rename = "actualtype")]
    pub actual_type: ActualType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<Deprecation>,
    /// The name before sanitization, if the property was renamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

impl Property {
    /// Returns the key that this property uses in serialized data.
    ///
    /// For a renamed property, this is the name before sanitization;
    /// otherwise, it's the same as [`name`](Self::name).
    pub fn wire_name(&self) -> &str {
        self.original_name.as_deref().unwrap_or(&self.name)
    }
}

/// The declared type of a [`Property`].
///
/// Primitive tags are matched exactly, so `object` (an untyped mapping)
/// and `Object` (a reference to a datatype named `Object`) stay distinct.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ActualType {
    Boolean,
    Int16,
    Int32,
    Int64,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    String,
    DateTime,
    Object,
    /// A reference to another datatype.
    Complex(String),
}

impl ActualType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Boolean => "Boolean",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Object => "object",
            Self::Complex(name) => name,
        }
    }

    /// Returns the referenced datatype name, if this is a complex type.
    pub fn complex(&self) -> Option<&str> {
        match self {
            Self::Complex(name) => Some(name),
            _ => None,
        }
    }
}

impl From<&str> for ActualType {
    fn from(value: &str) -> Self {
        match value {
            "Boolean" => Self::Boolean,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint16" => Self::UInt16,
            "uint32" => Self::UInt32,
            "uint64" => Self::UInt64,
            "float" => Self::Float,
            "double" => Self::Double,
            "String" => Self::String,
            "DateTime" => Self::DateTime,
            "object" => Self::Object,
            other => Self::Complex(other.to_owned()),
        }
    }
}

impl From<String> for ActualType {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Complex(_) => Self::Complex(value),
            primitive => primitive,
        }
    }
}

impl From<ActualType> for String {
    fn from(value: ActualType) -> Self {
        match value {
            ActualType::Complex(name) => name,
            primitive => primitive.as_str().to_owned(),
        }
    }
}

impl Display for ActualType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Array,
    Map,
}

/// A single API operation.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ApiCall {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default)]
    pub auth: AuthMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<Deprecation>,
}

/// The credential that an [`ApiCall`] authenticates with.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum AuthMode {
    #[default]
    None,
    EntityToken,
    SecretKey,
    SessionTicket,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Deprecation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,
    /// Accepts RFC 3339, or a date and time without an offset (read as
    /// UTC), or a bare date. An unrecognized date is dropped, which
    /// leaves the item deprecated with a warning.
    #[serde(
        default,
        deserialize_with = "deserialize_deprecated_after",
        skip_serializing_if = "Option::is_none"
    )]
    pub deprecated_after: Option<DateTime<Utc>>,
}

/// An entry in the API's error catalog.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorCode {
    pub name: String,
    pub id: i64,
}

/// Accepts datatypes as either a list, or a map keyed by name.
fn deserialize_datatypes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Datatype>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Datatypes {
        List(Vec<Datatype>),
        Map(IndexMap<String, Datatype>),
    }
    Ok(match Datatypes::deserialize(deserializer)? {
        Datatypes::List(datatypes) => datatypes,
        Datatypes::Map(datatypes) => datatypes.into_values().collect(),
    })
}

fn deserialize_deprecated_after<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(value) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let date = parse_date(value.trim());
    if date.is_none() {
        warn!(date = %value, "Ignoring unrecognized `DeprecatedAfter` date");
    }
    Ok(date)
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.to_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
