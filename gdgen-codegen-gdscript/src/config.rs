use semver::Version;
use serde::{Deserialize, Serialize};

const DEFAULT_BRAND: &str = "PlayFab";

/// Configuration for GDScript code generation, read from the `[gdscript]`
/// table of `.gdgen.toml` in the output directory.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CodegenConfig {
    /// The SDK's brand name. Prefixes every generated class, and any
    /// datatype whose name collides with a Godot class.
    #[serde(default = "default_brand")]
    pub brand: String,

    #[serde(default)]
    pub sdk_version: Option<Version>,

    #[serde(default)]
    pub build_identifier: Option<String>,

    /// The default vertical for the generated settings.
    #[serde(default)]
    pub vertical_name: Option<String>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            sdk_version: None,
            build_identifier: None,
            vertical_name: None,
        }
    }
}

fn default_brand() -> String {
    DEFAULT_BRAND.to_owned()
}
