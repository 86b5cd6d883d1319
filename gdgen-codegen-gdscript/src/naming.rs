use std::borrow::Cow;

use gdgen_core::ir::{Credential, NameSanitizer, NamingError, ReservedNames};
use heck::AsSnekCase;

/// Godot's built-in classes that a generated class or property
/// would shadow.
pub const GODOT_RESERVED_CLASS_NAMES: ReservedNames = ReservedNames::new(&[
    "Container",
    "Resource",
    "Image",
    "Time",
    "OS",
    "Node",
    "Object",
    "File",
    "Directory",
    "Thread",
    "Mutex",
    "Semaphore",
    "Engine",
    "Input",
    "Camera",
    "Light",
    "Texture",
    "Material",
    "Shader",
    "Animation",
    "AudioStream",
    "VideoStream",
    "PackedScene",
]);

/// Names of the generated scripts, classes, and members, all derived
/// from the SDK's brand.
#[derive(Clone, Debug)]
pub struct CodegenNames {
    sanitizer: NameSanitizer,
}

impl CodegenNames {
    pub fn new(brand: &str) -> Result<Self, NamingError> {
        Ok(Self {
            sanitizer: NameSanitizer::new(GODOT_RESERVED_CLASS_NAMES, brand)?,
        })
    }

    #[inline]
    pub fn sanitizer(&self) -> &NameSanitizer {
        &self.sanitizer
    }

    #[inline]
    pub fn brand(&self) -> &str {
        self.sanitizer.brand()
    }

    /// Returns the directory of the Godot addon, relative to the
    /// output directory.
    pub fn addon_dir(&self) -> String {
        format!("addons/{}", self.brand().to_lowercase())
    }

    /// Returns the path of a script in the addon directory.
    pub fn script_path(&self, class: &str) -> String {
        format!("{}/{class}.gd", self.addon_dir())
    }

    pub fn settings_class(&self) -> String {
        format!("{}Settings", self.brand())
    }

    pub fn errors_class(&self) -> String {
        format!("{}Errors", self.brand())
    }

    /// Returns the qualified name of the error class inside the
    /// errors script.
    pub fn error_class(&self) -> String {
        format!("{}.{}Error", self.errors_class(), self.brand())
    }

    /// Returns the runtime class that sends requests. It's part of the
    /// addon's hand-written runtime, not generated.
    pub fn http_class(&self) -> String {
        format!("{}Http", self.brand())
    }

    pub fn api_class(&self, api: &str) -> String {
        format!("{}{api}API", self.brand())
    }

    pub fn models_class(&self, api: &str) -> String {
        format!("{}{api}Models", self.brand())
    }

    /// Returns the qualified name of a model class, or `Dictionary` for
    /// calls without a request or result type.
    pub fn model_ref(&self, api: &str, datatype: Option<&str>) -> String {
        match datatype {
            Some(name) => format!(
                "{}.{}",
                self.models_class(api),
                self.sanitizer.class_name(name)
            ),
            None => "Dictionary".to_owned(),
        }
    }

    #[inline]
    pub fn class_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        self.sanitizer.class_name(name)
    }

    #[inline]
    pub fn property_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        self.sanitizer.property_name(name)
    }
}

/// Returns the snake_case name of the static function for a call.
pub fn method_name(call: &str) -> String {
    format!("{}", AsSnekCase(call))
}

/// Returns the settings field that stores a credential.
pub fn settings_field(credential: Credential) -> &'static str {
    match credential {
        Credential::EntityToken => "entity_token",
        Credential::SecretKey => "developer_secret_key",
        Credential::SessionTicket => "session_ticket",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_godot_table_is_closed_under_prefixing() {
        let names = CodegenNames::new("PlayFab").unwrap();
        for name in GODOT_RESERVED_CLASS_NAMES.iter() {
            let class = names.class_name(name);
            assert!(
                !GODOT_RESERVED_CLASS_NAMES.contains(&class),
                "`{class}` is a Godot class"
            );
            assert_eq!(names.class_name(&class), class);
        }
    }

    #[test]
    fn test_brand_derived_names() {
        let names = CodegenNames::new("PlayFab").unwrap();
        assert_eq!(names.addon_dir(), "addons/playfab");
        assert_eq!(names.api_class("Client"), "PlayFabClientAPI");
        assert_eq!(names.models_class("Client"), "PlayFabClientModels");
        assert_eq!(
            names.script_path(&names.settings_class()),
            "addons/playfab/PlayFabSettings.gd"
        );
        assert_eq!(names.error_class(), "PlayFabErrors.PlayFabError");
    }

    #[test]
    fn test_model_ref_sanitizes_class() {
        let names = CodegenNames::new("PlayFab").unwrap();
        assert_eq!(
            names.model_ref("Client", Some("LoginResult")),
            "PlayFabClientModels.LoginResult"
        );
        assert_eq!(
            names.model_ref("Client", Some("Image")),
            "PlayFabClientModels.PlayFabImage"
        );
        assert_eq!(names.model_ref("Client", None), "Dictionary");
    }

    #[test]
    fn test_method_name() {
        assert_eq!(method_name("LoginWithCustomID"), "login_with_custom_id");
        assert_eq!(method_name("GetEntityToken"), "get_entity_token");
        assert_eq!(method_name("LoginWithPSN"), "login_with_psn");
    }
}
