use gdgen_core::{codegen::IntoCode, ir::Credential};

use super::{
    emit::{GENERATED_BANNER, GdWriter, ToGdScript, quote},
    naming::settings_field,
    sdk::CodegenSdk,
};

/// Generates `<Brand>Settings.gd`: the settings object that every call
/// reads its title ID and credentials from, and that login calls store
/// credentials in.
#[derive(Clone, Copy, Debug)]
pub struct CodegenSettings<'a> {
    sdk: &'a CodegenSdk,
}

impl<'a> CodegenSettings<'a> {
    pub fn new(sdk: &'a CodegenSdk) -> Self {
        Self { sdk }
    }
}

impl ToGdScript for CodegenSettings<'_> {
    fn write_gdscript(&self, w: &mut GdWriter) {
        let names = self.sdk.names();
        let config = self.sdk.config();

        w.doc(&format!(
            "Settings and credentials for {} API calls. Pass the same \
             instance to every call, so that credentials from a login \
             are used by the calls that follow it.",
            names.brand()
        ));
        w.line(GENERATED_BANNER);
        w.line(format_args!("class_name {}", names.settings_class()));
        w.line("extends RefCounted");

        if config.sdk_version.is_some() || config.build_identifier.is_some() {
            w.blank();
        }
        if let Some(version) = &config.sdk_version {
            w.line(format_args!(
                "const SDK_VERSION := {}",
                quote(&version.to_string())
            ));
        }
        if let Some(build) = &config.build_identifier {
            w.line(format_args!("const BUILD_IDENTIFIER := {}", quote(build)));
        }

        w.blank();
        w.line(r#"var title_id: String = """#);
        w.line(format_args!(
            "var vertical_name: String = {}",
            quote(config.vertical_name.as_deref().unwrap_or_default())
        ));
        for credential in Credential::PREFERENCE {
            w.doc(&format!("Sent as `{}`.", credential.header_name()));
            w.line(format_args!(
                r#"var {}: String = """#,
                settings_field(credential)
            ));
        }

        w.blank();
        w.doc("Forgets the credentials stored by login calls.");
        w.block("func forget_all_credentials() -> void", |w| {
            for credential in [Credential::SessionTicket, Credential::EntityToken] {
                w.line(format_args!(r#"{} = """#, settings_field(credential)));
            }
        });
    }
}

impl IntoCode for CodegenSettings<'_> {
    type Code = (String, String);

    fn into_code(self) -> Self::Code {
        let names = self.sdk.names();
        (
            names.script_path(&names.settings_class()),
            self.to_gdscript(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::CodegenConfig;

    #[test]
    fn test_settings_script() {
        let config = CodegenConfig {
            sdk_version: Some("1.2.3".parse().unwrap()),
            build_identifier: Some("jbuild_godotsdk_1".to_owned()),
            vertical_name: Some("Retail".to_owned()),
            ..Default::default()
        };
        let sdk = CodegenSdk::new(config).unwrap();
        let (path, code) = CodegenSettings::new(&sdk).into_code();

        assert_eq!(path, "addons/playfab/PlayFabSettings.gd");
        assert_eq!(
            code,
            indoc! {r#"
                ## Settings and credentials for PlayFab API calls. Pass the same instance to every
                ## call, so that credentials from a login are used by the calls that follow it.
                # Generated by gdgen. Do not edit.
                class_name PlayFabSettings
                extends RefCounted

                const SDK_VERSION := "1.2.3"
                const BUILD_IDENTIFIER := "jbuild_godotsdk_1"

                var title_id: String = ""
                var vertical_name: String = "Retail"
                ## Sent as `X-EntityToken`.
                var entity_token: String = ""
                ## Sent as `X-Authorization`.
                var session_ticket: String = ""
                ## Sent as `X-SecretKey`.
                var developer_secret_key: String = ""

                ## Forgets the credentials stored by login calls.
                func forget_all_credentials() -> void:
                    session_ticket = ""
                    entity_token = ""
            "#}
        );
    }

    #[test]
    fn test_no_constants_without_build_info() {
        let sdk = CodegenSdk::new(CodegenConfig::default()).unwrap();
        let code = CodegenSettings::new(&sdk).to_gdscript();
        assert!(!code.contains("const "));
        assert!(code.contains(r#"var vertical_name: String = """#));
    }
}
