use gdgen_core::codegen::IntoCode;

use super::{
    emit::{GENERATED_BANNER, GdWriter, ToGdScript},
    operation::CodegenOperation,
    sdk::CodegenApi,
};

/// Generates `<Brand><Api>API.gd`, with one static function per call.
///
/// Every function takes the settings to authenticate with, the request
/// as a dictionary, and an optional completion callback that receives
/// the result and the error.
#[derive(Clone, Copy, Debug)]
pub struct CodegenClient<'a> {
    api: &'a CodegenApi<'a>,
}

impl<'a> CodegenClient<'a> {
    pub fn new(api: &'a CodegenApi<'a>) -> Self {
        Self { api }
    }
}

impl ToGdScript for CodegenClient<'_> {
    fn write_gdscript(&self, w: &mut GdWriter) {
        let names = self.api.sdk().names();
        w.doc(&format!("The {} {} API.", names.brand(), self.api.name()));
        w.line(GENERATED_BANNER);
        w.line(format_args!("class_name {}", names.api_class(self.api.name())));
        w.line("extends RefCounted");

        for call in self.api.calls() {
            w.blank().blank();
            CodegenOperation::new(self.api, call).write_gdscript(w);
        }
    }
}

impl IntoCode for CodegenClient<'_> {
    type Code = (String, String);

    fn into_code(self) -> Self::Code {
        let names = self.api.sdk().names();
        (
            names.script_path(&names.api_class(self.api.name())),
            self.to_gdscript(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use gdgen_core::parse::ApiDescription;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::{CodegenConfig, CodegenSdk};

    #[test]
    fn test_client_script() {
        let api = ApiDescription::from_yaml(indoc! {"
            name: Client
            datatypes:
              - name: LoginResult
            calls:
              - name: LoginWithCustomID
                url: /Client/LoginWithCustomID
                request: LoginWithCustomIDRequest
                result: LoginResult
                auth: None
                summary: Signs the user in using a custom unique identifier.
              - name: GetPlayerProfile
                url: /Client/GetPlayerProfile
                request: GetPlayerProfileRequest
                result: GetPlayerProfileResult
                auth: SessionTicket
                deprecation:
                  DeprecatedAfter: 2020-01-01T00:00:00Z
        "})
        .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let sdk = CodegenSdk::with_now(CodegenConfig::default(), now).unwrap();
        let api = sdk.api(&api).unwrap();
        let (path, code) = api.client().into_code();

        assert_eq!(path, "addons/playfab/PlayFabClientAPI.gd");
        assert_eq!(
            code,
            indoc! {r#"
                ## The PlayFab Client API.
                # Generated by gdgen. Do not edit.
                class_name PlayFabClientAPI
                extends RefCounted


                ## Signs the user in using a custom unique identifier.
                ##
                ## Request: [PlayFabClientModels.LoginWithCustomIDRequest]
                ## Result: [PlayFabClientModels.LoginResult]
                static func login_with_custom_id(settings: PlayFabSettings, request: Dictionary, callback: Callable = Callable()) -> void:
                    if settings.title_id:
                        request["TitleId"] = settings.title_id
                    elif not request.has("TitleId"):
                        request["TitleId"] = ""
                    if not request["TitleId"]:
                        push_error("Must have TitleId set to call this method")
                        if callback.is_valid():
                            callback.call(null, PlayFabErrors.PlayFabError.new({"error": "InvalidRequest", "errorMessage": "Must have TitleId set"}))
                        return

                    PlayFabHttp.post(settings, "/Client/LoginWithCustomID", request, "", "", func(playfab_result, error):
                        if playfab_result:
                            if playfab_result.has("SessionTicket"):
                                settings.session_ticket = playfab_result["SessionTicket"]
                            if playfab_result.has("EntityToken") and playfab_result["EntityToken"].has("EntityToken"):
                                settings.entity_token = playfab_result["EntityToken"]["EntityToken"]
                        if callback.is_valid():
                            callback.call(playfab_result, error)
                    )


                ## Request: [PlayFabClientModels.GetPlayerProfileRequest]
                ## Result: [PlayFabClientModels.GetPlayerProfileResult]
                ## [Obsolete(error): No longer available]
                static func get_player_profile(settings: PlayFabSettings, request: Dictionary, callback: Callable = Callable()) -> void:
                    if not settings.session_ticket:
                        push_error("Must be logged in to call this method")
                        if callback.is_valid():
                            callback.call(null, PlayFabErrors.PlayFabError.new({"error": "NotAuthenticated", "errorMessage": "Must be logged in"}))
                        return

                    PlayFabHttp.post(settings, "/Client/GetPlayerProfile", request, "X-Authorization", settings.session_ticket, func(playfab_result, error):
                        if callback.is_valid():
                            callback.call(playfab_result, error)
                    )
            "#}
        );
    }

    #[test]
    fn test_entity_token_acquisition() {
        let api = ApiDescription::from_yaml(indoc! {"
            name: Authentication
            calls:
              - name: GetEntityToken
                url: /Authentication/GetEntityToken
                result: GetEntityTokenResponse
                auth: EntityToken
        "})
        .unwrap();
        let sdk = CodegenSdk::new(CodegenConfig::default()).unwrap();
        let api = sdk.api(&api).unwrap();
        let code = api.client().to_gdscript();

        assert!(code.contains("## Request: [Dictionary]"));
        assert!(code.contains(r#"var auth_key := """#));
        assert!(!code.contains("if not settings.entity_token"));
        assert!(code.contains(
            r#"PlayFabHttp.post(settings, "/Authentication/GetEntityToken", request, auth_key, auth_value, func(playfab_result, error):"#
        ));
        assert!(code.contains(concat!(
            "        if playfab_result:\n",
            "            if playfab_result.has(\"EntityToken\"):\n",
            "                settings.entity_token = playfab_result[\"EntityToken\"]\n",
        )));
    }
}
