use gdgen_core::{codegen::IntoCode, parse::ApiDescription};
use tracing::warn;

use super::{
    emit::{GENERATED_BANNER, GdWriter, ToGdScript, is_identifier},
    sdk::CodegenSdk,
};

/// Generates `<Brand>Errors.gd`: the error class that calls report
/// failures with, and an `ErrorCode` enum from an API's error catalog.
#[derive(Clone, Copy, Debug)]
pub struct CodegenErrors<'a> {
    sdk: &'a CodegenSdk,
    catalog: Option<&'a ApiDescription>,
}

impl<'a> CodegenErrors<'a> {
    /// Takes the error catalog from `catalog`. All APIs of an SDK share
    /// the same catalog, so any one of them will do.
    pub fn new(sdk: &'a CodegenSdk, catalog: Option<&'a ApiDescription>) -> Self {
        Self { sdk, catalog }
    }

    /// Returns the catalog's error codes, in `errorList` order.
    fn codes(&self) -> Vec<(&'a str, i64)> {
        let Some(api) = self.catalog else {
            return vec![];
        };
        api.error_list
            .iter()
            .filter_map(|name| {
                let Some(code) = api.errors.get(name) else {
                    warn!(api = %api.name, error = %name, "Skipping error without a code");
                    return None;
                };
                if !is_identifier(name) {
                    warn!(api = %api.name, error = %name, "Skipping error with an invalid name");
                    return None;
                }
                Some((name.as_str(), code.id))
            })
            .collect()
    }
}

impl ToGdScript for CodegenErrors<'_> {
    fn write_gdscript(&self, w: &mut GdWriter) {
        let names = self.sdk.names();
        w.doc(&format!("Errors reported by {} API calls.", names.brand()));
        w.line(GENERATED_BANNER);
        w.line(format_args!("class_name {}", names.errors_class()));
        w.line("extends RefCounted");

        let codes = self.codes();
        if !codes.is_empty() {
            w.blank();
            w.line("enum ErrorCode {");
            w.indented(|w| {
                for (name, id) in &codes {
                    w.line(format_args!("{name} = {id},"));
                }
            });
            w.line("}");
        }

        w.blank().blank();
        w.doc(
            "A failed call. Carries the service's error response, or an \
             error that the SDK reported before sending the request.",
        );
        w.block(
            format_args!("class {}Error extends RefCounted", names.brand()),
            |w| {
                w.line(r#"var error: String = """#);
                w.line("var error_code: int = 0");
                w.line(r#"var error_message: String = """#);
                w.line("var error_details: Dictionary = {}");
                w.line("var http_code: int = 0");
                w.line(r#"var http_status: String = """#);
                w.blank();
                w.block("func _init(data: Dictionary = {}) -> void", |w| {
                    w.line(r#"error = data.get("error", "")"#);
                    w.line(r#"error_code = data.get("errorCode", 0)"#);
                    w.line(r#"error_message = data.get("errorMessage", "")"#);
                    w.block(r#"if data.get("errorDetails") is Dictionary"#, |w| {
                        w.line(r#"error_details = data["errorDetails"]"#);
                    });
                    w.line(r#"http_code = data.get("code", 0)"#);
                    w.line(r#"http_status = data.get("status", "")"#);
                });
                w.blank();
                w.doc("Returns the error message, followed by each detail.");
                w.block("func generate_error_report() -> String", |w| {
                    w.line("var report := error_message");
                    w.block("for key in error_details", |w| {
                        w.line(r#"report += "\n%s: %s" % [key, error_details[key]]"#);
                    });
                    w.line("return report");
                });
            },
        );
    }
}

impl IntoCode for CodegenErrors<'_> {
    type Code = (String, String);

    fn into_code(self) -> Self::Code {
        let names = self.sdk.names();
        (
            names.script_path(&names.errors_class()),
            self.to_gdscript(),
        )
    }
}
