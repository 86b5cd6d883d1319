use gdgen_core::{
    ir::{AuthGuard, Credential, PostCallEffect, SdkError, TITLE_ID_KEY},
    parse::ApiCall,
};
use itertools::Itertools;

use super::{
    emit::{GdWriter, ToGdScript, quote},
    naming::{CodegenNames, method_name, settings_field},
    obsolete::CodegenObsolete,
    sdk::CodegenApi,
};

/// The name of the response parameter in generated completion lambdas.
const RESULT_VAR: &str = "playfab_result";

/// A static function that sends one API call.
#[derive(Clone, Copy, Debug)]
pub struct CodegenOperation<'a> {
    api: &'a CodegenApi<'a>,
    call: &'a ApiCall,
}

impl<'a> CodegenOperation<'a> {
    pub fn new(api: &'a CodegenApi<'a>, call: &'a ApiCall) -> Self {
        Self { api, call }
    }

    /// Returns the header name and value arguments for the HTTP layer.
    fn auth_args(&self) -> String {
        if let Some(AuthGuard::SelectCredential) = AuthGuard::of(self.call) {
            return "auth_key, auth_value".to_owned();
        }
        match self.call.auth.credential() {
            Some(credential) => format!(
                "{}, settings.{}",
                quote(credential.header_name()),
                settings_field(credential)
            ),
            None => r#""", """#.to_owned(),
        }
    }
}

impl ToGdScript for CodegenOperation<'_> {
    fn write_gdscript(&self, w: &mut GdWriter) {
        let names = self.api.sdk().names();
        let api = self.api.name();

        if let Some(summary) = &self.call.summary {
            w.doc(summary);
            w.line("##");
        }
        w.line(format_args!(
            "## Request: [{}]",
            names.model_ref(api, self.call.request.as_deref())
        ));
        w.line(format_args!(
            "## Result: [{}]",
            names.model_ref(api, self.call.result.as_deref())
        ));
        CodegenObsolete::new(self.call.deprecation.as_ref(), self.api.sdk().now())
            .write_gdscript(w);

        let header = format!(
            "static func {}(settings: {}, request: Dictionary, callback: Callable = Callable()) -> void",
            method_name(&self.call.name),
            names.settings_class(),
        );
        w.block(header, |w| {
            if let Some(guard) = AuthGuard::of(self.call) {
                CodegenGuard::new(names, guard).write_gdscript(w);
                w.blank();
            }

            w.line(format_args!(
                "{}.post(settings, {}, request, {}, func({RESULT_VAR}, error):",
                names.http_class(),
                quote(&self.call.url),
                self.auth_args(),
            ));
            w.indented(|w| {
                CodegenEffects::new(PostCallEffect::of(self.call)).write_gdscript(w);
                w.block("if callback.is_valid()", |w| {
                    w.line(format_args!("callback.call({RESULT_VAR}, error)"));
                });
            });
            w.line(")");
        });
    }
}

/// The checks that run before a call sends its request.
#[derive(Clone, Copy, Debug)]
pub struct CodegenGuard<'a> {
    names: &'a CodegenNames,
    guard: AuthGuard,
}

impl<'a> CodegenGuard<'a> {
    pub fn new(names: &'a CodegenNames, guard: AuthGuard) -> Self {
        Self { names, guard }
    }

    /// Writes the early return for a failed guard.
    fn write_failure(&self, w: &mut GdWriter) {
        if let Some(message) = self.guard.log_message() {
            w.line(format_args!("push_error({})", quote(message)));
        }
        if let Some(error) = self.guard.error() {
            w.block("if callback.is_valid()", |w| {
                w.line(format_args!("callback.call(null, {})", self.error(&error)));
            });
        }
        w.line("return");
    }

    fn error(&self, error: &SdkError) -> String {
        format!(
            r#"{}.new({{"error": {}, "errorMessage": {}}})"#,
            self.names.error_class(),
            quote(error.kind.as_str()),
            quote(&error.message),
        )
    }
}

impl ToGdScript for CodegenGuard<'_> {
    fn write_gdscript(&self, w: &mut GdWriter) {
        match self.guard {
            AuthGuard::TitleId => {
                let key = quote(TITLE_ID_KEY);
                w.block("if settings.title_id", |w| {
                    w.line(format_args!("request[{key}] = settings.title_id"));
                });
                w.block(format_args!("elif not request.has({key})"), |w| {
                    w.line(format_args!(r#"request[{key}] = """#));
                });
                w.block(format_args!("if not request[{key}]"), |w| {
                    self.write_failure(w);
                });
            }
            AuthGuard::SelectCredential => {
                w.line(r#"var auth_key := """#);
                w.line(r#"var auth_value := """#);
                for (index, credential) in Credential::PREFERENCE.into_iter().enumerate() {
                    let keyword = if index == 0 { "if" } else { "elif" };
                    let field = settings_field(credential);
                    w.block(format_args!("{keyword} settings.{field}"), |w| {
                        w.line(format_args!(
                            "auth_key = {}",
                            quote(credential.header_name())
                        ));
                        w.line(format_args!("auth_value = settings.{field}"));
                    });
                }
            }
            AuthGuard::Require(credential) => {
                let field = settings_field(credential);
                w.block(format_args!("if not settings.{field}"), |w| {
                    self.write_failure(w);
                });
            }
        }
    }
}

/// The credentials that a call stores from a successful response.
#[derive(Clone, Copy, Debug)]
pub struct CodegenEffects(&'static [PostCallEffect]);

impl CodegenEffects {
    pub fn new(effects: &'static [PostCallEffect]) -> Self {
        Self(effects)
    }
}

impl ToGdScript for CodegenEffects {
    fn write_gdscript(&self, w: &mut GdWriter) {
        if self.0.is_empty() {
            return;
        }
        w.block(format_args!("if {RESULT_VAR}"), |w| {
            for effect in self.0 {
                let path = effect.path();
                let condition = (0..path.len())
                    .map(|depth| format!("{}.has({})", access(&path[..depth]), quote(path[depth])))
                    .join(" and ");
                w.block(format_args!("if {condition}"), |w| {
                    w.line(format_args!(
                        "settings.{} = {}",
                        settings_field(effect.credential()),
                        access(path)
                    ));
                });
            }
        });
    }
}

/// Returns an expression that indexes into the response by `keys`.
fn access(keys: &[&str]) -> String {
    std::iter::once(RESULT_VAR.to_owned())
        .chain(keys.iter().map(|key| format!("[{}]", quote(key))))
        .collect()
}
