use chrono::{DateTime, Utc};
use gdgen_core::{
    ir::{Obsolete, Severity},
    parse::Deprecation,
};

use super::emit::{GdWriter, ToGdScript};

/// A doc comment line that marks a call, model, or property obsolete.
///
/// Items past their deprecation date are marked as errors.
#[derive(Clone, Copy, Debug)]
pub struct CodegenObsolete<'a>(Option<Obsolete<'a>>);

impl<'a> CodegenObsolete<'a> {
    pub fn new(deprecation: Option<&'a Deprecation>, now: DateTime<Utc>) -> Self {
        Self(Obsolete::new(deprecation, now))
    }
}

impl ToGdScript for CodegenObsolete<'_> {
    fn write_gdscript(&self, w: &mut GdWriter) {
        let Some(obsolete) = self.0 else {
            return;
        };
        match obsolete.severity {
            Severity::Warning => w.line(format_args!("## [Obsolete: {}]", obsolete.message())),
            Severity::Error => w.line(format_args!(
                "## [Obsolete(error): {}]",
                obsolete.message()
            )),
        };
    }
}
