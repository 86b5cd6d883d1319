use std::path::Path;

use miette::{Context, IntoDiagnostic};
use tracing::debug;

/// Writes a generated file under `output`, creating its parent
/// directories as needed.
pub fn write_to_disk(output: &Path, code: impl IntoCode) -> miette::Result<()> {
    let code = code.into_code();
    let path = output.join(code.path());
    let string = code.into_string()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .into_diagnostic()
            .with_context(|| format!("Failed to create directory `{}`", parent.display()))?;
    }
    debug!(path = %path.display(), len = string.len(), "Writing generated file");
    std::fs::write(&path, string)
        .into_diagnostic()
        .with_context(|| format!("Failed to write `{}`", path.display()))?;
    Ok(())
}

/// A generated source file.
pub trait Code {
    /// Returns the path of the file, relative to the output directory.
    fn path(&self) -> &str;

    fn into_string(self) -> miette::Result<String>;
}

/// A file's path and its already-rendered contents.
impl<P: AsRef<str>> Code for (P, String) {
    fn path(&self) -> &str {
        self.0.as_ref()
    }

    fn into_string(self) -> miette::Result<String> {
        Ok(self.1)
    }
}

pub trait IntoCode {
    type Code: Code;

    fn into_code(self) -> Self::Code;
}

impl<T: Code> IntoCode for T {
    type Code = T;

    fn into_code(self) -> Self::Code {
        self
    }
}
