use std::path::Path;

use gdgen_core::{codegen::write_to_disk, parse::ApiDescription};
use tracing::info;

mod client;
mod config;
mod emit;
mod errors;
mod models;
mod naming;
mod obsolete;
mod operation;
mod primitive;
mod property;
mod sdk;
mod settings;

pub use client::*;
pub use config::*;
pub use emit::{GdWriter, ToGdScript};
pub use errors::*;
pub use models::*;
pub use naming::*;
pub use obsolete::CodegenObsolete;
pub use operation::{CodegenEffects, CodegenGuard, CodegenOperation};
pub use primitive::*;
pub use property::*;
pub use sdk::*;
pub use settings::*;

/// Writes a complete GDScript SDK for `apis` to disk.
///
/// The settings and errors scripts are shared by all APIs, and the
/// error catalog comes from the first one. Every API is sanitized and
/// checked before any script is written, so a bad input leaves the
/// output directory untouched.
pub fn write_sdk_to_disk(
    output: &Path,
    sdk: &CodegenSdk,
    apis: &[ApiDescription],
) -> miette::Result<()> {
    let codegen = apis
        .iter()
        .map(|api| sdk.api(api))
        .collect::<miette::Result<Vec<_>>>()?;

    write_to_disk(output, CodegenSettings::new(sdk))?;
    write_to_disk(output, CodegenErrors::new(sdk, apis.first()))?;

    for api in &codegen {
        write_api_to_disk(output, api)?;
    }

    Ok(())
}

/// Writes the models and client scripts for one API.
pub fn write_api_to_disk(output: &Path, api: &CodegenApi<'_>) -> miette::Result<()> {
    info!(
        api = %api.name(),
        datatypes = api.datatypes().count(),
        calls = api.calls().count(),
        "Generating API"
    );
    write_to_disk(output, api.models())?;
    write_to_disk(output, api.client())?;
    Ok(())
}
