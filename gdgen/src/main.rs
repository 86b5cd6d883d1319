use std::path::Path;

use gdgen_codegen_gdscript::CodegenSdk;
use gdgen_core::parse::ApiDescription;
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, prelude::*};

mod config;

use self::config::{Codegen, Command, Main};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<()> {
    let Ok(main) = Main::parse().map_err(|err| err.exit());
    init_tracing(main.verbose);

    match main.command {
        Command::Codegen(Codegen {
            inputs,
            output,
            config,
        }) => {
            let apis = inputs
                .iter()
                .map(|input| read_api(input))
                .collect::<Result<Vec<_>>>()?;
            info!(apis = %apis.iter().map(|api| &api.name).join(", "), "Read API descriptions");

            let sdk = CodegenSdk::new(config)
                .into_diagnostic()
                .context("Invalid brand")?;

            info!(output = %output.display(), brand = sdk.names().brand(), "Writing generated SDK");
            gdgen_codegen_gdscript::write_sdk_to_disk(&output, &sdk, &apis)?;

            info!("Generation complete");
        }
    }

    Ok(())
}

/// Reads an API description, choosing the format by file extension.
fn read_api(input: &Path) -> Result<ApiDescription> {
    let source = std::fs::read_to_string(input)
        .into_diagnostic()
        .with_context(|| format!("Failed to read `{}`", input.display()))?;

    let api = match input.extension().and_then(|ext| ext.to_str()) {
        Some("json") => ApiDescription::from_json(&source),
        Some("yaml" | "yml") => ApiDescription::from_yaml(&source),
        _ => miette::bail!(
            "Unsupported API description `{}`; expected a `.json` or `.yaml` file",
            input.display()
        ),
    };
    api.into_diagnostic()
        .with_context(|| format!("Failed to parse `{}`", input.display()))
}

/// Logs to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose { "gdgen=debug" } else { "gdgen=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}
