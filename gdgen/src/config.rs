use std::{io::ErrorKind as IoErrorKind, path::PathBuf};

use clap::{
    CommandFactory, FromArgMatches,
    error::{ErrorKind as ClapErrorKind, Result as ClapResult},
};
use gdgen_codegen_gdscript::CodegenConfig;
use semver::Version;
use serde::Deserialize;

/// The config file that `codegen` reads from the output directory.
pub const CONFIG_FILE_NAME: &str = ".gdgen.toml";

#[derive(Debug)]
pub struct Main {
    pub verbose: bool,
    pub command: Command,
}

impl Main {
    pub fn parse() -> ClapResult<Main> {
        let mut cmd = MainArgs::command();
        let mut matches = cmd
            .try_get_matches_from_mut(std::env::args_os())
            .map_err(|err| err.format(&mut cmd))?;
        let args =
            MainArgs::from_arg_matches_mut(&mut matches).map_err(|err| err.format(&mut cmd))?;

        let command = match args.command {
            CommandArgs::Codegen(CodegenArgs {
                output,
                inputs,
                gdscript,
            }) => {
                let file: Option<ConfigFile> = {
                    let path = output.join(CONFIG_FILE_NAME);
                    match std::fs::read_to_string(&path) {
                        Ok(contents) => Some(toml::from_str(&contents).map_err(|err| {
                            cmd.error(
                                ClapErrorKind::ValueValidation,
                                format!("Failed to parse `{}`: {err}", path.display()),
                            )
                        })?),
                        Err(err) if err.kind() == IoErrorKind::NotFound => None,
                        Err(err) => {
                            return Err(cmd.error(
                                ClapErrorKind::Io,
                                format!("Failed to read `{}`: {err}", path.display()),
                            ));
                        }
                    }
                };

                let config = match file {
                    Some(ConfigFile {
                        gdscript: Some(file),
                    }) => gdscript.merge(file),
                    _ => gdscript.merge(CodegenConfig::default()),
                };

                Command::Codegen(Codegen {
                    inputs,
                    output,
                    config,
                })
            }
        };

        Ok(Main {
            verbose: args.verbose,
            command,
        })
    }
}

#[derive(Debug)]
pub enum Command {
    Codegen(Codegen),
}

#[derive(Debug)]
pub struct Codegen {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub config: CodegenConfig,
}

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = None)]
struct MainArgs {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: CommandArgs,
}

#[derive(Debug, clap::Subcommand)]
enum CommandArgs {
    /// Generate a GDScript SDK from one or more API descriptions.
    Codegen(CodegenArgs),
}

#[derive(Debug, clap::Args)]
struct CodegenArgs {
    /// The output directory. Scripts are written to `addons/<brand>/`
    /// under this directory.
    output: PathBuf,

    /// The paths to the API descriptions (`.json` or `.yaml`). The first
    /// one provides the error catalog.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    gdscript: GdScriptArgs,
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Generated SDK options")]
struct GdScriptArgs {
    /// The brand that prefixes generated class names, and datatype names
    /// that collide with Godot classes. Defaults to `PlayFab`.
    #[arg(long)]
    brand: Option<String>,

    /// The SDK version to embed in the settings script.
    #[arg(long)]
    sdk_version: Option<Version>,

    /// The build identifier to embed in the settings script.
    #[arg(long)]
    build_identifier: Option<String>,

    /// The default vertical name in the settings script.
    #[arg(long)]
    vertical_name: Option<String>,
}

impl GdScriptArgs {
    /// Overrides the values from the config file with any that were
    /// passed on the command line.
    fn merge(self, file: CodegenConfig) -> CodegenConfig {
        CodegenConfig {
            brand: self.brand.unwrap_or(file.brand),
            sdk_version: self.sdk_version.or(file.sdk_version),
            build_identifier: self.build_identifier.or(file.build_identifier),
            vertical_name: self.vertical_name.or(file.vertical_name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    gdscript: Option<CodegenConfig>,
}
