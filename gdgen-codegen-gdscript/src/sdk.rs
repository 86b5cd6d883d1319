use std::collections::HashSet;

use chrono::{DateTime, Utc};
use gdgen_core::{
    ir::{NamingError, Rename, Sanitized, transform},
    parse::{ApiCall, ApiDescription, Datatype},
};
use miette::Result;
use tracing::debug;

use super::{
    client::CodegenClient,
    config::CodegenConfig,
    emit::is_identifier,
    models::CodegenModels,
    naming::{CodegenNames, method_name},
};

/// Everything that's shared between the generated scripts of an SDK.
#[derive(Clone, Debug)]
pub struct CodegenSdk {
    config: CodegenConfig,
    names: CodegenNames,
    now: DateTime<Utc>,
}

impl CodegenSdk {
    /// Creates an SDK context that decides deprecation severities
    /// against the current time.
    pub fn new(config: CodegenConfig) -> Result<Self, NamingError> {
        Self::with_now(config, Utc::now())
    }

    pub fn with_now(config: CodegenConfig, now: DateTime<Utc>) -> Result<Self, NamingError> {
        // The brand names the addon directory and prefixes class names.
        if !is_identifier(&config.brand) {
            return Err(NamingError::InvalidBrand(config.brand));
        }
        let names = CodegenNames::new(&config.brand)?;
        Ok(Self { config, names, now })
    }

    #[inline]
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    #[inline]
    pub fn names(&self) -> &CodegenNames {
        &self.names
    }

    #[inline]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Sanitizes an API description, and checks that every name in it
    /// is usable in generated code.
    pub fn api(&self, api: &ApiDescription) -> Result<CodegenApi<'_>> {
        let sanitized = transform(api, self.names.sanitizer());
        debug!(
            api = %api.name,
            datatypes = sanitized.api.datatypes.len(),
            calls = sanitized.api.calls.len(),
            renames = sanitized.renames.len(),
            "Sanitized API"
        );
        validate(&sanitized.api)?;
        Ok(CodegenApi {
            sdk: self,
            sanitized,
        })
    }
}

/// A sanitized API, ready for rendering.
#[derive(Debug)]
pub struct CodegenApi<'a> {
    sdk: &'a CodegenSdk,
    sanitized: Sanitized,
}

impl<'a> CodegenApi<'a> {
    #[inline]
    pub fn sdk(&self) -> &'a CodegenSdk {
        self.sdk
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.sanitized.api.name
    }

    #[inline]
    pub fn renames(&self) -> &[Rename] {
        &self.sanitized.renames
    }

    pub fn datatypes(&self) -> impl Iterator<Item = &Datatype> {
        self.sanitized.api.datatypes.iter()
    }

    pub fn calls(&self) -> impl Iterator<Item = &ApiCall> {
        self.sanitized.api.calls.iter()
    }

    pub fn models(&self) -> CodegenModels<'_> {
        CodegenModels::new(self)
    }

    pub fn client(&self) -> CodegenClient<'_> {
        CodegenClient::new(self)
    }
}

fn validate(api: &ApiDescription) -> Result<()> {
    if !is_identifier(&api.name) {
        miette::bail!("API name `{}` isn't a valid GDScript identifier", api.name);
    }

    let mut classes = HashSet::new();
    for datatype in &api.datatypes {
        if !is_identifier(&datatype.name) {
            miette::bail!(
                "datatype `{}` in API `{}` isn't a valid GDScript identifier",
                datatype.name,
                api.name
            );
        }
        if !classes.insert(datatype.name.as_str()) {
            miette::bail!(
                "API `{}` defines datatype `{}` more than once",
                api.name,
                datatype.name
            );
        }
    }

    for datatype in &api.datatypes {
        let mut members = HashSet::new();
        for property in &datatype.properties {
            if !is_identifier(&property.name) {
                miette::bail!(
                    "property `{}.{}` in API `{}` isn't a valid GDScript identifier",
                    datatype.name,
                    property.name,
                    api.name
                );
            }
            if !members.insert(property.name.as_str()) {
                miette::bail!(
                    "datatype `{}` in API `{}` defines property `{}` more than once",
                    datatype.name,
                    api.name,
                    property.name
                );
            }
            if let Some(target) = property.actual_type.complex()
                && !classes.contains(target)
            {
                miette::bail!(
                    "property `{}.{}` in API `{}` refers to unknown datatype `{target}`",
                    datatype.name,
                    property.name,
                    api.name
                );
            }
        }
    }

    let mut methods = HashSet::new();
    for call in &api.calls {
        let method = method_name(&call.name);
        if !is_identifier(&method) {
            miette::bail!(
                "call `{}` in API `{}` isn't a valid GDScript identifier",
                call.name,
                api.name
            );
        }
        if !methods.insert(method) {
            miette::bail!(
                "call `{}` in API `{}` has the same function name as another call",
                call.name,
                api.name
            );
        }
    }

    Ok(())
}
