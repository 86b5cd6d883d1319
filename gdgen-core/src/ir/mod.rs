mod call;
mod deprecation;
mod error;
mod naming;
mod settings;
mod transform;

#[cfg(test)]
mod tests;

pub use call::*;
pub use deprecation::*;
pub use error::NamingError;
pub use naming::{NameSanitizer, ReservedNames};
pub use settings::*;
pub use transform::{Rename, Sanitized, transform};
