pub mod codegen;
pub mod error;
pub mod ir;
pub mod parse;

#[cfg(test)]
mod tests;
