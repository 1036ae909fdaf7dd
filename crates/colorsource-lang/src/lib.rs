#![warn(missing_docs)]
//! Language-name resolution for `colorsource`.
//!
//! Highlighting takes a compiled [`GrammarTable`](colorsource_core::GrammarTable); this crate
//! turns a name such as `"c"` into one. [`GrammarRegistry`] ships a few built-in grammars and can
//! be extended with registrations and directories of YAML/JSON grammar files.

mod error;
mod registry;

pub use error::LoadError;
pub use registry::{GrammarRegistry, GrammarSource};
