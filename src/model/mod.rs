//! Document model types.
//!
//! This module defines the intermediate representation that bridges
//! parsing of generated text and serialization to output formats.

mod block;
mod document;
mod table;

pub use block::Block;
pub use document::{Document, FrontMatter, Metadata};
pub use table::Table;
