//! Core types for toolmock.

mod resolution;
mod tool;

pub use resolution::*;
pub use tool::*;
