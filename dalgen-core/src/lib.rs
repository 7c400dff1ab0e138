//! Shared utilities for the dalgen generator crates.

mod file;
mod naming;

pub use file::OutputFile;
pub use naming::{to_constant_case, to_pascal_case};
