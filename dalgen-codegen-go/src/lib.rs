//! Go emission backend for the dalgen generator.
//!
//! Everything Go-specific lives here: the storage/logical type table, Go
//! naming helpers, small AST builders for structs and functions, and the
//! per-table section emitters that turn a [`dalgen_codegen::TablePlan`] into
//! source text. The output is raw Go meant to be run through `gofmt` by the
//! caller.

pub mod ast;
mod generator;
mod go_file;
mod naming;
mod sections;
mod type_mapper;

pub use ast::{GoField, GoFunc, GoStruct, Param};
pub use generator::Generator;
pub use go_file::GoFile;
pub use naming::param_name;
pub use type_mapper::{TypePair, map_type, type_pair};
