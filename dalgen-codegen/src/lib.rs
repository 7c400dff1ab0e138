//! Language-neutral emission support for the dalgen generator.
//!
//! Two concerns live here, both independent of the target language:
//!
//! - [`builder`]: the indented text builder all backends render through;
//! - [`plan`]: the per-table emission policies (field inclusion, index-prefix
//!   lookup planning) computed once before any text is produced.

pub mod builder;
mod error;
pub mod plan;

pub use builder::{CodeBuilder, Emit, Indent};
pub use error::{Error, Result};
pub use plan::{LookupKind, LookupSpec, TablePlan};
