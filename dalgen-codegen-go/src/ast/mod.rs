//! Small builders for Go declarations.

mod fns;
mod structs;

pub use fns::{GoFunc, Param};
pub use structs::{GoField, GoStruct};
