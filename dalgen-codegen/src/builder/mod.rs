//! Text-building primitives shared by all emission backends.

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;

/// A node that can render itself into a [`CodeBuilder`].
pub trait Emit {
    fn emit(&self, b: &mut CodeBuilder);
}
