//! Semantic models over rxlint syntax trees.
//!
//! Checks never compute types themselves. They ask a [`SemanticModel`] for
//! the statically inferred [`TypeId`] of a node or symbol and inspect the
//! [`TypeData`] behind it. Two implementations are provided:
//!
//! - [`StaticModel`], assembled directly by a host that already runs a type
//!   checker, and used by tests to build exact type shapes;
//! - [`DeclarationModel`], inferred from the declarations and annotations in
//!   a single file on top of a shared [`Prelude`].
//!
//! Every type lives in a [`TypeTable`] arena owned by the model. Recursive
//! declarations are built by reserving an id first and defining it later, so
//! type graphs may contain cycles; consumers bound their walks.

mod declaration;
mod error;
mod model;
mod prelude;
mod types;

pub use declaration::DeclarationModel;
pub use error::SemanticsError;
pub use model::{SemanticModel, StaticModel, SymbolId};
pub use prelude::Prelude;
pub use types::{
    DeclarationKind, DeclaredType, Member, PrimitiveType, TypeData, TypeId, TypeTable,
};

#[cfg(test)]
mod tests;
