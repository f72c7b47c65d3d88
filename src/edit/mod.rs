//! Edit actions - what gets done to each region the walker visits.
//!
//! An [`EditAction`] says what happens to a span or a point, an [`Operator`]
//! says which spans around a match it is applied to, and
//! [`operator::apply`] ties both to the walker for one pattern run.

pub mod action;
pub mod operator;
pub mod transform;

pub use action::{EditAction, EditState};
pub use operator::{Operator, apply};
pub use transform::Transformation;
