//! Syntax tree types for JavaScript, shared by the emitter and the static
//! semantics checker.
//!
//! Trees are normally produced by a parser; [`build`] offers constructors for
//! synthesizing them directly.

pub mod ast;
pub mod build;
pub mod loc;
pub mod num;
pub mod operator;
