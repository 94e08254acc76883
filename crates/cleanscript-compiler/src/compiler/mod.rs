//! JavaScript code generation.
//!
//! Transforms a parsed [`Program`](crate::ast::Program) into JavaScript text.
//!
//! # Module Structure
//!
//! - `codegen`: AST walk and lowering rules
//! - `helpers`: runtime helper sources and the flags that select them

pub mod codegen;
pub mod helpers;

pub use codegen::Compiler;
pub use helpers::HelperFlags;
