//! Builtin function library
//!
//! Builtins are plain [`FunctionDeclaration`](crate::frontend::symbols::FunctionDeclaration)s
//! without a source range, registered into every document before its own
//! declarations are collected.

mod builtins;

pub use builtins::{register_builtins, BUILTIN_FUNCTIONS};
