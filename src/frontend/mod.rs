//! Frontend module - syntax tree input and semantic analysis

pub mod cst;
pub mod node;
pub mod context;
pub mod symbols;
pub mod type_reference;
pub mod expression;
pub mod statement;
pub mod declaration;
pub mod overload;
