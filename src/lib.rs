//! PGSL semantic analysis core
//!
//! Takes the concrete syntax tree of a PGSL document, builds the typed AST
//! and reports every problem found as an incident on the
//! [`Context`](frontend::context::Context).

pub mod utils;
pub mod types;
pub mod frontend;
pub mod stdlib;
pub mod feedback;
