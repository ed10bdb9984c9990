//! Top level declarations and the document root
//!
//! Type-like declarations and function signatures are collected before any
//! global initializer or function body is analysed. See [`DocumentNode`].

pub mod document;
pub mod enumeration;
pub mod function;
pub mod structure;
pub mod variable;

use crate::frontend::context::Context;
use crate::frontend::cst::DeclarationCst;
use crate::frontend::node::{Node, NodeRef};
use crate::utils::Result;

pub use document::{analyze_document, DocumentData, DocumentNode};
pub use enumeration::EnumNode;
pub use function::{collect_signature, FunctionData, FunctionNode};
pub use structure::{AliasNode, StructNode};
pub use variable::GlobalVariableNode;

/// Any top level declaration
pub enum Declaration<'a> {
    Function(Node<'a, FunctionNode<'a>>),
    Enum(Node<'a, EnumNode>),
    Struct(Node<'a, StructNode>),
    Alias(Node<'a, AliasNode>),
    Variable(Node<'a, GlobalVariableNode<'a>>),
}

macro_rules! for_each_declaration {
    ($declaration:expr, $node:ident => $body:expr) => {
        match $declaration {
            Declaration::Function($node) => $body,
            Declaration::Enum($node) => $body,
            Declaration::Struct($node) => $body,
            Declaration::Alias($node) => $body,
            Declaration::Variable($node) => $body,
        }
    };
}

impl<'a> Declaration<'a> {
    pub fn new(cst: &'a DeclarationCst) -> Self {
        match cst {
            DeclarationCst::Function(cst) => Self::Function(Node::new(cst)),
            DeclarationCst::Enum(cst) => Self::Enum(Node::new(cst)),
            DeclarationCst::Struct(cst) => Self::Struct(Node::new(cst)),
            DeclarationCst::Alias(cst) => Self::Alias(Node::new(cst)),
            DeclarationCst::Variable(cst) => Self::Variable(Node::new(cst)),
        }
    }

    pub fn process_mut(&mut self, context: &mut Context) -> Result<()> {
        for_each_declaration!(self, node => node.process_mut(context))
    }

    pub fn is_processed(&self) -> bool {
        for_each_declaration!(self, node => node.is_processed())
    }

    pub fn node_ref(&self) -> NodeRef {
        for_each_declaration!(self, node => node.node_ref())
    }
}
