//! The document root
//!
//! Processing order:
//! 1. enums, then structs and aliases in source order
//! 2. every function signature
//! 3. global variables in source order
//! 4. function bodies in source order
//!
//! A struct or alias can only name types declared before it.

use log::info;

use super::{collect_signature, Declaration};
use crate::frontend::context::Context;
use crate::frontend::cst::{DeclarationCst, DocumentCst};
use crate::frontend::node::{Node, NodeKind, NodeRef};
use crate::stdlib::register_builtins;
use crate::utils::Result;

/// Declaration counts of an analysed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentData {
    pub functions: usize,
    pub types: usize,
    pub globals: usize,
}

pub struct DocumentNode<'a> {
    pub declarations: Vec<Declaration<'a>>,
}

impl<'a> DocumentNode<'a> {
    fn process_where(
        &mut self,
        context: &mut Context,
        selected: impl Fn(&Declaration<'a>) -> bool,
    ) -> Result<usize> {
        let mut count = 0;
        for declaration in self.declarations.iter_mut().filter(|declaration| selected(declaration)) {
            declaration.process_mut(context)?;
            count += 1;
        }
        Ok(count)
    }
}

impl<'a> NodeKind<'a> for DocumentNode<'a> {
    type Cst = DocumentCst;
    type Data = DocumentData;

    const NAME: &'static str = "document";

    fn build(cst: &'a DocumentCst) -> Self {
        Self {
            declarations: cst.declarations.iter().map(Declaration::new).collect(),
        }
    }

    fn on_process(&mut self, cst: &'a DocumentCst, this: NodeRef, context: &mut Context) -> Result<DocumentData> {
        context.set_document(this)?;
        register_builtins(context.symbols_mut());

        let enums = self.process_where(context, |d| matches!(d, Declaration::Enum(_)))?;
        let layouts = self.process_where(context, |d| matches!(d, Declaration::Struct(_) | Declaration::Alias(_)))?;

        for declaration in &cst.declarations {
            if let DeclarationCst::Function(function) = declaration {
                collect_signature(function, context);
            }
        }

        let globals = self.process_where(context, |d| matches!(d, Declaration::Variable(_)))?;
        let functions = self.process_where(context, |d| matches!(d, Declaration::Function(_)))?;

        let data = DocumentData {
            functions,
            types: enums + layouts,
            globals,
        };
        info!(
            "analysed document: {} functions, {} types, {} globals, {} incidents",
            data.functions,
            data.types,
            data.globals,
            context.incidents().len()
        );
        Ok(data)
    }
}

/// Analyse a whole document. The context must be fresh.
pub fn analyze_document<'a>(cst: &'a DocumentCst, context: &mut Context) -> Result<Node<'a, DocumentNode<'a>>> {
    Node::new(cst).process(context)
}
