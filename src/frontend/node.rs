//! AST node base and the two-phase build protocol
//!
//! A node is constructed from its CST node (children are built eagerly but
//! left unprocessed), then `process` runs the node specific analysis exactly
//! once and stores the resulting semantic data. Parents process their
//! children before reading the children's data.

use crate::frontend::context::Context;
use crate::frontend::cst::HasRange;
use crate::utils::{Error, Result, SourceRange};
use serde::Serialize;

/// Lightweight handle identifying an AST node in incidents and scope owners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    pub kind: &'static str,
    pub range: SourceRange,
}

/// Node specific behaviour plugged into [`Node`]
pub trait NodeKind<'a>: Sized {
    /// CST node this kind wraps
    type Cst: HasRange + 'a;
    /// Semantic data produced by processing
    type Data;

    /// Human readable node name used in diagnostics
    const NAME: &'static str;

    /// Build the node and its (unprocessed) children
    fn build(cst: &'a Self::Cst) -> Self;

    /// Analyse the node. Called at most once.
    fn on_process(
        &mut self,
        cst: &'a Self::Cst,
        this: NodeRef,
        context: &mut Context,
    ) -> Result<Self::Data>;
}

/// An AST node: one CST node plus its semantic data once processed
pub struct Node<'a, K: NodeKind<'a>> {
    cst: &'a K::Cst,
    meta: SourceRange,
    kind: K,
    data: Option<K::Data>,
}

impl<'a, K: NodeKind<'a>> Node<'a, K> {
    pub fn new(cst: &'a K::Cst) -> Self {
        Self {
            cst,
            meta: cst.range(),
            kind: K::build(cst),
            data: None,
        }
    }

    /// Process the node and hand it back, for inline construction.
    pub fn process(mut self, context: &mut Context) -> Result<Self> {
        self.process_mut(context)?;
        Ok(self)
    }

    /// Process the node in place. A processed node is left untouched.
    pub fn process_mut(&mut self, context: &mut Context) -> Result<()> {
        if self.data.is_some() {
            return Ok(());
        }

        let this = self.node_ref();
        let data = self.kind.on_process(self.cst, this, context)?;
        self.data = Some(data);
        Ok(())
    }

    /// Semantic data. Fails when the node was not processed yet.
    pub fn data(&self) -> Result<&K::Data> {
        self.data.as_ref().ok_or(Error::NotYetProcessed {
            node: K::NAME,
            range: self.meta,
        })
    }

    pub fn is_processed(&self) -> bool {
        self.data.is_some()
    }

    pub fn cst(&self) -> &'a K::Cst {
        self.cst
    }

    pub fn meta(&self) -> SourceRange {
        self.meta
    }

    /// Node specific part, holding the children
    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn node_ref(&self) -> NodeRef {
        NodeRef {
            kind: K::NAME,
            range: self.meta,
        }
    }
}
