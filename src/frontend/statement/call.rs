//! A function call used as a statement

use crate::frontend::context::Context;
use crate::frontend::cst::FunctionCallStatementCst;
use crate::frontend::expression::FunctionCallExpression;
use crate::frontend::node::{Node, NodeKind, NodeRef};
use crate::types::Type;
use crate::utils::Result;

pub struct FunctionCallStatement<'a> {
    pub call: Node<'a, FunctionCallExpression<'a>>,
}

impl<'a> NodeKind<'a> for FunctionCallStatement<'a> {
    type Cst = FunctionCallStatementCst;
    /// Return type of the call, discarded by the statement
    type Data = Type;

    const NAME: &'static str = "function call statement";

    fn build(cst: &'a FunctionCallStatementCst) -> Self {
        Self {
            call: Node::new(&cst.call),
        }
    }

    fn on_process(&mut self, _cst: &'a FunctionCallStatementCst, _this: NodeRef, context: &mut Context) -> Result<Type> {
        self.call.process_mut(context)?;
        Ok(self.call.data()?.expression.resolve_type.clone())
    }
}
