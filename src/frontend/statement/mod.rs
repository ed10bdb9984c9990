//! Statement analysis
//!
//! Statements open the scopes their control flow needs (`Loop` for loops,
//! `Switch` for switches, `Inherit` for blocks) and check control flow
//! keywords against the enclosing scopes.

pub mod assignment;
pub mod block;
pub mod branch;
pub mod call;
pub mod declaration;
pub mod flow;
pub mod loops;

use crate::frontend::context::Context;
use crate::frontend::cst::StatementCst;
use crate::frontend::expression::ExpressionData;
use crate::frontend::node::{Node, NodeRef};
use crate::types::Type;
use crate::utils::Result;

pub use assignment::{AssignmentOperator, AssignmentStatement, IncrementDecrementStatement, StepOperator};
pub use block::{BlockData, BlockStatement};
pub use branch::{ElseBranch, IfStatement, SwitchCase, SwitchData, SwitchStatement};
pub use call::FunctionCallStatement;
pub use declaration::{VariableDeclarationData, VariableDeclarationStatement};
pub use flow::{BreakStatement, ContinueStatement, DiscardStatement, ReturnData, ReturnStatement};
pub use loops::{DoWhileStatement, ForStatement, WhileStatement};

/// Any statement node
pub enum Statement<'a> {
    Block(Node<'a, BlockStatement<'a>>),
    If(Node<'a, IfStatement<'a>>),
    While(Node<'a, WhileStatement<'a>>),
    DoWhile(Node<'a, DoWhileStatement<'a>>),
    For(Node<'a, ForStatement<'a>>),
    Switch(Node<'a, SwitchStatement<'a>>),
    Assignment(Node<'a, AssignmentStatement<'a>>),
    IncrementDecrement(Node<'a, IncrementDecrementStatement<'a>>),
    VariableDeclaration(Node<'a, VariableDeclarationStatement<'a>>),
    Return(Node<'a, ReturnStatement<'a>>),
    Break(Node<'a, BreakStatement>),
    Continue(Node<'a, ContinueStatement>),
    Discard(Node<'a, DiscardStatement>),
    FunctionCall(Node<'a, FunctionCallStatement<'a>>),
}

macro_rules! for_each_statement {
    ($statement:expr, $node:ident => $body:expr) => {
        match $statement {
            Statement::Block($node) => $body,
            Statement::If($node) => $body,
            Statement::While($node) => $body,
            Statement::DoWhile($node) => $body,
            Statement::For($node) => $body,
            Statement::Switch($node) => $body,
            Statement::Assignment($node) => $body,
            Statement::IncrementDecrement($node) => $body,
            Statement::VariableDeclaration($node) => $body,
            Statement::Return($node) => $body,
            Statement::Break($node) => $body,
            Statement::Continue($node) => $body,
            Statement::Discard($node) => $body,
            Statement::FunctionCall($node) => $body,
        }
    };
}

impl<'a> Statement<'a> {
    pub fn new(cst: &'a StatementCst) -> Self {
        match cst {
            StatementCst::Block(cst) => Self::Block(Node::new(cst)),
            StatementCst::If(cst) => Self::If(Node::new(cst)),
            StatementCst::While(cst) => Self::While(Node::new(cst)),
            StatementCst::DoWhile(cst) => Self::DoWhile(Node::new(cst)),
            StatementCst::For(cst) => Self::For(Node::new(cst)),
            StatementCst::Switch(cst) => Self::Switch(Node::new(cst)),
            StatementCst::Assignment(cst) => Self::Assignment(Node::new(cst)),
            StatementCst::IncrementDecrement(cst) => Self::IncrementDecrement(Node::new(cst)),
            StatementCst::VariableDeclaration(cst) => Self::VariableDeclaration(Node::new(cst)),
            StatementCst::Return(cst) => Self::Return(Node::new(cst)),
            StatementCst::Break(cst) => Self::Break(Node::new(cst)),
            StatementCst::Continue(cst) => Self::Continue(Node::new(cst)),
            StatementCst::Discard(cst) => Self::Discard(Node::new(cst)),
            StatementCst::FunctionCall(cst) => Self::FunctionCall(Node::new(cst)),
        }
    }

    pub fn process(mut self, context: &mut Context) -> Result<Self> {
        self.process_mut(context)?;
        Ok(self)
    }

    pub fn process_mut(&mut self, context: &mut Context) -> Result<()> {
        for_each_statement!(self, node => node.process_mut(context))
    }

    pub fn is_processed(&self) -> bool {
        for_each_statement!(self, node => node.is_processed())
    }

    pub fn node_ref(&self) -> NodeRef {
        for_each_statement!(self, node => node.node_ref())
    }
}

/// Report a condition that is not boolean. Invalid conditions were
/// already reported where they failed.
pub(crate) fn check_condition(condition: &ExpressionData, construct: &str, this: NodeRef, context: &mut Context) {
    let ty = &condition.resolve_type;
    if !ty.is_invalid() && !ty.is_implicit_castable_into(&Type::BOOL) {
        context.push_incident(
            format!("Condition of {} must be a bool, found {}", construct, ty),
            Some(this),
        );
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::frontend::context::{ScopeKind, ScopeOwner};
    use crate::frontend::symbols::{FunctionDeclaration, FunctionHeader, HeaderType};
    use crate::utils::SourceRange;
    use std::rc::Rc;

    pub use crate::frontend::expression::test_support::{context, declare};

    /// Analyse `statement` inside a function returning `return_type`
    pub fn analyze_in_function<'a>(
        context: &mut Context,
        return_type: Type,
        statement: &'a StatementCst,
    ) -> Statement<'a> {
        let declaration = Rc::new(FunctionDeclaration {
            name: "test".to_string(),
            headers: vec![FunctionHeader {
                parameters: Vec::new(),
                generics: Vec::new(),
                return_type: HeaderType::Concrete(return_type),
            }],
            range: Some(SourceRange::dummy()),
        });
        let owner = ScopeOwner::Function {
            node: NodeRef { kind: "function declaration", range: SourceRange::dummy() },
            declaration,
        };
        context
            .push_scope(ScopeKind::Function, owner, |context| Statement::new(statement).process(context))
            .unwrap()
    }
}
