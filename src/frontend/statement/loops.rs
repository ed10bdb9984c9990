//! `while`, `do ... while` and `for`

use super::block::BlockStatement;
use super::declaration::VariableDeclarationStatement;
use super::{check_condition, Statement};
use crate::frontend::context::{Context, ScopeKind, ScopeOwner};
use crate::frontend::cst::{ForCst, StatementCst, WhileCst};
use crate::frontend::expression::{process_optional, Expression};
use crate::frontend::node::{Node, NodeKind, NodeRef};
use crate::utils::Result;

pub struct WhileStatement<'a> {
    pub condition: Expression<'a>,
    pub block: Node<'a, BlockStatement<'a>>,
}

impl<'a> NodeKind<'a> for WhileStatement<'a> {
    type Cst = WhileCst;
    type Data = ();

    const NAME: &'static str = "while statement";

    fn build(cst: &'a WhileCst) -> Self {
        Self {
            condition: Expression::new(&cst.expression),
            block: Node::new(&cst.block),
        }
    }

    fn on_process(&mut self, _cst: &'a WhileCst, this: NodeRef, context: &mut Context) -> Result<()> {
        let Self { condition, block } = self;
        context.push_scope(ScopeKind::Loop, ScopeOwner::Node(this), |context| {
            condition.process_mut(context)?;
            check_condition(condition.data()?, "while", this, context);
            block.process_mut(context)
        })
    }
}

/// Like `while`, but the body comes first
pub struct DoWhileStatement<'a> {
    pub block: Node<'a, BlockStatement<'a>>,
    pub condition: Expression<'a>,
}

impl<'a> NodeKind<'a> for DoWhileStatement<'a> {
    type Cst = WhileCst;
    type Data = ();

    const NAME: &'static str = "do while statement";

    fn build(cst: &'a WhileCst) -> Self {
        Self {
            block: Node::new(&cst.block),
            condition: Expression::new(&cst.expression),
        }
    }

    fn on_process(&mut self, _cst: &'a WhileCst, this: NodeRef, context: &mut Context) -> Result<()> {
        let Self { block, condition } = self;
        context.push_scope(ScopeKind::Loop, ScopeOwner::Node(this), |context| {
            block.process_mut(context)?;
            condition.process_mut(context)?;
            check_condition(condition.data()?, "do while", this, context);
            Ok(())
        })
    }
}

/// `for (init; condition; update) { }`. The init binding is visible in the
/// condition, the update and the body.
pub struct ForStatement<'a> {
    pub init: Option<Node<'a, VariableDeclarationStatement<'a>>>,
    pub condition: Option<Expression<'a>>,
    pub update: Option<Box<Statement<'a>>>,
    pub block: Node<'a, BlockStatement<'a>>,
}

impl<'a> NodeKind<'a> for ForStatement<'a> {
    type Cst = ForCst;
    type Data = ();

    const NAME: &'static str = "for statement";

    fn build(cst: &'a ForCst) -> Self {
        Self {
            init: cst.init.as_ref().map(Node::new),
            condition: cst.expression.as_ref().map(Expression::new),
            update: cst.update.as_deref().map(|update| Box::new(Statement::new(update))),
            block: Node::new(&cst.block),
        }
    }

    fn on_process(&mut self, cst: &'a ForCst, this: NodeRef, context: &mut Context) -> Result<()> {
        if let Some(update) = cst.update.as_deref() {
            if !matches!(
                update,
                StatementCst::Assignment(_) | StatementCst::IncrementDecrement(_) | StatementCst::FunctionCall(_)
            ) {
                context.push_incident(
                    "Update of a for loop must be an assignment, increment, decrement or function call",
                    Some(this),
                );
            }
        }

        let Self { init, condition, update, block } = self;
        context.push_scope(ScopeKind::Loop, ScopeOwner::Node(this), |context| {
            if let Some(init) = init {
                init.process_mut(context)?;
            }
            if let Some(condition) = process_optional(condition, context)? {
                check_condition(condition, "for", this, context);
            }
            if let Some(update) = update {
                update.process_mut(context)?;
            }
            block.process_mut(context)
        })
    }
}
