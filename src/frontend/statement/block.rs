//! `{ ... }`

use super::Statement;
use crate::frontend::context::{Context, ScopeKind, ScopeOwner};
use crate::frontend::cst::BlockCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::Type;
use crate::utils::Result;

/// Control flow facts of the block's direct statements. Nested blocks and
/// branches don't count.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockData {
    /// Type of the first direct `return`, `void` without one
    pub return_type: Type,
    pub is_breaking: bool,
    pub is_continuing: bool,
}

pub struct BlockStatement<'a> {
    pub statements: Vec<Statement<'a>>,
}

impl<'a> NodeKind<'a> for BlockStatement<'a> {
    type Cst = BlockCst;
    type Data = BlockData;

    const NAME: &'static str = "block statement";

    fn build(cst: &'a BlockCst) -> Self {
        Self {
            statements: cst.statements.iter().map(Statement::new).collect(),
        }
    }

    fn on_process(&mut self, _cst: &'a BlockCst, this: NodeRef, context: &mut Context) -> Result<BlockData> {
        context.push_scope(ScopeKind::Inherit, ScopeOwner::Node(this), |context| {
            for statement in &mut self.statements {
                statement.process_mut(context)?;
            }
            Ok(())
        })?;

        let mut data = BlockData {
            return_type: Type::Void,
            is_breaking: false,
            is_continuing: false,
        };
        let mut returned = false;
        for statement in &self.statements {
            match statement {
                Statement::Return(node) if !returned => {
                    data.return_type = node.data()?.value_type.clone();
                    returned = true;
                }
                Statement::Break(_) => data.is_breaking = true,
                Statement::Continue(_) => data.is_continuing = true,
                _ => {}
            }
        }
        Ok(data)
    }
}
