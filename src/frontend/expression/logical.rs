//! `&&` and `||`

use super::{Expression, ExpressionData, OperatorExpressionData};
use crate::frontend::context::Context;
use crate::frontend::cst::BinaryExpressionCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::Type;
use crate::utils::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "&&" => Some(Self::And),
            "||" => Some(Self::Or),
            _ => None,
        }
    }
}

pub struct LogicalExpression<'a> {
    pub left: Box<Expression<'a>>,
    pub right: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for LogicalExpression<'a> {
    type Cst = BinaryExpressionCst;
    type Data = OperatorExpressionData<LogicalOperator>;

    const NAME: &'static str = "logical expression";

    fn build(cst: &'a BinaryExpressionCst) -> Self {
        Self {
            left: Expression::boxed(&cst.left),
            right: Expression::boxed(&cst.right),
        }
    }

    fn on_process(&mut self, cst: &'a BinaryExpressionCst, this: NodeRef, context: &mut Context) -> Result<Self::Data> {
        self.left.process_mut(context)?;
        self.right.process_mut(context)?;
        let left = self.left.data()?;
        let right = self.right.data()?;

        let operator = LogicalOperator::from_token(&cst.operator).unwrap_or_else(|| {
            context.push_incident(format!("Unknown logical operator '{}'", cst.operator), Some(this));
            LogicalOperator::And
        });

        for side in [&left.resolve_type, &right.resolve_type] {
            if !side.is_invalid() && !side.is_implicit_castable_into(&Type::BOOL) {
                context.push_incident(
                    format!("Logical operator '{}' needs boolean operands, found {}", cst.operator, side),
                    Some(this),
                );
            }
        }

        Ok(OperatorExpressionData {
            expression: ExpressionData::value(Type::BOOL, left.fixed_state.min(right.fixed_state)),
            operator,
        })
    }
}
