//! Prefix `-`, `!` and `~`

use super::{is_integer_castable, Expression, ExpressionData, OperatorExpressionData};
use crate::frontend::context::Context;
use crate::frontend::cst::UnaryExpressionCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::Type;
use crate::utils::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
    BitwiseNot,
}

impl UnaryOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "-" => Some(Self::Negate),
            "!" => Some(Self::Not),
            "~" => Some(Self::BitwiseNot),
            _ => None,
        }
    }
}

pub struct UnaryExpression<'a> {
    pub expression: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for UnaryExpression<'a> {
    type Cst = UnaryExpressionCst;
    type Data = OperatorExpressionData<UnaryOperator>;

    const NAME: &'static str = "unary expression";

    fn build(cst: &'a UnaryExpressionCst) -> Self {
        Self {
            expression: Expression::boxed(&cst.expression),
        }
    }

    fn on_process(&mut self, cst: &'a UnaryExpressionCst, this: NodeRef, context: &mut Context) -> Result<Self::Data> {
        self.expression.process_mut(context)?;
        let operand = self.expression.data()?;

        let operator = UnaryOperator::from_token(&cst.operator).unwrap_or_else(|| {
            context.push_incident(format!("Unknown unary operator '{}'", cst.operator), Some(this));
            UnaryOperator::Negate
        });

        let ty = &operand.resolve_type;
        let element = ty.element_type();
        let accepted = ty.is_invalid()
            || match operator {
                UnaryOperator::Negate => element.numeric_kind().is_some(),
                UnaryOperator::Not => element.is_implicit_castable_into(&Type::BOOL),
                UnaryOperator::BitwiseNot => is_integer_castable(element),
            };
        if !accepted {
            context.push_incident(
                format!("Operator '{}' can't be applied to {}", cst.operator, ty),
                Some(this),
            );
        }

        let constant_value = match (operator, &operand.constant_value, ty.numeric_kind()) {
            (UnaryOperator::Negate, Some(value), Some(_)) => value.negate(),
            (UnaryOperator::BitwiseNot, Some(value), Some(kind)) => value.bit_not(kind),
            _ => None,
        };

        Ok(OperatorExpressionData {
            expression: ExpressionData {
                constant_value,
                ..ExpressionData::value(ty.clone(), operand.fixed_state)
            },
            operator,
        })
    }
}
