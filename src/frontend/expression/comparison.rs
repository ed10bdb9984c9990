//! `== != < <= > >=`

use super::{Expression, ExpressionData, OperatorExpressionData};
use crate::frontend::context::Context;
use crate::frontend::cst::BinaryExpressionCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::Type;
use crate::utils::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl ComparisonOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        let operator = match token {
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            _ => return None,
        };
        Some(operator)
    }

    /// `<`, `<=`, `>` and `>=`
    pub fn is_ordering(&self) -> bool {
        !matches!(self, Self::Equal | Self::NotEqual)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        })
    }
}

pub struct ComparisonExpression<'a> {
    pub left: Box<Expression<'a>>,
    pub right: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for ComparisonExpression<'a> {
    type Cst = BinaryExpressionCst;
    type Data = OperatorExpressionData<ComparisonOperator>;

    const NAME: &'static str = "comparison expression";

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

        let operator = ComparisonOperator::from_token(&cst.operator).unwrap_or_else(|| {
            context.push_incident(format!("Unknown comparison operator '{}'", cst.operator), Some(this));
            ComparisonOperator::Equal
        });

        let (left_type, right_type) = (&left.resolve_type, &right.resolve_type);
        if !left_type.is_invalid() && !right_type.is_invalid() {
            check_operands(operator, left_type, right_type, this, context);
        }

        // Vectors compare component-wise
        let resolve_type = match left_type {
            Type::Vector { dimension, .. } => Type::vector(*dimension, Type::BOOL),
            _ => Type::BOOL,
        };

        Ok(OperatorExpressionData {
            expression: ExpressionData::value(resolve_type, left.fixed_state.min(right.fixed_state)),
            operator,
        })
    }
}

fn check_operands(operator: ComparisonOperator, left: &Type, right: &Type, this: NodeRef, context: &mut Context) {
    if !left.is_mutually_castable(right) {
        context.push_incident(
            format!("Can't compare {} with {}", left, right),
            Some(this),
        );
        return;
    }

    let element = left.element_type();
    let comparable = match element {
        Type::Numeric(_) => true,
        Type::Boolean | Type::Enum { .. } => !operator.is_ordering(),
        _ => false,
    };
    if !comparable {
        let message = if operator.is_ordering() {
            format!("Operator '{}' needs numeric operands, found {}", operator, left)
        } else {
            format!("Values of type {} can't be compared", left)
        };
        context.push_incident(message, Some(this));
    }
}
