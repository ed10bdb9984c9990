//! `& | ^ << >>` over integer scalars and vectors

use super::{is_integer_castable, Expression, ExpressionData, OperatorExpressionData};
use crate::frontend::context::Context;
use crate::frontend::cst::BinaryExpressionCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::Type;
use crate::utils::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitwiseOperator {
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRight,
}

impl BitwiseOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        let operator = match token {
            "&" => Self::And,
            "|" => Self::Or,
            "^" => Self::Xor,
            "<<" => Self::ShiftLeft,
            ">>" => Self::ShiftRight,
            _ => return None,
        };
        Some(operator)
    }

    pub fn is_shift(&self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }
}

impl fmt::Display for BitwiseOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
        })
    }
}

pub struct BitwiseExpression<'a> {
    pub left: Box<Expression<'a>>,
    pub right: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for BitwiseExpression<'a> {
    type Cst = BinaryExpressionCst;
    type Data = OperatorExpressionData<BitwiseOperator>;

    const NAME: &'static str = "bit operation expression";

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

        let operator = BitwiseOperator::from_token(&cst.operator).unwrap_or_else(|| {
            context.push_incident(format!("Unknown bit operator '{}'", cst.operator), Some(this));
            BitwiseOperator::And
        });

        let resolve_type = result_type(operator, left, right, this, context);
        let fixed_state = left.fixed_state.min(right.fixed_state);

        Ok(OperatorExpressionData {
            expression: ExpressionData::value(resolve_type, fixed_state),
            operator,
        })
    }
}

fn dimension(ty: &Type) -> u8 {
    match ty {
        Type::Vector { dimension, .. } => *dimension,
        _ => 1,
    }
}

/// Result type of a bit operation. Shifts keep the left type, the other
/// operators widen to the common type of both sides.
pub(crate) fn result_type(
    operator: BitwiseOperator,
    left: &ExpressionData,
    right: &ExpressionData,
    this: NodeRef,
    context: &mut Context,
) -> Type {
    let (left_type, right_type) = (&left.resolve_type, &right.resolve_type);
    if left_type.is_invalid() || right_type.is_invalid() {
        return Type::Invalid;
    }

    let mut valid = true;
    for side in [left_type, right_type] {
        if !is_integer_castable(side.element_type()) {
            context.push_incident(
                format!("Bit operation '{}' needs integer operands, found {}", operator, side),
                Some(this),
            );
            valid = false;
        }
    }
    if !valid {
        return Type::Invalid;
    }

    if dimension(left_type) != dimension(right_type) {
        context.push_incident(
            format!("Operands of '{}' differ in dimension: {} and {}", operator, left_type, right_type),
            Some(this),
        );
        return Type::Invalid;
    }

    if operator.is_shift() {
        if !left.is_storage {
            context.push_incident(format!("Left side of '{}' must be a storage location", operator), Some(this));
        }
        if !right_type.element_type().is_implicit_castable_into(&Type::U32) {
            context.push_incident(
                format!("Shift amount must be unsigned, found {}", right_type),
                Some(this),
            );
        }
        return left_type.clone();
    }

    if !left_type.element_type().is_mutually_castable(right_type.element_type()) {
        context.push_incident(
            format!("Can't apply '{}' to {} and {}", operator, left_type, right_type),
            Some(this),
        );
    }
    left_type.common_type(right_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::cst::build::{bitwise, literal, var};
    use crate::frontend::expression::test_support::{analyze, context, declare};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_and_widens_literal() {
        let mut context = context();
        declare(&mut context, "mask", Type::U32);
        let data = analyze(&mut context, &bitwise(var("mask"), "&", literal("0xFF")));
        assert_eq!(data.resolve_type, Type::U32);
        assert!(context.incidents().is_empty());
    }

    #[test]
    fn test_float_operand_rejected() {
        let mut context = context();
        declare(&mut context, "x", Type::F32);
        let data = analyze(&mut context, &bitwise(var("x"), "|", literal("1")));
        assert_eq!(data.resolve_type, Type::Invalid);
        assert_eq!(context.incidents().len(), 1);
    }

    #[test]
    fn test_shift_of_variable() {
        let mut context = context();
        declare(&mut context, "bits", Type::I32);
        let data = analyze(&mut context, &bitwise(var("bits"), "<<", literal("2u")));
        assert_eq!(data.resolve_type, Type::I32);
        assert!(context.incidents().is_empty());
    }

    #[test]
    fn test_shift_needs_storage_and_unsigned_amount() {
        let mut context = context();
        declare(&mut context, "amount", Type::I32);
        analyze(&mut context, &bitwise(literal("1"), ">>", var("amount")));
        assert_eq!(context.incidents().len(), 2);
    }

    #[test]
    fn test_vector_dimensions_must_match() {
        let mut context = context();
        declare(&mut context, "a", Type::vector(2, Type::U32));
        declare(&mut context, "b", Type::vector(3, Type::U32));
        let data = analyze(&mut context, &bitwise(var("a"), "^", var("b")));
        assert_eq!(data.resolve_type, Type::Invalid);
        assert_eq!(context.incidents().len(), 1);
    }
}
