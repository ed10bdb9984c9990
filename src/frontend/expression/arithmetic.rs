//! `+ - * / %` over scalars, vectors and matrices

use super::{Expression, ExpressionData, OperatorExpressionData};
use crate::frontend::context::Context;
use crate::frontend::cst::BinaryExpressionCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::Type;
use crate::utils::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
}

impl ArithmeticOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        let operator = match token {
            "+" => Self::Plus,
            "-" => Self::Minus,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "%" => Self::Modulo,
            _ => return None,
        };
        Some(operator)
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

pub struct ArithmeticExpression<'a> {
    pub left: Box<Expression<'a>>,
    pub right: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for ArithmeticExpression<'a> {
    type Cst = BinaryExpressionCst;
    type Data = OperatorExpressionData<ArithmeticOperator>;

    const NAME: &'static str = "arithmetic expression";

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

        let operator = ArithmeticOperator::from_token(&cst.operator).unwrap_or_else(|| {
            context.push_incident(format!("Unknown arithmetic operator '{}'", cst.operator), Some(this));
            ArithmeticOperator::Plus
        });

        let resolve_type = result_type(operator, &left.resolve_type, &right.resolve_type, this, context);
        let fixed_state = left.fixed_state.min(right.fixed_state);

        Ok(OperatorExpressionData {
            expression: ExpressionData::value(resolve_type, fixed_state),
            operator,
        })
    }
}

/// Operand shape as far as arithmetic cares
enum Shape<'t> {
    Scalar,
    Vector { dimension: u8, inner: &'t Type },
    Matrix { rows: u8, columns: u8, inner: &'t Type },
    Other,
}

impl<'t> Shape<'t> {
    fn of(ty: &'t Type) -> Self {
        match ty {
            Type::Numeric(_) => Self::Scalar,
            Type::Vector { dimension, inner } if inner.numeric_kind().is_some() => Self::Vector {
                dimension: *dimension,
                inner,
            },
            Type::Matrix { rows, columns, inner } => Self::Matrix {
                rows: *rows,
                columns: *columns,
                inner,
            },
            _ => Self::Other,
        }
    }
}

/// Result type of `left operator right`.
///
/// Violations push an incident. Shape errors that leave no sensible result
/// resolve to `Invalid`; element type mismatches keep the best guess so
/// analysis can go on. Invalid operands give `Invalid` without a new incident.
pub(crate) fn result_type(
    operator: ArithmeticOperator,
    left: &Type,
    right: &Type,
    this: NodeRef,
    context: &mut Context,
) -> Type {
    if left.is_invalid() || right.is_invalid() {
        return Type::Invalid;
    }

    let mismatch = |context: &mut Context| {
        context.push_incident(
            format!("Can't apply '{}' to {} and {}", operator, left, right),
            Some(this),
        )
    };

    match (Shape::of(left), Shape::of(right)) {
        (Shape::Scalar, Shape::Scalar) => {
            if !left.is_mutually_castable(right) {
                mismatch(context);
            }
            left.common_type(right)
        }
        (Shape::Scalar, Shape::Vector { inner, .. }) => {
            if !left.is_mutually_castable(inner) {
                mismatch(context);
            }
            right.clone()
        }
        (Shape::Vector { inner, .. }, Shape::Scalar) => {
            if !right.is_mutually_castable(inner) {
                mismatch(context);
            }
            left.clone()
        }
        (Shape::Scalar, Shape::Matrix { inner, .. }) | (Shape::Matrix { inner, .. }, Shape::Scalar) => {
            let (scalar, matrix) = if matches!(left, Type::Matrix { .. }) { (right, left) } else { (left, right) };
            if operator != ArithmeticOperator::Multiply || !scalar.is_implicit_castable_into(inner) {
                mismatch(context);
            }
            matrix.clone()
        }
        (
            Shape::Vector { dimension: left_dimension, inner: left_inner },
            Shape::Vector { dimension: right_dimension, inner: right_inner },
        ) => {
            if left_dimension != right_dimension {
                mismatch(context);
                return Type::Invalid;
            }
            if !left_inner.is_mutually_castable(right_inner) {
                mismatch(context);
            }
            left.common_type(right)
        }
        (Shape::Matrix { rows, columns, inner }, Shape::Vector { dimension, inner: vector_inner }) => {
            if operator != ArithmeticOperator::Multiply || columns != dimension {
                mismatch(context);
                return Type::Invalid;
            }
            if !vector_inner.is_implicit_castable_into(inner) {
                mismatch(context);
            }
            Type::vector(rows, inner.clone())
        }
        (Shape::Vector { dimension, inner: vector_inner }, Shape::Matrix { rows, columns, inner }) => {
            if operator != ArithmeticOperator::Multiply || rows != dimension {
                mismatch(context);
                return Type::Invalid;
            }
            if !vector_inner.is_implicit_castable_into(inner) {
                mismatch(context);
            }
            Type::vector(columns, inner.clone())
        }
        (
            Shape::Matrix { rows: left_rows, columns: left_columns, inner: left_inner },
            Shape::Matrix { rows: right_rows, columns: right_columns, inner: right_inner },
        ) => {
            let shaped = match operator {
                ArithmeticOperator::Plus | ArithmeticOperator::Minus
                    if left_rows == right_rows && left_columns == right_columns =>
                {
                    Some(left.clone())
                }
                ArithmeticOperator::Multiply if left_columns == right_rows => {
                    Some(Type::matrix(left_rows, right_columns, left_inner.clone()))
                }
                _ => None,
            };
            let Some(shaped) = shaped else {
                mismatch(context);
                return Type::Invalid;
            };
            if !left_inner.is_mutually_castable(right_inner) {
                mismatch(context);
            }
            shaped
        }
        _ => {
            context.push_incident(
                format!("Arithmetic '{}' needs numeric operands, found {} and {}", operator, left, right),
                Some(this),
            );
            Type::Invalid
        }
    }
}
