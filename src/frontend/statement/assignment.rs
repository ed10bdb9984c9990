//! Assignments (`=`, `+=`, `<<=`, ...) and `++` / `--`

use crate::frontend::context::Context;
use crate::frontend::cst::{AssignmentCst, IncrementDecrementCst};
use crate::frontend::expression::{
    arithmetic, bitwise, is_integer_castable, ArithmeticOperator, BitwiseOperator, Expression, ExpressionData,
};
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::FixedState;
use crate::utils::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    Arithmetic(ArithmeticOperator),
    Bitwise(BitwiseOperator),
}

impl AssignmentOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        if token == "=" {
            return Some(Self::Assign);
        }
        let operator = token.strip_suffix('=')?;
        ArithmeticOperator::from_token(operator)
            .map(Self::Arithmetic)
            .or_else(|| BitwiseOperator::from_token(operator).map(Self::Bitwise))
    }
}

/// Report a target that can't be written to. Returns whether it is writable.
fn check_target(target: &ExpressionData, this: NodeRef, context: &mut Context) -> bool {
    if target.resolve_type.is_invalid() {
        return false;
    }
    if target.fixed_state == FixedState::Constant {
        context.push_incident("Constants can't be assigned", Some(this));
        return false;
    }
    if !target.is_storage {
        context.push_incident("Assignment target must be a storage location", Some(this));
        return false;
    }
    true
}

pub struct AssignmentStatement<'a> {
    pub variable: Expression<'a>,
    pub expression: Expression<'a>,
}

impl<'a> NodeKind<'a> for AssignmentStatement<'a> {
    type Cst = AssignmentCst;
    type Data = AssignmentOperator;

    const NAME: &'static str = "assignment statement";

    fn build(cst: &'a AssignmentCst) -> Self {
        Self {
            variable: Expression::new(&cst.variable),
            expression: Expression::new(&cst.expression),
        }
    }

    fn on_process(&mut self, cst: &'a AssignmentCst, this: NodeRef, context: &mut Context) -> Result<AssignmentOperator> {
        self.variable.process_mut(context)?;
        self.expression.process_mut(context)?;
        let target = self.variable.data()?;
        let value = self.expression.data()?;

        let operator = AssignmentOperator::from_token(&cst.operator).unwrap_or_else(|| {
            context.push_incident(format!("Unknown assignment operator '{}'", cst.operator), Some(this));
            AssignmentOperator::Assign
        });

        if !check_target(target, this, context) || value.resolve_type.is_invalid() {
            return Ok(operator);
        }

        let assigned = match operator {
            AssignmentOperator::Assign => value.resolve_type.clone(),
            AssignmentOperator::Arithmetic(operator) => {
                arithmetic::result_type(operator, &target.resolve_type, &value.resolve_type, this, context)
            }
            AssignmentOperator::Bitwise(operator) => bitwise::result_type(operator, target, value, this, context),
        };

        if !assigned.is_invalid() && !assigned.is_implicit_castable_into(&target.resolve_type) {
            context.push_incident(
                format!("Can't assign {} to {}", assigned, target.resolve_type),
                Some(this),
            );
        }
        Ok(operator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOperator {
    Increment,
    Decrement,
}

pub struct IncrementDecrementStatement<'a> {
    pub expression: Expression<'a>,
}

impl<'a> NodeKind<'a> for IncrementDecrementStatement<'a> {
    type Cst = IncrementDecrementCst;
    type Data = StepOperator;

    const NAME: &'static str = "increment decrement statement";

    fn build(cst: &'a IncrementDecrementCst) -> Self {
        Self {
            expression: Expression::new(&cst.expression),
        }
    }

    fn on_process(&mut self, cst: &'a IncrementDecrementCst, this: NodeRef, context: &mut Context) -> Result<StepOperator> {
        self.expression.process_mut(context)?;
        let target = self.expression.data()?;

        let operator = match cst.operator.as_str() {
            "++" => StepOperator::Increment,
            "--" => StepOperator::Decrement,
            other => {
                context.push_incident(format!("Unknown step operator '{}'", other), Some(this));
                StepOperator::Increment
            }
        };

        if check_target(target, this, context) && !is_integer_castable(&target.resolve_type) {
            context.push_incident(
                format!("Only integer scalars can be stepped, found {}", target.resolve_type),
                Some(this),
            );
        }
        Ok(operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::cst::build::{assign, index, literal, var};
    use crate::frontend::cst::{ExpressionCst, IncrementDecrementCst, StatementCst};
    use crate::frontend::expression::test_support::declare_constant;
    use crate::frontend::statement::test_support::{analyze_in_function, context, declare};
    use crate::types::{ConstantValue, Type};
    use crate::utils::SourceRange;
    use pretty_assertions::assert_eq;

    fn step(operator: &str, expression: ExpressionCst) -> StatementCst {
        StatementCst::IncrementDecrement(IncrementDecrementCst {
            range: SourceRange::dummy(),
            operator: operator.to_string(),
            expression,
        })
    }

    #[test]
    fn test_operator_tokens() {
        assert_eq!(AssignmentOperator::from_token("="), Some(AssignmentOperator::Assign));
        assert_eq!(
            AssignmentOperator::from_token("*="),
            Some(AssignmentOperator::Arithmetic(ArithmeticOperator::Multiply))
        );
        assert_eq!(
            AssignmentOperator::from_token(">>="),
            Some(AssignmentOperator::Bitwise(BitwiseOperator::ShiftRight))
        );
        assert_eq!(AssignmentOperator::from_token("=="), None);
    }

    #[test]
    fn test_assign_widening() {
        let mut context = context();
        declare(&mut context, "x", Type::F32);
        analyze_in_function(&mut context, Type::Void, &assign(var("x"), "=", literal("1")));
        analyze_in_function(&mut context, Type::Void, &assign(var("x"), "+=", literal("0.5")));
        assert!(context.incidents().is_empty());
    }

    #[test]
    fn test_assign_mismatch() {
        let mut context = context();
        declare(&mut context, "x", Type::I32);
        analyze_in_function(&mut context, Type::Void, &assign(var("x"), "=", literal("1.5")));
        assert_eq!(context.incidents().len(), 1);
    }

    #[test]
    fn test_constant_target_rejected() {
        let mut context = context();
        declare_constant(&mut context, "LIMIT", Type::I32, ConstantValue::Integer(3));
        analyze_in_function(&mut context, Type::Void, &assign(var("LIMIT"), "=", literal("4")));
        analyze_in_function(&mut context, Type::Void, &step("++", var("LIMIT")));
        assert_eq!(context.incidents().len(), 2);
    }

    #[test]
    fn test_component_assignment() {
        let mut context = context();
        declare(&mut context, "v", Type::vector(3, Type::U32));
        analyze_in_function(&mut context, Type::Void, &assign(index(var("v"), literal("0")), "|=", literal("1u")));
        assert!(context.incidents().is_empty());
    }

    #[test]
    fn test_step_needs_integer() {
        let mut context = context();
        declare(&mut context, "i", Type::I32);
        declare(&mut context, "f", Type::F32);
        analyze_in_function(&mut context, Type::Void, &step("++", var("i")));
        assert!(context.incidents().is_empty());
        analyze_in_function(&mut context, Type::Void, &step("--", var("f")));
        assert_eq!(context.incidents().len(), 1);
    }
}
