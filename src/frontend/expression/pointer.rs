//! `&value`, `*pointer` and parenthesized expressions

use super::{Expression, ExpressionData};
use crate::frontend::context::Context;
use crate::frontend::cst::NestedExpressionCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::{FixedState, Type};
use crate::utils::Result;

pub struct AddressOfExpression<'a> {
    pub expression: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for AddressOfExpression<'a> {
    type Cst = NestedExpressionCst;
    type Data = ExpressionData;

    const NAME: &'static str = "address of expression";

    fn build(cst: &'a NestedExpressionCst) -> Self {
        Self {
            expression: Expression::boxed(&cst.expression),
        }
    }

    fn on_process(&mut self, _cst: &'a NestedExpressionCst, this: NodeRef, context: &mut Context) -> Result<ExpressionData> {
        self.expression.process_mut(context)?;
        let target = self.expression.data()?;
        let ty = &target.resolve_type;

        if ty.is_invalid() {
            return Ok(ExpressionData::invalid());
        }
        if !target.is_storage {
            context.push_incident("Only storage locations have an address", Some(this));
            return Ok(ExpressionData::invalid());
        }
        if !ty.properties().storable {
            context.push_incident(format!("Values of type {} can't be pointed to", ty), Some(this));
            return Ok(ExpressionData::invalid());
        }

        let pointer = Type::pointer(ty.clone(), target.storage_address_space);
        Ok(ExpressionData::value(pointer, FixedState::Variable))
    }
}

pub struct PointerDereferenceExpression<'a> {
    pub expression: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for PointerDereferenceExpression<'a> {
    type Cst = NestedExpressionCst;
    type Data = ExpressionData;

    const NAME: &'static str = "pointer expression";

    fn build(cst: &'a NestedExpressionCst) -> Self {
        Self {
            expression: Expression::boxed(&cst.expression),
        }
    }

    fn on_process(&mut self, _cst: &'a NestedExpressionCst, this: NodeRef, context: &mut Context) -> Result<ExpressionData> {
        self.expression.process_mut(context)?;
        let pointer = self.expression.data()?;

        match &pointer.resolve_type {
            Type::Pointer { referenced, address_space } => Ok(ExpressionData {
                resolve_type: (**referenced).clone(),
                fixed_state: FixedState::Variable,
                constant_value: None,
                is_storage: true,
                storage_address_space: *address_space,
                is_enum_name: false,
            }),
            Type::Invalid => Ok(ExpressionData::invalid()),
            other => {
                context.push_incident(format!("Only pointers can be dereferenced, found {}", other), Some(this));
                Ok(ExpressionData::invalid())
            }
        }
    }
}

/// `( expression )` passes all facts of the inner expression through
pub struct ParenthesizedExpression<'a> {
    pub expression: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for ParenthesizedExpression<'a> {
    type Cst = NestedExpressionCst;
    type Data = ExpressionData;

    const NAME: &'static str = "parenthesized expression";

    fn build(cst: &'a NestedExpressionCst) -> Self {
        Self {
            expression: Expression::boxed(&cst.expression),
        }
    }

    fn on_process(&mut self, _cst: &'a NestedExpressionCst, _this: NodeRef, context: &mut Context) -> Result<ExpressionData> {
        self.expression.process_mut(context)?;
        Ok(self.expression.data()?.clone())
    }
}
