//! Explicit conversion `T(value)`

use super::{Expression, ExpressionData};
use crate::frontend::context::Context;
use crate::frontend::cst::ConversionCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::frontend::type_reference::resolve_type;
use crate::utils::Result;

pub struct ConversionExpression<'a> {
    pub expression: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for ConversionExpression<'a> {
    type Cst = ConversionCst;
    type Data = ExpressionData;

    const NAME: &'static str = "conversion expression";

    fn build(cst: &'a ConversionCst) -> Self {
        Self {
            expression: Expression::boxed(&cst.expression),
        }
    }

    fn on_process(&mut self, cst: &'a ConversionCst, this: NodeRef, context: &mut Context) -> Result<ExpressionData> {
        self.expression.process_mut(context)?;
        let value = self.expression.data()?;
        let target = resolve_type(context, &cst.target);

        let source = &value.resolve_type;
        if !source.is_invalid() && !target.is_invalid() && !source.is_explicit_castable_into(&target) {
            context.push_incident(format!("{} can't be converted into {}", source, target), Some(this));
        }

        Ok(ExpressionData::value(target, value.fixed_state))
    }
}
