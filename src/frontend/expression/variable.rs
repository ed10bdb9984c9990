//! Plain name references

use super::ExpressionData;
use crate::frontend::context::Context;
use crate::frontend::cst::VariableNameCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::FixedState;
use crate::utils::Result;

/// Reference to a value binding, or to an enum used as a namespace
pub struct VariableNameExpression;

impl<'a> NodeKind<'a> for VariableNameExpression {
    type Cst = VariableNameCst;
    type Data = ExpressionData;

    const NAME: &'static str = "variable name expression";

    fn build(_cst: &'a VariableNameCst) -> Self {
        Self
    }

    fn on_process(&mut self, cst: &'a VariableNameCst, this: NodeRef, context: &mut Context) -> Result<ExpressionData> {
        if let Some(binding) = context.get_value(&cst.name) {
            let data = ExpressionData {
                resolve_type: binding.ty.clone(),
                fixed_state: binding.fixed_state,
                constant_value: binding.constant_value.clone(),
                is_storage: binding.fixed_state == FixedState::Variable,
                storage_address_space: binding.address_space,
                is_enum_name: false,
            };
            context.register_symbol_usage(&cst.name);
            return Ok(data);
        }

        if let Some(enumeration) = context.symbols().enumeration(&cst.name) {
            context.register_symbol_usage(&cst.name);
            return Ok(ExpressionData {
                is_enum_name: true,
                ..ExpressionData::value(enumeration.ty(), FixedState::Constant)
            });
        }

        context.push_incident(format!("Name '{}' can't be found", cst.name), Some(this));
        Ok(ExpressionData::invalid())
    }
}

#[cfg(test)]
mod tests {
    use crate::frontend::cst::build::var;
    use crate::frontend::expression::test_support::{analyze, context, declare, declare_constant};
    use crate::types::{ConstantValue, FixedState, Type};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_variable_is_storage() {
        let mut context = context();
        declare(&mut context, "x", Type::I32);
        let data = analyze(&mut context, &var("x"));
        assert_eq!(data.resolve_type, Type::I32);
        assert!(data.is_storage);
        assert!(context.used_symbols().contains("x"));
    }

    #[test]
    fn test_constant_carries_value() {
        let mut context = context();
        declare_constant(&mut context, "N", Type::ABSTRACT_INT, ConstantValue::Integer(4));
        let data = analyze(&mut context, &var("N"));
        assert_eq!(data.fixed_state, FixedState::Constant);
        assert_eq!(data.constant_value, Some(ConstantValue::Integer(4)));
        assert!(!data.is_storage);
    }

    #[test]
    fn test_unknown_name() {
        let mut context = context();
        let data = analyze(&mut context, &var("nowhere"));
        assert_eq!(data.resolve_type, Type::Invalid);
        assert_eq!(context.incidents().len(), 1);
        assert!(context.incidents()[0].message.contains("nowhere"));
    }
}
