//! Indexing (`v[i]`) and decomposition (`light.color`, `v.xy`, `Mode.Fast`)

use super::{is_integer_castable, Expression, ExpressionData};
use crate::frontend::context::Context;
use crate::frontend::cst::{IndexedValueCst, ValueDecompositionCst};
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::{FixedState, Type};
use crate::utils::Result;

pub struct IndexedValueExpression<'a> {
    pub value: Box<Expression<'a>>,
    pub index: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for IndexedValueExpression<'a> {
    type Cst = IndexedValueCst;
    type Data = ExpressionData;

    const NAME: &'static str = "indexed value expression";

    fn build(cst: &'a IndexedValueCst) -> Self {
        Self {
            value: Expression::boxed(&cst.value),
            index: Expression::boxed(&cst.index),
        }
    }

    fn on_process(&mut self, _cst: &'a IndexedValueCst, this: NodeRef, context: &mut Context) -> Result<ExpressionData> {
        self.value.process_mut(context)?;
        self.index.process_mut(context)?;
        let value = self.value.data()?;
        let index = self.index.data()?;

        let index_type = &index.resolve_type;
        if !index_type.is_invalid() && !is_integer_castable(index_type) {
            context.push_incident(format!("Index must be an integer, found {}", index_type), Some(this));
        }

        let element = match &value.resolve_type {
            Type::Invalid => return Ok(ExpressionData::invalid()),
            Type::Vector { inner, .. } => (**inner).clone(),
            Type::Matrix { rows, inner, .. } => Type::vector(*rows, (**inner).clone()),
            other => {
                context.push_incident(format!("Values of type {} can't be indexed", other), Some(this));
                return Ok(ExpressionData::invalid());
            }
        };

        Ok(ExpressionData {
            resolve_type: element,
            fixed_state: value.fixed_state.min(index.fixed_state),
            constant_value: None,
            is_storage: value.is_storage,
            storage_address_space: value.storage_address_space,
            is_enum_name: false,
        })
    }
}

pub struct ValueDecompositionExpression<'a> {
    pub value: Box<Expression<'a>>,
}

impl<'a> NodeKind<'a> for ValueDecompositionExpression<'a> {
    type Cst = ValueDecompositionCst;
    type Data = ExpressionData;

    const NAME: &'static str = "value decomposition expression";

    fn build(cst: &'a ValueDecompositionCst) -> Self {
        Self {
            value: Expression::boxed(&cst.value),
        }
    }

    fn on_process(&mut self, cst: &'a ValueDecompositionCst, this: NodeRef, context: &mut Context) -> Result<ExpressionData> {
        self.value.process_mut(context)?;
        let value = self.value.data()?;
        let property = cst.property.as_str();

        match &value.resolve_type {
            Type::Invalid => Ok(ExpressionData::invalid()),
            Type::Struct(layout) => match layout.member(property) {
                Some(member) => Ok(ExpressionData {
                    resolve_type: member.ty.clone(),
                    fixed_state: value.fixed_state,
                    constant_value: None,
                    is_storage: value.is_storage,
                    storage_address_space: value.storage_address_space,
                    is_enum_name: false,
                }),
                None => {
                    context.push_incident(
                        format!("Struct '{}' has no member '{}'", layout.name, property),
                        Some(this),
                    );
                    Ok(ExpressionData::invalid())
                }
            },
            Type::Vector { dimension, inner } => match swizzle(property, *dimension) {
                Some(1) => Ok(ExpressionData {
                    resolve_type: (**inner).clone(),
                    fixed_state: value.fixed_state,
                    constant_value: None,
                    is_storage: value.is_storage,
                    storage_address_space: value.storage_address_space,
                    is_enum_name: false,
                }),
                // Multi-component swizzles are values, not storage
                Some(length) => Ok(ExpressionData::value(
                    Type::vector(length, (**inner).clone()),
                    value.fixed_state,
                )),
                None => {
                    context.push_incident(
                        format!("'{}' is not a valid swizzle of {}", property, value.resolve_type),
                        Some(this),
                    );
                    Ok(ExpressionData::invalid())
                }
            },
            // Enum names act as namespaces. Enum typed values have no members.
            Type::Enum { name, .. } if value.is_enum_name => {
                let member = context
                    .symbols()
                    .enumeration(name)
                    .and_then(|declaration| declaration.member(property).cloned());
                match member {
                    Some(constant) => Ok(ExpressionData {
                        constant_value: Some(constant),
                        ..ExpressionData::value(value.resolve_type.clone(), FixedState::Constant)
                    }),
                    None => {
                        context.push_incident(format!("Enum '{}' has no member '{}'", name, property), Some(this));
                        Ok(ExpressionData::invalid())
                    }
                }
            }
            other => {
                context.push_incident(format!("Values of type {} have no member '{}'", other, property), Some(this));
                Ok(ExpressionData::invalid())
            }
        }
    }
}

/// Length of a swizzle such as `xyz` or `rg` on a vector of `dimension`
/// components. Both letter sets can't be mixed.
fn swizzle(property: &str, dimension: u8) -> Option<u8> {
    const SETS: [&str; 2] = ["xyzw", "rgba"];

    if property.is_empty() || property.len() > 4 {
        return None;
    }
    SETS.iter().find_map(|set| {
        property
            .chars()
            .all(|c| set.find(c).is_some_and(|position| position < usize::from(dimension)))
            .then_some(property.len() as u8)
    })
}
