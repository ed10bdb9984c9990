//! Function calls

use super::{Expression, ExpressionData};
use crate::frontend::context::Context;
use crate::frontend::cst::FunctionCallCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::frontend::overload::{self, CallArgument, ReturnType};
use crate::frontend::type_reference::resolve_type;
use crate::types::{FixedState, Type};
use crate::utils::Result;

/// Call data: the shared expression facts plus which header was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallData {
    pub expression: ExpressionData,
    /// Index of the matching header, `None` when resolution failed
    pub header_index: Option<usize>,
    pub generics: Vec<(String, Type)>,
    pub parameter_types: Vec<Type>,
}

impl FunctionCallData {
    fn unresolved() -> Self {
        Self {
            expression: ExpressionData::invalid(),
            header_index: None,
            generics: Vec::new(),
            parameter_types: Vec::new(),
        }
    }
}

impl AsRef<ExpressionData> for FunctionCallData {
    fn as_ref(&self) -> &ExpressionData {
        &self.expression
    }
}

pub struct FunctionCallExpression<'a> {
    pub parameters: Vec<Expression<'a>>,
}

impl<'a> NodeKind<'a> for FunctionCallExpression<'a> {
    type Cst = FunctionCallCst;
    type Data = FunctionCallData;

    const NAME: &'static str = "function call expression";

    fn build(cst: &'a FunctionCallCst) -> Self {
        Self {
            parameters: cst.parameters.iter().map(Expression::new).collect(),
        }
    }

    fn on_process(&mut self, cst: &'a FunctionCallCst, this: NodeRef, context: &mut Context) -> Result<FunctionCallData> {
        for parameter in &mut self.parameters {
            parameter.process_mut(context)?;
        }
        context.register_symbol_usage(&cst.name);

        let Some(declaration) = context.symbols().function(&cst.name) else {
            context.push_incident(format!("Function '{}' can't be found", cst.name), Some(this));
            return Ok(FunctionCallData::unresolved());
        };

        let explicit_generics: Vec<Type> = cst.generics.iter().map(|generic| resolve_type(context, generic)).collect();

        let mut arguments = Vec::with_capacity(self.parameters.len());
        for parameter in &self.parameters {
            let data = parameter.data()?;
            arguments.push(CallArgument {
                ty: &data.resolve_type,
                storage_address_space: data.storage_address_space,
            });
        }

        // Problems inside the arguments were already reported
        if arguments.iter().any(|argument| argument.ty.is_invalid())
            || explicit_generics.iter().any(Type::is_invalid)
        {
            return Ok(FunctionCallData::unresolved());
        }

        let Some(resolution) = overload::resolve(&declaration, &arguments, &explicit_generics) else {
            let found: Vec<String> = arguments.iter().map(|argument| argument.ty.to_string()).collect();
            context.push_incident(
                format!("No overload of '{}' accepts ({})", cst.name, found.join(", ")),
                Some(this),
            );
            return Ok(FunctionCallData::unresolved());
        };

        let resolve_type = match resolution.return_type {
            ReturnType::Resolved(ty) => ty,
            ReturnType::Unbound(name) => {
                context.push_incident(
                    format!("Generic '{}' of '{}' can't be inferred from the call", name, cst.name),
                    Some(this),
                );
                Type::Invalid
            }
        };

        Ok(FunctionCallData {
            expression: ExpressionData::value(resolve_type, FixedState::Variable),
            header_index: Some(resolution.header_index),
            generics: resolution.generics,
            parameter_types: resolution.parameter_types,
        })
    }
}
