//! Local `const` and `let` declarations

use crate::frontend::context::{Context, ValueBinding};
use crate::frontend::cst::VariableDeclarationCst;
use crate::frontend::expression::{process_optional, Expression, ExpressionData};
use crate::frontend::node::{NodeKind, NodeRef};
use crate::frontend::type_reference::resolve_type;
use crate::types::{AddressSpace, FixedState, Type};
use crate::utils::Result;

/// The binding a declaration introduced
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarationData {
    pub binding: ValueBinding,
}

pub struct VariableDeclarationStatement<'a> {
    pub expression: Option<Expression<'a>>,
}

impl<'a> NodeKind<'a> for VariableDeclarationStatement<'a> {
    type Cst = VariableDeclarationCst;
    type Data = VariableDeclarationData;

    const NAME: &'static str = "variable declaration statement";

    fn build(cst: &'a VariableDeclarationCst) -> Self {
        Self {
            expression: cst.expression.as_ref().map(Expression::new),
        }
    }

    fn on_process(
        &mut self,
        cst: &'a VariableDeclarationCst,
        this: NodeRef,
        context: &mut Context,
    ) -> Result<VariableDeclarationData> {
        let fixed_state = match cst.declaration_type.as_str() {
            "const" => FixedState::Constant,
            "let" => FixedState::Variable,
            other => {
                context.push_incident(format!("Unknown local declaration kind '{}'", other), Some(this));
                FixedState::Variable
            }
        };

        let initializer = process_optional(&mut self.expression, context)?;
        let declared = cst.type_declaration.as_ref().map(|declaration| resolve_type(context, declaration));

        if fixed_state == FixedState::Constant {
            check_constant_initializer(&cst.name, initializer, this, context);
        } else if let Some(declared) = &declared {
            if !declared.is_invalid() && !declared.properties().storable {
                context.push_incident(format!("Type {} can't be stored in variable '{}'", declared, cst.name), Some(this));
            }
        }

        let ty = binding_type(&cst.name, declared, initializer, fixed_state, this, context);
        let binding = ValueBinding {
            name: cst.name.clone(),
            ty,
            fixed_state,
            address_space: AddressSpace::Function,
            constant_value: match fixed_state {
                FixedState::Constant => initializer.and_then(|value| value.constant_value.clone()),
                FixedState::Variable => None,
            },
        };
        context.add_value(binding.clone())?;

        Ok(VariableDeclarationData { binding })
    }
}

/// `const` needs an initializer that is itself constant
pub(crate) fn check_constant_initializer(
    name: &str,
    initializer: Option<&ExpressionData>,
    this: NodeRef,
    context: &mut Context,
) {
    match initializer {
        None => context.push_incident(format!("Constant '{}' needs an initializer", name), Some(this)),
        Some(value) if !value.resolve_type.is_invalid() && value.fixed_state != FixedState::Constant => {
            context.push_incident(
                format!("Constant '{}' must be initialized with a constant expression", name),
                Some(this),
            )
        }
        Some(_) => {}
    }
}

/// Type of the new binding: the declared type when written, else the
/// initializer's type. Variables concretize abstract initializer types,
/// constants keep them.
pub(crate) fn binding_type(
    name: &str,
    declared: Option<Type>,
    initializer: Option<&ExpressionData>,
    fixed_state: FixedState,
    this: NodeRef,
    context: &mut Context,
) -> Type {
    match (declared, initializer) {
        (Some(declared), Some(value)) => {
            let found = &value.resolve_type;
            if !declared.is_invalid() && !found.is_invalid() && !found.is_implicit_castable_into(&declared) {
                context.push_incident(
                    format!("Can't initialize '{}' of type {} with {}", name, declared, found),
                    Some(this),
                );
            }
            declared
        }
        (Some(declared), None) => declared,
        (None, Some(value)) if fixed_state == FixedState::Variable => value.resolve_type.concretize(),
        (None, Some(value)) => value.resolve_type.clone(),
        (None, None) => {
            context.push_incident(format!("Declaration of '{}' needs a type or an initializer", name), Some(this));
            Type::Invalid
        }
    }
}
