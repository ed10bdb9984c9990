//! Module scope variables: `const`, `private`, `workgroup`, `uniform`,
//! `storage` and `handle`

use crate::frontend::context::{Context, ValueBinding};
use crate::frontend::cst::VariableDeclarationCst;
use crate::frontend::expression::{process_optional, Expression};
use crate::frontend::node::{NodeKind, NodeRef};
use crate::frontend::statement::declaration::{binding_type, check_constant_initializer};
use crate::frontend::statement::VariableDeclarationData;
use crate::frontend::type_reference::resolve_type;
use crate::types::{AddressSpace, FixedState, Type};
use crate::utils::Result;

/// Fixed state and address space of a declaration kind
fn declaration_kind(kind: &str) -> Option<(FixedState, AddressSpace)> {
    let kind = match kind {
        "const" => (FixedState::Constant, AddressSpace::Private),
        "private" => (FixedState::Variable, AddressSpace::Private),
        "workgroup" => (FixedState::Variable, AddressSpace::Workgroup),
        "uniform" => (FixedState::Variable, AddressSpace::Uniform),
        "storage" => (FixedState::Variable, AddressSpace::Storage),
        "handle" => (FixedState::Variable, AddressSpace::Handle),
        _ => return None,
    };
    Some(kind)
}

/// Spaces whose values are provided by the host or the pipeline
fn is_bound_externally(space: AddressSpace) -> bool {
    matches!(
        space,
        AddressSpace::Workgroup | AddressSpace::Uniform | AddressSpace::Storage | AddressSpace::Handle
    )
}

pub struct GlobalVariableNode<'a> {
    pub expression: Option<Expression<'a>>,
}

impl<'a> NodeKind<'a> for GlobalVariableNode<'a> {
    type Cst = VariableDeclarationCst;
    type Data = VariableDeclarationData;

    const NAME: &'static str = "global variable declaration";

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
        let (fixed_state, address_space) = declaration_kind(&cst.declaration_type).unwrap_or_else(|| {
            context.push_incident(
                format!("Unknown global declaration kind '{}'", cst.declaration_type),
                Some(this),
            );
            (FixedState::Variable, AddressSpace::Private)
        });

        let initializer = process_optional(&mut self.expression, context)?;
        let declared = cst.type_declaration.as_ref().map(|declaration| resolve_type(context, declaration));

        let ty = if is_bound_externally(address_space) {
            if initializer.is_some() {
                context.push_incident(
                    format!("'{}' in the {} space can't have an initializer", cst.name, address_space.name()),
                    Some(this),
                );
            }
            match declared {
                Some(declared) => declared,
                None => {
                    context.push_incident(
                        format!("'{}' in the {} space needs a declared type", cst.name, address_space.name()),
                        Some(this),
                    );
                    Type::Invalid
                }
            }
        } else {
            if fixed_state == FixedState::Constant {
                check_constant_initializer(&cst.name, initializer, this, context);
            }
            binding_type(&cst.name, declared, initializer, fixed_state, this, context)
        };

        if !ty.is_invalid() {
            let properties = ty.properties();
            if matches!(address_space, AddressSpace::Uniform | AddressSpace::Storage) {
                if !properties.host_shareable {
                    context.push_incident(
                        format!("Type {} of '{}' can't be shared with the host", ty, cst.name),
                        Some(this),
                    );
                }
            } else if fixed_state == FixedState::Variable && !properties.storable {
                context.push_incident(format!("Type {} can't be stored in variable '{}'", ty, cst.name), Some(this));
            }
        }

        let binding = ValueBinding {
            name: cst.name.clone(),
            ty,
            fixed_state,
            address_space,
            constant_value: match fixed_state {
                FixedState::Constant => initializer.and_then(|value| value.constant_value.clone()),
                FixedState::Variable => None,
            },
        };
        context.add_value(binding.clone())?;

        Ok(VariableDeclarationData { binding })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::cst::build::{arithmetic, document, generic_ty, global, literal, ty};
    use crate::frontend::cst::{DeclarationCst, DocumentCst};
    use crate::frontend::declaration::{analyze_document, Declaration};
    use crate::types::ConstantValue;
    use pretty_assertions::assert_eq;

    fn analyze(declarations: Vec<DeclarationCst>) -> (Vec<ValueBinding>, Context) {
        let cst: DocumentCst = document(declarations);
        let mut context = Context::new();
        let node = analyze_document(&cst, &mut context).unwrap();
        let bindings = node
            .kind()
            .declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::Variable(node) => Some(node.data().unwrap().binding.clone()),
                _ => None,
            })
            .collect();
        (bindings, context)
    }

    #[test]
    fn test_module_constant() {
        let (bindings, context) = analyze(vec![global(
            "const",
            "SIZE",
            None,
            Some(arithmetic(literal("4"), "*", literal("2"))),
        )]);
        assert_eq!(bindings[0].address_space, AddressSpace::Private);
        assert_eq!(bindings[0].fixed_state, FixedState::Constant);
        assert_eq!(bindings[0].ty, Type::ABSTRACT_INT);
        assert!(context.incidents().is_empty());
    }

    #[test]
    fn test_private_concretizes() {
        let (bindings, context) = analyze(vec![global("private", "scale", None, Some(literal("0.5")))]);
        assert_eq!(bindings[0].ty, Type::F32);
        assert_eq!(bindings[0].constant_value, None);
        assert!(context.incidents().is_empty());
    }

    #[test]
    fn test_const_value_is_kept() {
        let (bindings, _) = analyze(vec![global("const", "ON", Some(ty("bool")), Some(literal("true")))]);
        assert_eq!(bindings[0].constant_value, Some(ConstantValue::Boolean(true)));
    }

    #[test]
    fn test_external_spaces() {
        let (bindings, context) = analyze(vec![
            global("uniform", "tint", Some(generic_ty("vec4", vec![ty("f32")])), None),
            global("storage", "count", Some(ty("u32")), Some(literal("0u"))),
            global("workgroup", "shared", None, None),
        ]);
        assert_eq!(bindings[0].address_space, AddressSpace::Uniform);
        assert_eq!(bindings[2].ty, Type::Invalid);
        let messages: Vec<&str> = context.incidents().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "'count' in the storage space can't have an initializer",
                "'shared' in the workgroup space needs a declared type",
            ]
        );
    }

    #[test]
    fn test_uniform_needs_host_shareable() {
        let (_, context) = analyze(vec![global("uniform", "enabled", Some(ty("bool")), None)]);
        assert_eq!(context.incidents().len(), 1);
    }

    #[test]
    fn test_unknown_kind() {
        let (bindings, context) = analyze(vec![global("var", "x", Some(ty("i32")), None)]);
        assert_eq!(bindings[0].address_space, AddressSpace::Private);
        assert_eq!(context.incidents().len(), 1);
    }
}
