//! `struct` and `alias` declarations

use std::rc::Rc;

use crate::frontend::context::Context;
use crate::frontend::cst::{AliasDeclarationCst, StructDeclarationCst};
use crate::frontend::node::{NodeKind, NodeRef};
use crate::frontend::type_reference::resolve_type;
use crate::types::{StructMember, StructType, Type};
use crate::utils::Result;

pub struct StructNode;

impl<'a> NodeKind<'a> for StructNode {
    type Cst = StructDeclarationCst;
    /// The declared struct type
    type Data = Type;

    const NAME: &'static str = "struct declaration";

    fn build(_cst: &'a StructDeclarationCst) -> Self {
        Self
    }

    fn on_process(&mut self, cst: &'a StructDeclarationCst, this: NodeRef, context: &mut Context) -> Result<Type> {
        let mut members: Vec<StructMember> = Vec::with_capacity(cst.properties.len());
        for property in &cst.properties {
            let ty = resolve_type(context, &property.type_declaration);
            if members.iter().any(|member| member.name == property.name) {
                context.push_incident(
                    format!("Struct '{}' declares '{}' more than once", cst.name, property.name),
                    Some(this),
                );
                continue;
            }
            if !ty.is_invalid() && !ty.properties().storable {
                context.push_incident(
                    format!("Type {} of '{}.{}' can't be stored", ty, cst.name, property.name),
                    Some(this),
                );
            }
            members.push(StructMember { name: property.name.clone(), ty });
        }

        let layout = Rc::new(StructType { name: cst.name.clone(), members });
        if !context.symbols_mut().add_struct(layout.clone()) {
            context.push_incident(format!("Type name '{}' is already declared", cst.name), Some(this));
        }
        Ok(Type::Struct(layout))
    }
}

pub struct AliasNode;

impl<'a> NodeKind<'a> for AliasNode {
    type Cst = AliasDeclarationCst;
    /// The aliased type
    type Data = Type;

    const NAME: &'static str = "alias declaration";

    fn build(_cst: &'a AliasDeclarationCst) -> Self {
        Self
    }

    fn on_process(&mut self, cst: &'a AliasDeclarationCst, this: NodeRef, context: &mut Context) -> Result<Type> {
        let ty = resolve_type(context, &cst.type_declaration);
        if !context.symbols_mut().add_alias(&cst.name, ty.clone()) {
            context.push_incident(format!("Type name '{}' is already declared", cst.name), Some(this));
        }
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::cst::build::{alias_decl, document, generic_ty, struct_decl, ty};
    use crate::frontend::declaration::{analyze_document, Declaration};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_struct_members() {
        let cst = document(vec![struct_decl(
            "Light",
            vec![("position", generic_ty("vec3", vec![ty("f32")])), ("power", ty("f32"))],
        )]);
        let mut context = Context::new();
        let document = analyze_document(&cst, &mut context).unwrap();
        let Declaration::Struct(node) = &document.kind().declarations[0] else { panic!("expected struct") };
        let Type::Struct(layout) = node.data().unwrap() else { panic!("expected struct type") };

        assert_eq!(layout.member("power").map(|m| m.ty.clone()), Some(Type::F32));
        assert!(context.symbols().structure("Light").is_some());
        assert!(context.incidents().is_empty());
    }

    #[test]
    fn test_struct_member_checks() {
        let cst = document(vec![struct_decl(
            "Broken",
            vec![("a", ty("f32")), ("a", ty("i32")), ("b", ty("void")), ("c", ty("Missing"))],
        )]);
        let mut context = Context::new();
        analyze_document(&cst, &mut context).unwrap();
        let messages: Vec<&str> = context.incidents().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Struct 'Broken' declares 'a' more than once",
                "Type void of 'Broken.b' can't be stored",
                "Type 'Missing' can't be found",
            ]
        );
    }

    #[test]
    fn test_alias_and_name_clash() {
        let cst = document(vec![
            alias_decl("Color", generic_ty("vec4", vec![ty("f32")])),
            struct_decl("Color", vec![("r", ty("f32"))]),
        ]);
        let mut context = Context::new();
        analyze_document(&cst, &mut context).unwrap();
        assert_eq!(context.symbols().alias("Color"), Some(&Type::vector(4, Type::F32)));
        assert_eq!(context.incidents().len(), 1);
    }
}
