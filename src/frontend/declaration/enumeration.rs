//! `enum Name { A = 1, B, C }`

use crate::frontend::context::Context;
use crate::frontend::cst::{EnumDeclarationCst, EnumValueCst};
use crate::frontend::expression::parse_literal;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::frontend::symbols::EnumDeclaration;
use crate::types::{ConstantValue, Type};
use crate::utils::Result;

pub struct EnumNode;

impl<'a> NodeKind<'a> for EnumNode {
    type Cst = EnumDeclarationCst;
    type Data = EnumDeclaration;

    const NAME: &'static str = "enum declaration";

    fn build(_cst: &'a EnumDeclarationCst) -> Self {
        Self
    }

    fn on_process(&mut self, cst: &'a EnumDeclarationCst, this: NodeRef, context: &mut Context) -> Result<EnumDeclaration> {
        let mut members: Vec<(String, ConstantValue)> = Vec::new();
        let mut underlying: Option<Type> = None;
        let mut next = 0;

        for value in &cst.values {
            let Some(member) = member_value(value, next, this, context) else {
                continue;
            };

            let kind = match member {
                ConstantValue::String(_) => Type::String,
                _ => Type::I32,
            };
            match &underlying {
                None => underlying = Some(kind),
                Some(existing) if *existing != kind => {
                    context.push_incident(
                        format!("Enum '{}' mixes integer and string members at '{}'", cst.name, value.name),
                        Some(this),
                    );
                    continue;
                }
                Some(_) => {}
            }

            if let ConstantValue::Integer(number) = member {
                next = number + 1;
            }
            if members.iter().any(|(name, _)| *name == value.name) {
                context.push_incident(
                    format!("Enum '{}' declares '{}' more than once", cst.name, value.name),
                    Some(this),
                );
                continue;
            }
            members.push((value.name.clone(), member));
        }

        if cst.values.is_empty() {
            context.push_incident(format!("Enum '{}' has no members", cst.name), Some(this));
        }

        let declaration = EnumDeclaration {
            name: cst.name.clone(),
            underlying: underlying.unwrap_or(Type::I32),
            members,
        };
        if !context.symbols_mut().add_enum(declaration.clone()) {
            context.push_incident(format!("Type name '{}' is already declared", cst.name), Some(this));
        }
        Ok(declaration)
    }
}

/// Value of one member. Members without a literal continue counting from
/// the previous integer member.
fn member_value(value: &EnumValueCst, next: i64, this: NodeRef, context: &mut Context) -> Option<ConstantValue> {
    let Some(literal) = &value.value else {
        return Some(ConstantValue::Integer(next));
    };
    match parse_literal(&literal.text_value) {
        Some((member @ (ConstantValue::Integer(_) | ConstantValue::String(_)), _)) => Some(member),
        _ => {
            context.push_incident(
                format!("Enum member '{}' must be an integer or string literal", value.name),
                Some(this),
            );
            None
        }
    }
}
