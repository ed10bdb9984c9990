//! Function declarations: signature collection and body analysis
//!
//! Signatures of every function are collected by [`collect_signature`]
//! before any body runs, so calls may target functions declared further
//! down the document. The body is analysed later by [`FunctionNode`] in a
//! `Function` scope owning the collected declaration.

use std::rc::Rc;

use crate::frontend::context::{Context, ScopeKind, ScopeOwner, ValueBinding};
use crate::frontend::cst::{FunctionDeclarationCst, FunctionHeaderCst};
use crate::frontend::node::{Node, NodeKind, NodeRef};
use crate::frontend::statement::{BlockData, BlockStatement};
use crate::frontend::symbols::{FunctionDeclaration, FunctionHeader, FunctionParameter, GenericParameter, HeaderType};
use crate::frontend::type_reference::resolve_header_type;
use crate::types::{AddressSpace, FixedState, MetaType, Type};
use crate::utils::Result;

/// Register the signature of a function in the document symbols
pub fn collect_signature(cst: &FunctionDeclarationCst, context: &mut Context) {
    let this = Some(NodeRef { kind: FunctionNode::NAME, range: cst.range });
    if cst.headers.is_empty() {
        context.push_incident(format!("Function '{}' needs at least one header", cst.name), this);
    }

    let headers = cst.headers.iter().map(|header| collect_header(header, context)).collect();
    let declaration = FunctionDeclaration {
        name: cst.name.clone(),
        headers,
        range: Some(cst.range),
    };
    if !context.symbols_mut().add_function(declaration) {
        context.push_incident(format!("Function '{}' is already declared", cst.name), this);
    }
}

fn collect_header(cst: &FunctionHeaderCst, context: &mut Context) -> FunctionHeader {
    let this = Some(NodeRef { kind: "function header", range: cst.range });

    let mut generics = Vec::with_capacity(cst.generics.len());
    for generic in &cst.generics {
        let restrictions = generic.restrictions.as_ref().map(|names| {
            let mut tags = Vec::with_capacity(names.len());
            for name in names {
                match MetaType::from_name(name) {
                    Some(tag) => tags.push(tag),
                    None => context.push_incident(
                        format!("Unknown restriction '{}' on generic '{}'", name, generic.name),
                        this,
                    ),
                }
            }
            tags
        });
        generics.push(GenericParameter { name: generic.name.clone(), restrictions });
    }

    let mut parameters: Vec<FunctionParameter> = Vec::with_capacity(cst.parameters.len());
    for parameter in &cst.parameters {
        if parameters.iter().any(|p| p.name == parameter.name) {
            context.push_incident(format!("Parameter '{}' is declared more than once", parameter.name), this);
        }
        let ty = resolve_header_type(context, &parameter.type_declaration, &generics);
        parameters.push(FunctionParameter { name: parameter.name.clone(), ty });
    }

    let return_type = resolve_header_type(context, &cst.return_type, &generics);
    FunctionHeader { parameters, generics, return_type }
}

/// Type a parameter is bound with inside the body. Generic parameters and
/// parameters the headers disagree on are `Invalid`.
fn parameter_type(declaration: &FunctionDeclaration, index: usize) -> Type {
    let mut types = declaration
        .headers
        .iter()
        .map(|header| header.parameters.get(index).map(|parameter| &parameter.ty));
    match types.next() {
        Some(Some(HeaderType::Concrete(first))) => {
            let agreed = types.all(|ty| matches!(ty, Some(HeaderType::Concrete(other)) if other == first));
            if agreed {
                first.clone()
            } else {
                Type::Invalid
            }
        }
        _ => Type::Invalid,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionData {
    /// The declaration collected for this function. `None` for a duplicate,
    /// whose body isn't analysed.
    pub declaration: Option<Rc<FunctionDeclaration>>,
    pub body: Option<BlockData>,
}

pub struct FunctionNode<'a> {
    pub block: Node<'a, BlockStatement<'a>>,
}

impl<'a> NodeKind<'a> for FunctionNode<'a> {
    type Cst = FunctionDeclarationCst;
    type Data = FunctionData;

    const NAME: &'static str = "function declaration";

    fn build(cst: &'a FunctionDeclarationCst) -> Self {
        Self {
            block: Node::new(&cst.block),
        }
    }

    fn on_process(&mut self, cst: &'a FunctionDeclarationCst, this: NodeRef, context: &mut Context) -> Result<FunctionData> {
        let declaration = context
            .symbols()
            .function(&cst.name)
            .filter(|declaration| declaration.range == Some(cst.range));
        let Some(declaration) = declaration else {
            return Ok(FunctionData { declaration: None, body: None });
        };

        let owner = ScopeOwner::Function {
            node: this,
            declaration: declaration.clone(),
        };
        let block = &mut self.block;
        let body = context.push_scope(ScopeKind::Function, owner, |context| {
            if let Some(header) = cst.headers.first() {
                for (index, parameter) in header.parameters.iter().enumerate() {
                    if context.get_local_value(&parameter.name).is_some() {
                        continue;
                    }
                    context.add_value(ValueBinding {
                        name: parameter.name.clone(),
                        ty: parameter_type(&declaration, index),
                        fixed_state: FixedState::Variable,
                        address_space: AddressSpace::Function,
                        constant_value: None,
                    })?;
                }
            }
            block.process_mut(context)?;
            Ok(block.data()?.clone())
        })?;

        Ok(FunctionData {
            declaration: Some(declaration),
            body: Some(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::cst::build::{
        arithmetic, call_expr, document, function, generic, header, let_stmt, literal, return_stmt, ty, var,
    };
    use crate::frontend::cst::DeclarationCst;
    use crate::frontend::declaration::{analyze_document, Declaration};
    use pretty_assertions::assert_eq;

    fn analyze(declarations: Vec<DeclarationCst>) -> (Vec<FunctionData>, Context) {
        let cst = document(declarations);
        let mut context = Context::new();
        let node = analyze_document(&cst, &mut context).unwrap();
        let functions = node
            .kind()
            .declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::Function(node) => Some(node.data().unwrap().clone()),
                _ => None,
            })
            .collect();
        (functions, context)
    }

    #[test]
    fn test_parameters_are_bound() {
        let (functions, context) = analyze(vec![function(
            "scale",
            vec![header(Vec::new(), vec![("value", ty("f32")), ("factor", ty("f32"))], ty("f32"))],
            vec![return_stmt(Some(arithmetic(var("value"), "*", var("factor"))))],
        )]);
        assert!(context.incidents().is_empty());
        assert_eq!(functions[0].body.as_ref().unwrap().return_type, Type::F32);
    }

    #[test]
    fn test_call_before_declaration() {
        let (_, context) = analyze(vec![
            function(
                "first",
                vec![header(Vec::new(), Vec::new(), ty("i32"))],
                vec![return_stmt(Some(call_expr("second", vec![literal("2")])))],
            ),
            function(
                "second",
                vec![header(Vec::new(), vec![("x", ty("i32"))], ty("i32"))],
                vec![return_stmt(Some(var("x")))],
            ),
        ]);
        assert!(context.incidents().is_empty());
        assert!(context.used_symbols().contains("second"));
    }

    #[test]
    fn test_generic_parameter_is_invalid_inside_body() {
        let (functions, context) = analyze(vec![function(
            "twice",
            vec![header(vec![generic("T", Some(vec!["Numeric"]))], vec![("x", ty("T"))], ty("T"))],
            vec![let_stmt("y", None, arithmetic(var("x"), "+", var("x")))],
        )]);
        let declaration = functions[0].declaration.as_ref().unwrap();
        assert_eq!(declaration.headers[0].generics[0].restrictions, Some(vec![MetaType::Numeric]));
        assert_eq!(parameter_type(declaration, 0), Type::Invalid);
        assert!(context.incidents().is_empty());
    }

    #[test]
    fn test_headers_disagreeing_on_parameter() {
        let declaration = FunctionDeclaration {
            name: "f".to_string(),
            headers: vec![
                FunctionHeader {
                    parameters: vec![FunctionParameter { name: "x".to_string(), ty: HeaderType::Concrete(Type::F32) }],
                    generics: Vec::new(),
                    return_type: HeaderType::Concrete(Type::Void),
                },
                FunctionHeader {
                    parameters: vec![FunctionParameter { name: "x".to_string(), ty: HeaderType::Concrete(Type::I32) }],
                    generics: Vec::new(),
                    return_type: HeaderType::Concrete(Type::Void),
                },
            ],
            range: None,
        };
        assert_eq!(parameter_type(&declaration, 0), Type::Invalid);
        assert_eq!(parameter_type(&declaration, 1), Type::Invalid);
    }

    #[test]
    fn test_duplicate_function_and_unknown_restriction() {
        let (_, context) = analyze(vec![
            function("f", vec![header(vec![generic("T", Some(vec!["Colorful"]))], Vec::new(), ty("void"))], Vec::new()),
            function("f", vec![header(Vec::new(), Vec::new(), ty("void"))], Vec::new()),
        ]);
        let messages: Vec<&str> = context.incidents().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Unknown restriction 'Colorful' on generic 'T'", "Function 'f' is already declared"]
        );
    }

    #[test]
    fn test_builtin_call_with_abstract_first_argument() {
        for arguments in [vec![literal("0.0"), var("x")], vec![var("x"), literal("0.0")]] {
            let (functions, context) = analyze(vec![function(
                "positive",
                vec![header(Vec::new(), vec![("x", ty("f32"))], ty("f32"))],
                vec![return_stmt(Some(call_expr("max", arguments)))],
            )]);
            assert!(context.incidents().is_empty(), "{:?}", context.incidents());
            assert_eq!(functions[0].body.as_ref().unwrap().return_type, Type::F32);
        }
    }

    #[test]
    fn test_builtin_name_clash() {
        let (_, context) = analyze(vec![function("abs", vec![header(Vec::new(), Vec::new(), ty("void"))], Vec::new())]);
        assert_eq!(context.incidents().len(), 1);
    }
}
