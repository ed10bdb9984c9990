//! `return`, `break`, `continue` and `discard`

use crate::frontend::context::{Context, ScopeKind, ScopeOwner};
use crate::frontend::cst::{FlowCst, ReturnCst};
use crate::frontend::expression::{process_optional, Expression};
use crate::frontend::node::{NodeKind, NodeRef};
use crate::frontend::symbols::HeaderType;
use crate::types::Type;
use crate::utils::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnData {
    /// Type of the returned value, `void` for a bare `return`
    pub value_type: Type,
}

pub struct ReturnStatement<'a> {
    pub expression: Option<Expression<'a>>,
}

impl<'a> NodeKind<'a> for ReturnStatement<'a> {
    type Cst = ReturnCst;
    type Data = ReturnData;

    const NAME: &'static str = "return statement";

    fn build(cst: &'a ReturnCst) -> Self {
        Self {
            expression: cst.expression.as_ref().map(Expression::new),
        }
    }

    fn on_process(&mut self, _cst: &'a ReturnCst, this: NodeRef, context: &mut Context) -> Result<ReturnData> {
        let value_type = process_optional(&mut self.expression, context)?
            .map_or(Type::Void, |value| value.resolve_type.clone());

        let declaration = match context.has_scope(ScopeKind::Function) {
            Some(ScopeOwner::Function { declaration, .. }) => Some(declaration.clone()),
            Some(_) => None,
            None => {
                context.push_incident("Return statement can only be used inside a function", Some(this));
                return Ok(ReturnData { value_type });
            }
        };

        // With several headers the expected type depends on the caller.
        // TODO: check against every header once bodies are analysed per header.
        if let Some(declaration) = declaration.filter(|declaration| declaration.headers.len() == 1) {
            if let HeaderType::Concrete(expected) = &declaration.headers[0].return_type {
                if !value_type.is_invalid() && !expected.is_invalid() && !value_type.is_implicit_castable_into(expected) {
                    context.push_incident(
                        format!(
                            "Return type {} doesn't match the return type {} of '{}'",
                            value_type, expected, declaration.name
                        ),
                        Some(this),
                    );
                }
            }
        }

        Ok(ReturnData { value_type })
    }
}

/// Declares a keyword statement that is only legal inside certain scopes
macro_rules! scoped_keyword {
    ($(#[$attr:meta])* $name:ident, $node_name:literal, [$($scope:ident),+], $message:literal) => {
        $(#[$attr])*
        pub struct $name;

        impl<'a> NodeKind<'a> for $name {
            type Cst = FlowCst;
            type Data = ();

            const NAME: &'static str = $node_name;

            fn build(_cst: &'a FlowCst) -> Self {
                Self
            }

            fn on_process(&mut self, _cst: &'a FlowCst, this: NodeRef, context: &mut Context) -> Result<()> {
                if $(context.has_scope(ScopeKind::$scope).is_none())&&+ {
                    context.push_incident($message, Some(this));
                }
                Ok(())
            }
        }
    };
}

scoped_keyword!(
    BreakStatement,
    "break statement",
    [Loop, Switch],
    "Break statement can only be used inside a loop or switch"
);

scoped_keyword!(
    ContinueStatement,
    "continue statement",
    [Loop],
    "Continue statement can only be used inside a loop"
);

scoped_keyword!(
    /// Ends the current fragment invocation
    DiscardStatement,
    "discard statement",
    [Function],
    "Discard statement can only be used inside a function"
);
