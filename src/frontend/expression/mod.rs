//! Expression analysis
//!
//! Every expression node computes the same core facts: its resolved type,
//! whether it is a compile-time constant (and the folded value, if any), and
//! whether it denotes a storage location together with that location's
//! address space.

pub mod access;
pub mod arithmetic;
pub mod bitwise;
pub mod call;
pub mod comparison;
pub mod conversion;
pub mod literal;
pub mod logical;
pub mod pointer;
pub mod unary;
pub mod variable;

use crate::frontend::context::Context;
use crate::frontend::cst::ExpressionCst;
use crate::frontend::node::{Node, NodeRef};
use crate::types::{AddressSpace, ConstantValue, FixedState, Type};
use crate::utils::Result;

pub use access::{IndexedValueExpression, ValueDecompositionExpression};
pub use arithmetic::{ArithmeticExpression, ArithmeticOperator};
pub use bitwise::{BitwiseExpression, BitwiseOperator};
pub use call::{FunctionCallData, FunctionCallExpression};
pub use comparison::{ComparisonExpression, ComparisonOperator};
pub use conversion::ConversionExpression;
pub use literal::{parse_literal, LiteralExpression};
pub use logical::{LogicalExpression, LogicalOperator};
pub use pointer::{AddressOfExpression, ParenthesizedExpression, PointerDereferenceExpression};
pub use unary::{UnaryExpression, UnaryOperator};
pub use variable::VariableNameExpression;

/// Semantic facts shared by all expressions
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionData {
    pub resolve_type: Type,
    pub fixed_state: FixedState,
    pub constant_value: Option<ConstantValue>,
    pub is_storage: bool,
    pub storage_address_space: AddressSpace,
    /// The expression names an enum itself, as in `Mode` of `Mode.Fast`
    pub is_enum_name: bool,
}

impl ExpressionData {
    /// A computed value that is not a storage location
    pub fn value(resolve_type: Type, fixed_state: FixedState) -> Self {
        Self {
            resolve_type,
            fixed_state,
            constant_value: None,
            is_storage: false,
            storage_address_space: AddressSpace::Function,
            is_enum_name: false,
        }
    }

    /// Result of an expression that could not be resolved
    pub fn invalid() -> Self {
        Self::value(Type::Invalid, FixedState::Variable)
    }
}

impl AsRef<ExpressionData> for ExpressionData {
    fn as_ref(&self) -> &ExpressionData {
        self
    }
}

/// Expression data together with the operator it was resolved for
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorExpressionData<O> {
    pub expression: ExpressionData,
    pub operator: O,
}

impl<O> AsRef<ExpressionData> for OperatorExpressionData<O> {
    fn as_ref(&self) -> &ExpressionData {
        &self.expression
    }
}

/// Any expression node
pub enum Expression<'a> {
    Arithmetic(Node<'a, ArithmeticExpression<'a>>),
    Bitwise(Node<'a, BitwiseExpression<'a>>),
    Comparison(Node<'a, ComparisonExpression<'a>>),
    Logical(Node<'a, LogicalExpression<'a>>),
    Unary(Node<'a, UnaryExpression<'a>>),
    AddressOf(Node<'a, AddressOfExpression<'a>>),
    PointerDereference(Node<'a, PointerDereferenceExpression<'a>>),
    Parenthesized(Node<'a, ParenthesizedExpression<'a>>),
    VariableName(Node<'a, VariableNameExpression>),
    Literal(Node<'a, LiteralExpression>),
    FunctionCall(Node<'a, FunctionCallExpression<'a>>),
    IndexedValue(Node<'a, IndexedValueExpression<'a>>),
    ValueDecomposition(Node<'a, ValueDecompositionExpression<'a>>),
    Conversion(Node<'a, ConversionExpression<'a>>),
}

/// Run the same code on whatever node an expression holds
macro_rules! for_each_expression {
    ($expression:expr, $node:ident => $body:expr) => {
        match $expression {
            Expression::Arithmetic($node) => $body,
            Expression::Bitwise($node) => $body,
            Expression::Comparison($node) => $body,
            Expression::Logical($node) => $body,
            Expression::Unary($node) => $body,
            Expression::AddressOf($node) => $body,
            Expression::PointerDereference($node) => $body,
            Expression::Parenthesized($node) => $body,
            Expression::VariableName($node) => $body,
            Expression::Literal($node) => $body,
            Expression::FunctionCall($node) => $body,
            Expression::IndexedValue($node) => $body,
            Expression::ValueDecomposition($node) => $body,
            Expression::Conversion($node) => $body,
        }
    };
}

impl<'a> Expression<'a> {
    pub fn new(cst: &'a ExpressionCst) -> Self {
        match cst {
            ExpressionCst::Arithmetic(cst) => Self::Arithmetic(Node::new(cst)),
            ExpressionCst::Bitwise(cst) => Self::Bitwise(Node::new(cst)),
            ExpressionCst::Comparison(cst) => Self::Comparison(Node::new(cst)),
            ExpressionCst::Logical(cst) => Self::Logical(Node::new(cst)),
            ExpressionCst::Unary(cst) => Self::Unary(Node::new(cst)),
            ExpressionCst::AddressOf(cst) => Self::AddressOf(Node::new(cst)),
            ExpressionCst::PointerDereference(cst) => Self::PointerDereference(Node::new(cst)),
            ExpressionCst::Parenthesized(cst) => Self::Parenthesized(Node::new(cst)),
            ExpressionCst::VariableName(cst) => Self::VariableName(Node::new(cst)),
            ExpressionCst::Literal(cst) => Self::Literal(Node::new(cst)),
            ExpressionCst::FunctionCall(cst) => Self::FunctionCall(Node::new(cst)),
            ExpressionCst::IndexedValue(cst) => Self::IndexedValue(Node::new(cst)),
            ExpressionCst::ValueDecomposition(cst) => Self::ValueDecomposition(Node::new(cst)),
            ExpressionCst::Conversion(cst) => Self::Conversion(Node::new(cst)),
        }
    }

    /// Boxed construction for child slots
    pub fn boxed(cst: &'a ExpressionCst) -> Box<Self> {
        Box::new(Self::new(cst))
    }

    pub fn process(mut self, context: &mut Context) -> Result<Self> {
        self.process_mut(context)?;
        Ok(self)
    }

    pub fn process_mut(&mut self, context: &mut Context) -> Result<()> {
        for_each_expression!(self, node => node.process_mut(context))
    }

    /// Shared expression facts. Fails when the node was not processed yet.
    pub fn data(&self) -> Result<&ExpressionData> {
        for_each_expression!(self, node => node.data().map(|data| data.as_ref()))
    }

    pub fn node_ref(&self) -> NodeRef {
        for_each_expression!(self, node => node.node_ref())
    }
}

/// Whether a type is an integer scalar usable as i32 or u32
pub(crate) fn is_integer_castable(ty: &Type) -> bool {
    ty.is_implicit_castable_into(&Type::I32) || ty.is_implicit_castable_into(&Type::U32)
}

/// Process an optional expression and hand out its data
pub(crate) fn process_optional<'e>(
    expression: &'e mut Option<Expression<'_>>,
    context: &mut Context,
) -> Result<Option<&'e ExpressionData>> {
    match expression {
        Some(expression) => {
            expression.process_mut(context)?;
            Ok(Some(expression.data()?))
        }
        None => Ok(None),
    }
}
