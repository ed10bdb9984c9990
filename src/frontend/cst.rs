//! Concrete syntax tree handed over by the external parser
//!
//! The tree is immutable once deserialized. Every node carries its source
//! range; the node discriminant is the `type` field of the JSON object.

use crate::utils::SourceRange;
use serde::Deserialize;

/// A complete compilation unit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCst {
    pub range: SourceRange,
    #[serde(default)]
    pub declarations: Vec<DeclarationCst>,
}

// ==================== Declarations ====================

/// Top-level declarations
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum DeclarationCst {
    #[serde(rename = "FunctionDeclaration")]
    Function(FunctionDeclarationCst),
    #[serde(rename = "EnumDeclaration")]
    Enum(EnumDeclarationCst),
    #[serde(rename = "StructDeclaration")]
    Struct(StructDeclarationCst),
    #[serde(rename = "AliasDeclaration")]
    Alias(AliasDeclarationCst),
    #[serde(rename = "VariableDeclaration")]
    Variable(VariableDeclarationCst),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclarationCst {
    pub range: SourceRange,
    pub name: String,
    pub headers: Vec<FunctionHeaderCst>,
    pub block: BlockCst,
}

/// One overload of a function
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionHeaderCst {
    pub range: SourceRange,
    #[serde(default)]
    pub generics: Vec<GenericCst>,
    #[serde(default)]
    pub parameters: Vec<ParameterCst>,
    pub return_type: TypeCst,
}

/// Generic parameter, optionally restricted to a list of meta type tags
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericCst {
    pub range: SourceRange,
    pub name: String,
    #[serde(default)]
    pub restrictions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterCst {
    pub range: SourceRange,
    pub name: String,
    pub type_declaration: TypeCst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDeclarationCst {
    pub range: SourceRange,
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValueCst>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueCst {
    pub range: SourceRange,
    pub name: String,
    #[serde(default)]
    pub value: Option<LiteralCst>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDeclarationCst {
    pub range: SourceRange,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<StructPropertyCst>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructPropertyCst {
    pub range: SourceRange,
    pub name: String,
    pub type_declaration: TypeCst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasDeclarationCst {
    pub range: SourceRange,
    pub name: String,
    pub type_declaration: TypeCst,
}

/// Variable declaration, local (`const`, `let`) or global
/// (`const`, `private`, `workgroup`, `uniform`, `storage`, `handle`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclarationCst {
    pub range: SourceRange,
    pub declaration_type: String,
    pub name: String,
    #[serde(default)]
    pub type_declaration: Option<TypeCst>,
    #[serde(default)]
    pub expression: Option<ExpressionCst>,
}

/// Type reference such as `vec3<f32>`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCst {
    pub range: SourceRange,
    pub name: String,
    #[serde(default)]
    pub generics: Vec<TypeCst>,
}

// ==================== Statements ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StatementCst {
    #[serde(rename = "BlockStatement")]
    Block(BlockCst),
    #[serde(rename = "IfStatement")]
    If(IfCst),
    #[serde(rename = "WhileStatement")]
    While(WhileCst),
    #[serde(rename = "DoWhileStatement")]
    DoWhile(WhileCst),
    #[serde(rename = "ForStatement")]
    For(ForCst),
    #[serde(rename = "SwitchStatement")]
    Switch(SwitchCst),
    #[serde(rename = "AssignmentStatement")]
    Assignment(AssignmentCst),
    #[serde(rename = "IncrementDecrementStatement")]
    IncrementDecrement(IncrementDecrementCst),
    #[serde(rename = "VariableDeclarationStatement")]
    VariableDeclaration(VariableDeclarationCst),
    #[serde(rename = "ReturnStatement")]
    Return(ReturnCst),
    #[serde(rename = "BreakStatement")]
    Break(FlowCst),
    #[serde(rename = "ContinueStatement")]
    Continue(FlowCst),
    #[serde(rename = "DiscardStatement")]
    Discard(FlowCst),
    #[serde(rename = "FunctionCallStatement")]
    FunctionCall(FunctionCallStatementCst),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockCst {
    pub range: SourceRange,
    #[serde(default)]
    pub statements: Vec<StatementCst>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfCst {
    pub range: SourceRange,
    pub expression: ExpressionCst,
    pub block: BlockCst,
    #[serde(default)]
    pub else_branch: Option<ElseCst>,
}

/// `else { }` or `else if`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ElseCst {
    #[serde(rename = "BlockStatement")]
    Block(BlockCst),
    #[serde(rename = "IfStatement")]
    If(Box<IfCst>),
}

/// Shared by `while` and `do-while`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhileCst {
    pub range: SourceRange,
    pub expression: ExpressionCst,
    pub block: BlockCst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForCst {
    pub range: SourceRange,
    #[serde(default)]
    pub init: Option<VariableDeclarationCst>,
    #[serde(default)]
    pub expression: Option<ExpressionCst>,
    #[serde(default)]
    pub update: Option<Box<StatementCst>>,
    pub block: BlockCst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCst {
    pub range: SourceRange,
    pub expression: ExpressionCst,
    #[serde(default)]
    pub cases: Vec<SwitchCaseCst>,
    #[serde(default)]
    pub default: Option<BlockCst>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCaseCst {
    pub range: SourceRange,
    pub expressions: Vec<ExpressionCst>,
    pub block: BlockCst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCst {
    pub range: SourceRange,
    pub operator: String,
    pub variable: ExpressionCst,
    pub expression: ExpressionCst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementDecrementCst {
    pub range: SourceRange,
    pub operator: String,
    pub expression: ExpressionCst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCst {
    pub range: SourceRange,
    #[serde(default)]
    pub expression: Option<ExpressionCst>,
}

/// `break`, `continue` and `discard` carry nothing but their position
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowCst {
    pub range: SourceRange,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallStatementCst {
    pub range: SourceRange,
    pub call: FunctionCallCst,
}

// ==================== Expressions ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ExpressionCst {
    #[serde(rename = "ArithmeticExpression")]
    Arithmetic(BinaryExpressionCst),
    #[serde(rename = "BitOperationExpression")]
    Bitwise(BinaryExpressionCst),
    #[serde(rename = "ComparisonExpression")]
    Comparison(BinaryExpressionCst),
    #[serde(rename = "LogicalExpression")]
    Logical(BinaryExpressionCst),
    #[serde(rename = "UnaryExpression")]
    Unary(UnaryExpressionCst),
    #[serde(rename = "AddressOfExpression")]
    AddressOf(NestedExpressionCst),
    #[serde(rename = "PointerExpression")]
    PointerDereference(NestedExpressionCst),
    #[serde(rename = "ParenthesizedExpression")]
    Parenthesized(NestedExpressionCst),
    #[serde(rename = "VariableNameExpression")]
    VariableName(VariableNameCst),
    #[serde(rename = "LiteralValueExpression")]
    Literal(LiteralCst),
    #[serde(rename = "FunctionCallExpression")]
    FunctionCall(FunctionCallCst),
    #[serde(rename = "IndexedValueExpression")]
    IndexedValue(IndexedValueCst),
    #[serde(rename = "ValueDecompositionExpression")]
    ValueDecomposition(ValueDecompositionCst),
    #[serde(rename = "ConversionExpression")]
    Conversion(ConversionCst),
}

impl ExpressionCst {
    pub fn range(&self) -> SourceRange {
        match self {
            Self::Arithmetic(cst)
            | Self::Bitwise(cst)
            | Self::Comparison(cst)
            | Self::Logical(cst) => cst.range,
            Self::Unary(cst) => cst.range,
            Self::AddressOf(cst) | Self::PointerDereference(cst) | Self::Parenthesized(cst) => {
                cst.range
            }
            Self::VariableName(cst) => cst.range,
            Self::Literal(cst) => cst.range,
            Self::FunctionCall(cst) => cst.range,
            Self::IndexedValue(cst) => cst.range,
            Self::ValueDecomposition(cst) => cst.range,
            Self::Conversion(cst) => cst.range,
        }
    }
}

/// Any two-operand expression
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryExpressionCst {
    pub range: SourceRange,
    pub left: Box<ExpressionCst>,
    pub operator: String,
    pub right: Box<ExpressionCst>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnaryExpressionCst {
    pub range: SourceRange,
    pub operator: String,
    pub expression: Box<ExpressionCst>,
}

/// Expression wrapping exactly one other expression
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedExpressionCst {
    pub range: SourceRange,
    pub expression: Box<ExpressionCst>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableNameCst {
    pub range: SourceRange,
    pub name: String,
}

/// Literal as written in the source, e.g. `5`, `1.5f`, `0xFFu`, `true`, `"text"`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralCst {
    pub range: SourceRange,
    pub text_value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallCst {
    pub range: SourceRange,
    pub name: String,
    #[serde(default)]
    pub generics: Vec<TypeCst>,
    #[serde(default)]
    pub parameters: Vec<ExpressionCst>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedValueCst {
    pub range: SourceRange,
    pub value: Box<ExpressionCst>,
    pub index: Box<ExpressionCst>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueDecompositionCst {
    pub range: SourceRange,
    pub value: Box<ExpressionCst>,
    pub property: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionCst {
    pub range: SourceRange,
    pub target: TypeCst,
    pub expression: Box<ExpressionCst>,
}

/// Access to the source range of a CST node
pub trait HasRange {
    fn range(&self) -> SourceRange;
}

macro_rules! impl_has_range {
    ($($cst:ty),* $(,)?) => {
        $(
            impl HasRange for $cst {
                fn range(&self) -> SourceRange {
                    self.range
                }
            }
        )*
    };
}

impl_has_range!(
    DocumentCst,
    FunctionDeclarationCst,
    FunctionHeaderCst,
    EnumDeclarationCst,
    StructDeclarationCst,
    AliasDeclarationCst,
    VariableDeclarationCst,
    TypeCst,
    BlockCst,
    IfCst,
    WhileCst,
    ForCst,
    SwitchCst,
    AssignmentCst,
    IncrementDecrementCst,
    ReturnCst,
    FlowCst,
    FunctionCallStatementCst,
    BinaryExpressionCst,
    UnaryExpressionCst,
    NestedExpressionCst,
    VariableNameCst,
    LiteralCst,
    FunctionCallCst,
    IndexedValueCst,
    ValueDecompositionCst,
    ConversionCst,
);

impl HasRange for ExpressionCst {
    fn range(&self) -> SourceRange {
        ExpressionCst::range(self)
    }
}

/// Fixture constructors for tests
#[cfg(test)]
pub mod build {
    use super::*;

    pub fn range() -> SourceRange {
        SourceRange::new(1, 1, 1, 10)
    }

    pub fn ty(name: &str) -> TypeCst {
        TypeCst { range: range(), name: name.to_string(), generics: Vec::new() }
    }

    pub fn generic_ty(name: &str, generics: Vec<TypeCst>) -> TypeCst {
        TypeCst { range: range(), name: name.to_string(), generics }
    }

    pub fn literal(text: &str) -> ExpressionCst {
        ExpressionCst::Literal(LiteralCst { range: range(), text_value: text.to_string() })
    }

    pub fn var(name: &str) -> ExpressionCst {
        ExpressionCst::VariableName(VariableNameCst { range: range(), name: name.to_string() })
    }

    fn binary(left: ExpressionCst, operator: &str, right: ExpressionCst) -> BinaryExpressionCst {
        BinaryExpressionCst {
            range: range(),
            left: Box::new(left),
            operator: operator.to_string(),
            right: Box::new(right),
        }
    }

    pub fn arithmetic(left: ExpressionCst, operator: &str, right: ExpressionCst) -> ExpressionCst {
        ExpressionCst::Arithmetic(binary(left, operator, right))
    }

    pub fn bitwise(left: ExpressionCst, operator: &str, right: ExpressionCst) -> ExpressionCst {
        ExpressionCst::Bitwise(binary(left, operator, right))
    }

    pub fn comparison(left: ExpressionCst, operator: &str, right: ExpressionCst) -> ExpressionCst {
        ExpressionCst::Comparison(binary(left, operator, right))
    }

    pub fn logical(left: ExpressionCst, operator: &str, right: ExpressionCst) -> ExpressionCst {
        ExpressionCst::Logical(binary(left, operator, right))
    }

    pub fn unary(operator: &str, expression: ExpressionCst) -> ExpressionCst {
        ExpressionCst::Unary(UnaryExpressionCst {
            range: range(),
            operator: operator.to_string(),
            expression: Box::new(expression),
        })
    }

    pub fn address_of(expression: ExpressionCst) -> ExpressionCst {
        ExpressionCst::AddressOf(NestedExpressionCst { range: range(), expression: Box::new(expression) })
    }

    pub fn deref(expression: ExpressionCst) -> ExpressionCst {
        ExpressionCst::PointerDereference(NestedExpressionCst {
            range: range(),
            expression: Box::new(expression),
        })
    }

    pub fn paren(expression: ExpressionCst) -> ExpressionCst {
        ExpressionCst::Parenthesized(NestedExpressionCst { range: range(), expression: Box::new(expression) })
    }

    pub fn call(name: &str, parameters: Vec<ExpressionCst>) -> FunctionCallCst {
        FunctionCallCst { range: range(), name: name.to_string(), generics: Vec::new(), parameters }
    }

    pub fn call_expr(name: &str, parameters: Vec<ExpressionCst>) -> ExpressionCst {
        ExpressionCst::FunctionCall(call(name, parameters))
    }

    pub fn index(value: ExpressionCst, index: ExpressionCst) -> ExpressionCst {
        ExpressionCst::IndexedValue(IndexedValueCst {
            range: range(),
            value: Box::new(value),
            index: Box::new(index),
        })
    }

    pub fn member(value: ExpressionCst, property: &str) -> ExpressionCst {
        ExpressionCst::ValueDecomposition(ValueDecompositionCst {
            range: range(),
            value: Box::new(value),
            property: property.to_string(),
        })
    }

    pub fn convert(target: TypeCst, expression: ExpressionCst) -> ExpressionCst {
        ExpressionCst::Conversion(ConversionCst { range: range(), target, expression: Box::new(expression) })
    }

    pub fn declaration(
        declaration_type: &str,
        name: &str,
        type_declaration: Option<TypeCst>,
        expression: Option<ExpressionCst>,
    ) -> VariableDeclarationCst {
        VariableDeclarationCst {
            range: range(),
            declaration_type: declaration_type.to_string(),
            name: name.to_string(),
            type_declaration,
            expression,
        }
    }

    pub fn let_stmt(name: &str, type_declaration: Option<TypeCst>, expression: ExpressionCst) -> StatementCst {
        StatementCst::VariableDeclaration(declaration("let", name, type_declaration, Some(expression)))
    }

    pub fn block(statements: Vec<StatementCst>) -> BlockCst {
        BlockCst { range: range(), statements }
    }

    pub fn block_stmt(statements: Vec<StatementCst>) -> StatementCst {
        StatementCst::Block(block(statements))
    }

    pub fn return_stmt(expression: Option<ExpressionCst>) -> StatementCst {
        StatementCst::Return(ReturnCst { range: range(), expression })
    }

    pub fn break_stmt() -> StatementCst {
        StatementCst::Break(FlowCst { range: range() })
    }

    pub fn continue_stmt() -> StatementCst {
        StatementCst::Continue(FlowCst { range: range() })
    }

    pub fn while_stmt(expression: ExpressionCst, statements: Vec<StatementCst>) -> StatementCst {
        StatementCst::While(WhileCst { range: range(), expression, block: block(statements) })
    }

    pub fn assign(variable: ExpressionCst, operator: &str, expression: ExpressionCst) -> StatementCst {
        StatementCst::Assignment(AssignmentCst {
            range: range(),
            operator: operator.to_string(),
            variable,
            expression,
        })
    }

    pub fn header(
        generics: Vec<GenericCst>,
        parameters: Vec<(&str, TypeCst)>,
        return_type: TypeCst,
    ) -> FunctionHeaderCst {
        FunctionHeaderCst {
            range: range(),
            generics,
            parameters: parameters
                .into_iter()
                .map(|(name, type_declaration)| ParameterCst {
                    range: range(),
                    name: name.to_string(),
                    type_declaration,
                })
                .collect(),
            return_type,
        }
    }

    pub fn generic(name: &str, restrictions: Option<Vec<&str>>) -> GenericCst {
        GenericCst {
            range: range(),
            name: name.to_string(),
            restrictions: restrictions.map(|r| r.into_iter().map(str::to_string).collect()),
        }
    }

    pub fn function(name: &str, headers: Vec<FunctionHeaderCst>, statements: Vec<StatementCst>) -> DeclarationCst {
        DeclarationCst::Function(FunctionDeclarationCst {
            range: range(),
            name: name.to_string(),
            headers,
            block: block(statements),
        })
    }

    pub fn enum_decl(name: &str, values: Vec<(&str, Option<&str>)>) -> DeclarationCst {
        DeclarationCst::Enum(EnumDeclarationCst {
            range: range(),
            name: name.to_string(),
            values: values
                .into_iter()
                .map(|(name, value)| EnumValueCst {
                    range: range(),
                    name: name.to_string(),
                    value: value.map(|text| LiteralCst { range: range(), text_value: text.to_string() }),
                })
                .collect(),
        })
    }

    pub fn struct_decl(name: &str, properties: Vec<(&str, TypeCst)>) -> DeclarationCst {
        DeclarationCst::Struct(StructDeclarationCst {
            range: range(),
            name: name.to_string(),
            properties: properties
                .into_iter()
                .map(|(name, type_declaration)| StructPropertyCst {
                    range: range(),
                    name: name.to_string(),
                    type_declaration,
                })
                .collect(),
        })
    }

    pub fn alias_decl(name: &str, type_declaration: TypeCst) -> DeclarationCst {
        DeclarationCst::Alias(AliasDeclarationCst { range: range(), name: name.to_string(), type_declaration })
    }

    pub fn global(
        declaration_type: &str,
        name: &str,
        type_declaration: Option<TypeCst>,
        expression: Option<ExpressionCst>,
    ) -> DeclarationCst {
        DeclarationCst::Variable(declaration(declaration_type, name, type_declaration, expression))
    }

    pub fn document(declarations: Vec<DeclarationCst>) -> DocumentCst {
        DocumentCst { range: range(), declarations }
    }
}
