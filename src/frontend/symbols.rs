//! Document level symbols: functions, enums, structs and aliases
//!
//! These are collected before any function body is analysed, so the order of
//! declarations in the document does not matter for lookups.

use crate::types::{ConstantValue, MetaType, StructType, Type};
use crate::utils::SourceRange;
use std::collections::HashMap;
use std::rc::Rc;

/// Declared type of a parameter or return value
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderType {
    Concrete(Type),
    /// Name of one of the header's generic parameters
    Generic(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    pub name: String,
    pub ty: HeaderType,
}

/// Generic parameter. `None` restrictions accept any valid type.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParameter {
    pub name: String,
    pub restrictions: Option<Vec<MetaType>>,
}

/// One overload of a function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionHeader {
    pub parameters: Vec<FunctionParameter>,
    pub generics: Vec<GenericParameter>,
    pub return_type: HeaderType,
}

impl FunctionHeader {
    pub fn generic(&self, name: &str) -> Option<&GenericParameter> {
        self.generics.iter().find(|g| g.name == name)
    }
}

/// A function with all of its overloads in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub headers: Vec<FunctionHeader>,
    /// Where the function is declared. `None` for builtins.
    pub range: Option<SourceRange>,
}

impl FunctionDeclaration {
    pub fn is_builtin(&self) -> bool {
        self.range.is_none()
    }
}

/// An enum with its members' values
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclaration {
    pub name: String,
    pub underlying: Type,
    pub members: Vec<(String, ConstantValue)>,
}

impl EnumDeclaration {
    pub fn member(&self, name: &str) -> Option<&ConstantValue> {
        self.members.iter().find(|(n, _)| n == name).map(|(_, value)| value)
    }

    pub fn ty(&self) -> Type {
        Type::enumeration(self.name.clone(), self.underlying.clone())
    }
}

/// Symbol tables of one document
#[derive(Debug, Default)]
pub struct DocumentSymbols {
    functions: HashMap<String, Rc<FunctionDeclaration>>,
    enums: HashMap<String, Rc<EnumDeclaration>>,
    structs: HashMap<String, Rc<StructType>>,
    aliases: HashMap<String, Type>,
}

impl DocumentSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any type-like declaration uses `name`
    pub fn has_type_name(&self, name: &str) -> bool {
        self.enums.contains_key(name) || self.structs.contains_key(name) || self.aliases.contains_key(name)
    }

    /// Define a function. Returns false when the name is taken.
    pub fn add_function(&mut self, declaration: FunctionDeclaration) -> bool {
        if self.functions.contains_key(&declaration.name) {
            return false;
        }
        self.functions.insert(declaration.name.clone(), Rc::new(declaration));
        true
    }

    pub fn function(&self, name: &str) -> Option<Rc<FunctionDeclaration>> {
        self.functions.get(name).cloned()
    }

    /// Define an enum. Returns false when the name is taken.
    pub fn add_enum(&mut self, declaration: EnumDeclaration) -> bool {
        if self.has_type_name(&declaration.name) {
            return false;
        }
        self.enums.insert(declaration.name.clone(), Rc::new(declaration));
        true
    }

    pub fn enumeration(&self, name: &str) -> Option<Rc<EnumDeclaration>> {
        self.enums.get(name).cloned()
    }

    /// Define a struct. Returns false when the name is taken.
    pub fn add_struct(&mut self, layout: Rc<StructType>) -> bool {
        if self.has_type_name(&layout.name) {
            return false;
        }
        self.structs.insert(layout.name.clone(), layout);
        true
    }

    pub fn structure(&self, name: &str) -> Option<Rc<StructType>> {
        self.structs.get(name).cloned()
    }

    /// Define a type alias. Returns false when the name is taken.
    pub fn add_alias(&mut self, name: &str, ty: Type) -> bool {
        if self.has_type_name(name) {
            return false;
        }
        self.aliases.insert(name.to_string(), ty);
        true
    }

    pub fn alias(&self, name: &str) -> Option<&Type> {
        self.aliases.get(name)
    }
}
