//! Built-in functions available in every PGSL document

use log::trace;

use crate::frontend::symbols::{
    DocumentSymbols, FunctionDeclaration, FunctionHeader, FunctionParameter, GenericParameter, HeaderType,
};
use crate::types::{MetaType, Type};

/// Names of all builtin functions
pub const BUILTIN_FUNCTIONS: [&str; 12] = [
    "abs", "min", "max", "clamp", "sqrt", "floor", "ceil", "sin", "cos", "select", "all", "any",
];

/// Component wise math over numeric scalars and vectors. Vectors carry the
/// tags of their element, so `vec3<bool>` is rejected.
const NUMERIC: &[MetaType] = &[MetaType::Numeric];
/// Float math
const FLOAT: &[MetaType] = &[MetaType::Float, MetaType::Float16];
const SELECTABLE: &[MetaType] = &[MetaType::Scalar, MetaType::Vector];

fn generic(restrictions: &[MetaType]) -> GenericParameter {
    GenericParameter {
        name: "T".to_string(),
        restrictions: Some(restrictions.to_vec()),
    }
}

fn parameter(name: &str, ty: HeaderType) -> FunctionParameter {
    FunctionParameter {
        name: name.to_string(),
        ty,
    }
}

fn t() -> HeaderType {
    HeaderType::Generic("T".to_string())
}

/// `(T, ..) -> T` over the named parameters
fn generic_header(restrictions: &[MetaType], parameters: &[&str]) -> FunctionHeader {
    FunctionHeader {
        parameters: parameters.iter().map(|name| parameter(name, t())).collect(),
        generics: vec![generic(restrictions)],
        return_type: t(),
    }
}

/// Reduction of a bool vector to a single bool, with a pass through for bool
/// scalars
fn reduction_headers() -> Vec<FunctionHeader> {
    let reduce = |ty: Type| FunctionHeader {
        parameters: vec![parameter("e", HeaderType::Concrete(ty))],
        generics: Vec::new(),
        return_type: HeaderType::Concrete(Type::BOOL),
    };
    (2..=4)
        .map(|dimension| reduce(Type::vector(dimension, Type::BOOL)))
        .chain([reduce(Type::BOOL)])
        .collect()
}

fn headers_of(name: &str) -> Vec<FunctionHeader> {
    match name {
        "abs" => vec![generic_header(NUMERIC, &["e"])],
        "min" | "max" => vec![generic_header(NUMERIC, &["e1", "e2"])],
        "clamp" => vec![generic_header(NUMERIC, &["e", "low", "high"])],
        "select" => {
            let mut header = generic_header(SELECTABLE, &["f", "t"]);
            header.parameters.push(parameter("cond", HeaderType::Concrete(Type::BOOL)));
            vec![header]
        }
        "all" | "any" => reduction_headers(),
        _ => vec![generic_header(FLOAT, &["e"])],
    }
}

/// Define every builtin function in `symbols`
pub fn register_builtins(symbols: &mut DocumentSymbols) {
    for name in BUILTIN_FUNCTIONS {
        let registered = symbols.add_function(FunctionDeclaration {
            name: name.to_string(),
            headers: headers_of(name),
            range: None,
        });
        if registered {
            trace!("registered builtin '{}'", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::overload::{resolve, CallArgument, ReturnType};
    use crate::types::AddressSpace;
    use pretty_assertions::assert_eq;

    fn call(symbols: &DocumentSymbols, name: &str, arguments: &[Type]) -> Option<ReturnType> {
        let declaration = symbols.function(name)?;
        let arguments: Vec<CallArgument> = arguments
            .iter()
            .map(|ty| CallArgument {
                ty,
                storage_address_space: AddressSpace::Function,
            })
            .collect();
        resolve(&declaration, &arguments, &[]).map(|resolution| resolution.return_type)
    }

    fn symbols() -> DocumentSymbols {
        let mut symbols = DocumentSymbols::new();
        register_builtins(&mut symbols);
        symbols
    }

    #[test]
    fn test_all_builtins_registered() {
        let symbols = symbols();
        for name in BUILTIN_FUNCTIONS {
            let declaration = symbols.function(name).unwrap();
            assert!(declaration.is_builtin());
            assert!(!declaration.headers.is_empty());
        }
    }

    #[test]
    fn test_component_wise_math() {
        let symbols = symbols();
        let vec3 = Type::vector(3, Type::F32);
        assert_eq!(
            call(&symbols, "clamp", &[vec3.clone(), vec3.clone(), vec3.clone()]),
            Some(ReturnType::Resolved(vec3))
        );
        assert_eq!(
            call(&symbols, "max", &[Type::I32, Type::ABSTRACT_INT]),
            Some(ReturnType::Resolved(Type::I32))
        );
        assert_eq!(call(&symbols, "abs", &[Type::BOOL]), None);
        assert_eq!(call(&symbols, "min", &[Type::vector(2, Type::BOOL), Type::vector(2, Type::BOOL)]), None);
    }

    #[test]
    fn test_float_only_functions() {
        let symbols = symbols();
        assert_eq!(call(&symbols, "sqrt", &[Type::F16]), Some(ReturnType::Resolved(Type::F16)));
        assert_eq!(call(&symbols, "floor", &[Type::I32]), None);
        assert_eq!(call(&symbols, "sqrt", &[Type::vector(3, Type::BOOL)]), None);
        assert_eq!(call(&symbols, "ceil", &[Type::vector(2, Type::I32)]), None);
        let half = Type::vector(4, Type::F16);
        assert_eq!(call(&symbols, "sin", &[half.clone()]), Some(ReturnType::Resolved(half)));
    }

    #[test]
    fn test_reductions() {
        let symbols = symbols();
        let flags = Type::vector(4, Type::BOOL);
        assert_eq!(call(&symbols, "any", &[flags]), Some(ReturnType::Resolved(Type::BOOL)));
        assert_eq!(call(&symbols, "all", &[Type::BOOL]), Some(ReturnType::Resolved(Type::BOOL)));
        assert_eq!(call(&symbols, "any", &[Type::vector(3, Type::F32)]), None);
        assert_eq!(call(&symbols, "all", &[Type::F32]), None);
        assert_eq!(
            call(&symbols, "select", &[Type::F32, Type::F32, Type::BOOL]),
            Some(ReturnType::Resolved(Type::F32))
        );
    }
}
