//! Resolution of written type references (`vec3<f32>`, `mat2x4<f32>`, `Light`)

use crate::frontend::context::Context;
use crate::frontend::cst::TypeCst;
use crate::frontend::node::NodeRef;
use crate::frontend::symbols::{GenericParameter, HeaderType};
use crate::types::{AddressSpace, Type};

fn type_node(cst: &TypeCst) -> NodeRef {
    NodeRef {
        kind: "type declaration",
        range: cst.range,
    }
}

/// Resolve a type reference. Unknown or malformed references push an
/// incident and resolve to `Invalid`.
pub fn resolve_type(context: &mut Context, cst: &TypeCst) -> Type {
    let this = Some(type_node(cst));

    if let Some(scalar) = scalar_type(&cst.name) {
        if !cst.generics.is_empty() {
            context.push_incident(format!("Type '{}' takes no generic arguments", cst.name), this);
            return Type::Invalid;
        }
        return scalar;
    }

    if let Some(dimension) = vector_dimension(&cst.name) {
        let Some(inner) = single_generic(context, cst) else {
            return Type::Invalid;
        };
        if inner.is_invalid() {
            return Type::Invalid;
        }
        if !matches!(inner, Type::Boolean | Type::Numeric(_)) {
            context.push_incident(format!("Vector element type must be scalar, found {}", inner), this);
            return Type::Invalid;
        }
        return Type::vector(dimension, inner);
    }

    if let Some((columns, rows)) = matrix_shape(&cst.name) {
        let Some(inner) = single_generic(context, cst) else {
            return Type::Invalid;
        };
        if inner.is_invalid() {
            return Type::Invalid;
        }
        if !inner.numeric_kind().is_some_and(|kind| kind.is_float()) {
            context.push_incident(format!("Matrix element type must be a float, found {}", inner), this);
            return Type::Invalid;
        }
        return Type::matrix(rows, columns, inner);
    }

    if cst.name == "ptr" {
        return match single_generic(context, cst) {
            Some(inner) if inner.is_invalid() => Type::Invalid,
            Some(inner) => Type::pointer(inner, AddressSpace::Function),
            None => Type::Invalid,
        };
    }

    let named = {
        let symbols = context.symbols();
        symbols
            .alias(&cst.name)
            .cloned()
            .or_else(|| symbols.enumeration(&cst.name).map(|e| e.ty()))
            .or_else(|| symbols.structure(&cst.name).map(Type::Struct))
    };
    match named {
        Some(ty) if cst.generics.is_empty() => {
            context.register_symbol_usage(&cst.name);
            ty
        }
        Some(_) => {
            context.push_incident(format!("Type '{}' takes no generic arguments", cst.name), this);
            Type::Invalid
        }
        None => {
            context.push_incident(format!("Type '{}' can't be found", cst.name), this);
            Type::Invalid
        }
    }
}

/// Resolve a parameter or return type of a function header, where a bare
/// generic name refers to one of the header's generic parameters.
pub fn resolve_header_type(context: &mut Context, cst: &TypeCst, generics: &[GenericParameter]) -> HeaderType {
    if cst.generics.is_empty() && generics.iter().any(|g| g.name == cst.name) {
        return HeaderType::Generic(cst.name.clone());
    }
    HeaderType::Concrete(resolve_type(context, cst))
}

fn scalar_type(name: &str) -> Option<Type> {
    let ty = match name {
        "bool" => Type::BOOL,
        "i32" => Type::I32,
        "u32" => Type::U32,
        "f32" => Type::F32,
        "f16" => Type::F16,
        "string" => Type::String,
        "void" => Type::Void,
        _ => return None,
    };
    Some(ty)
}

fn vector_dimension(name: &str) -> Option<u8> {
    match name {
        "vec2" => Some(2),
        "vec3" => Some(3),
        "vec4" => Some(4),
        _ => None,
    }
}

/// `matCxR` as (columns, rows)
fn matrix_shape(name: &str) -> Option<(u8, u8)> {
    let shape = name.strip_prefix("mat")?.as_bytes();
    match shape {
        [columns @ b'2'..=b'4', b'x', rows @ b'2'..=b'4'] => Some((columns - b'0', rows - b'0')),
        _ => None,
    }
}

fn single_generic(context: &mut Context, cst: &TypeCst) -> Option<Type> {
    match cst.generics.as_slice() {
        [inner] => Some(resolve_type(context, inner)),
        _ => {
            context.push_incident(
                format!("Type '{}' needs exactly one generic argument", cst.name),
                Some(type_node(cst)),
            );
            None
        }
    }
}
