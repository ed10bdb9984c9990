//! Overload resolution for function calls
//!
//! Headers are tried in declaration order and the first one that accepts
//! every argument wins. While matching, an unbound generic only checks its
//! restrictions. Once every argument is accepted, the generic is bound to the
//! common type of all arguments passed for it.

use crate::frontend::symbols::{FunctionDeclaration, FunctionHeader, HeaderType};
use crate::types::{AddressSpace, Type};
use log::debug;
use std::collections::HashMap;

/// What the resolver needs to know about one call argument
#[derive(Debug, Clone, Copy)]
pub struct CallArgument<'t> {
    pub ty: &'t Type,
    /// Address space of the argument when it is a storage location
    pub storage_address_space: AddressSpace,
}

/// The header a call resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub header_index: usize,
    /// Generic bindings in the header's declaration order
    pub generics: Vec<(String, Type)>,
    /// Parameter types after substitution. Pointer parameters carry the
    /// address space of their argument.
    pub parameter_types: Vec<Type>,
    pub return_type: ReturnType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReturnType {
    Resolved(Type),
    /// The return type names a generic that no argument or explicit
    /// generic bound
    Unbound(String),
}

/// Find the first header accepting `arguments`.
///
/// `explicit_generics` are generic arguments written at the call site. When
/// present only headers with exactly that many generics are candidates, and
/// those generics are bound up front.
pub fn resolve(
    declaration: &FunctionDeclaration,
    arguments: &[CallArgument<'_>],
    explicit_generics: &[Type],
) -> Option<Resolution> {
    declaration
        .headers
        .iter()
        .enumerate()
        .find_map(|(index, header)| match_header(header, arguments, explicit_generics).map(|(generics, parameter_types, return_type)| {
            debug!("call to '{}' resolved to header #{}", declaration.name, index);
            Resolution {
                header_index: index,
                generics,
                parameter_types,
                return_type,
            }
        }))
}

type HeaderMatch = (Vec<(String, Type)>, Vec<Type>, ReturnType);

fn match_header(header: &FunctionHeader, arguments: &[CallArgument<'_>], explicit_generics: &[Type]) -> Option<HeaderMatch> {
    if header.parameters.len() != arguments.len() {
        return None;
    }
    if !explicit_generics.is_empty() && header.generics.len() != explicit_generics.len() {
        return None;
    }

    let mut bound: HashMap<&str, Type> = header
        .generics
        .iter()
        .zip(explicit_generics)
        .map(|(generic, ty)| (generic.name.as_str(), ty.clone()))
        .collect();

    let mut inferred: HashMap<&str, Vec<&Type>> = HashMap::new();
    for (parameter, argument) in header.parameters.iter().zip(arguments) {
        let accepted = match &parameter.ty {
            HeaderType::Concrete(ty) => argument.ty.is_implicit_castable_into(ty),
            HeaderType::Generic(name) => match bound.get(name.as_str()) {
                Some(ty) => argument.ty.is_implicit_castable_into(ty),
                None => {
                    let generic = header.generic(name)?;
                    let allowed = match &generic.restrictions {
                        None => !argument.ty.is_invalid(),
                        Some(tags) => argument.ty.meta_types().iter().any(|tag| tags.contains(tag)),
                    };
                    inferred.entry(generic.name.as_str()).or_default().push(argument.ty);
                    allowed
                }
            },
        };
        if !accepted {
            return None;
        }
    }

    for (name, types) in inferred {
        let (first, rest) = types.split_first()?;
        let mut common = (*first).clone();
        for ty in rest {
            if !common.is_mutually_castable(ty) {
                return None;
            }
            common = common.common_type(ty);
        }
        bound.insert(name, common);
    }

    let mut parameter_types: Vec<Type> = header
        .parameters
        .iter()
        .map(|parameter| match &parameter.ty {
            HeaderType::Concrete(ty) => Some(ty.clone()),
            HeaderType::Generic(name) => bound.get(name.as_str()).cloned(),
        })
        .collect::<Option<_>>()?;

    for (ty, argument) in parameter_types.iter_mut().zip(arguments) {
        if let Type::Pointer { address_space, .. } = ty {
            *address_space = match argument.ty {
                Type::Pointer { address_space: space, .. } => *space,
                _ => argument.storage_address_space,
            };
        }
    }

    let return_type = match &header.return_type {
        HeaderType::Concrete(ty) => ReturnType::Resolved(ty.clone()),
        HeaderType::Generic(name) => match bound.get(name.as_str()) {
            Some(ty) => ReturnType::Resolved(ty.clone()),
            None => ReturnType::Unbound(name.clone()),
        },
    };

    let generics = header
        .generics
        .iter()
        .filter_map(|generic| bound.get(generic.name.as_str()).map(|ty| (generic.name.clone(), ty.clone())))
        .collect();

    Some((generics, parameter_types, return_type))
}
