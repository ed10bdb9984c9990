//! Type lattice: type variants, property bundles and cast relations

pub mod type_system;
mod cast;
mod value;

pub use type_system::{
    AddressSpace, FixedState, MetaType, NumericKind, StructMember, StructType, Type,
    TypeProperties,
};
pub use value::ConstantValue;
