//! Type System for PGSL
//!
//! Types are plain values. They are compared structurally and may be created
//! ad hoc during analysis, e.g. the `vec3<bool>` produced by a vectorized
//! comparison.

use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Numeric kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NumericKind {
    /// Integer literal without suffix
    AbstractInteger,
    /// Float literal without suffix
    AbstractFloat,
    /// i32
    Integer,
    /// u32
    UnsignedInteger,
    /// f16
    Float16,
    /// f32
    Float,
}

impl NumericKind {
    /// Bit width
    pub fn width(&self) -> u32 {
        match self {
            Self::AbstractInteger | Self::AbstractFloat => 64,
            Self::Integer | Self::UnsignedInteger | Self::Float => 32,
            Self::Float16 => 16,
        }
    }

    pub fn is_signed(&self) -> bool {
        !matches!(self, Self::UnsignedInteger)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::AbstractFloat | Self::Float16 | Self::Float)
    }

    pub fn is_integer(&self) -> bool {
        !self.is_float()
    }

    /// Abstract kinds only exist for literals and constant expressions.
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Self::AbstractInteger | Self::AbstractFloat)
    }

    /// The kind an abstract literal takes when it has to be materialized.
    pub fn concretize(&self) -> NumericKind {
        match self {
            Self::AbstractInteger => Self::Integer,
            Self::AbstractFloat => Self::Float,
            other => *other,
        }
    }

    /// Widening table between numeric kinds.
    pub fn is_implicit_castable_into(&self, target: NumericKind) -> bool {
        if *self == target {
            return true;
        }

        matches!(
            (self, target),
            (Self::AbstractInteger, _)
                | (Self::AbstractFloat, Self::Float16 | Self::Float)
                | (Self::Float16, Self::Float)
        )
    }
}

/// Where a value or the referent of a pointer lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AddressSpace {
    #[default]
    Function,
    Private,
    Workgroup,
    Uniform,
    Storage,
    Handle,
}

impl AddressSpace {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Private => "private",
            Self::Workgroup => "workgroup",
            Self::Uniform => "uniform",
            Self::Storage => "storage",
            Self::Handle => "handle",
        }
    }
}

/// Whether a value is known at compile time
///
/// Ordered so that `min` of two states is the state of a combined expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FixedState {
    Variable,
    Constant,
}

/// A member of a struct type
#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    pub name: String,
    pub ty: Type,
}

/// Struct type layout
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub name: String,
    pub members: Vec<StructMember>,
}

impl StructType {
    pub fn member(&self, name: &str) -> Option<&StructMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// PGSL type
///
/// The derived `PartialEq` is plain structural identity. Language level
/// equality, where `Invalid` equals nothing, is [`Type::equals`].
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Could not be resolved. An incident was already reported.
    Invalid,
    Void,
    Boolean,
    Numeric(NumericKind),
    Vector {
        dimension: u8,
        inner: Box<Type>,
    },
    Matrix {
        rows: u8,
        columns: u8,
        inner: Box<Type>,
    },
    Pointer {
        referenced: Box<Type>,
        address_space: AddressSpace,
    },
    Enum {
        name: String,
        underlying: Box<Type>,
    },
    String,
    Struct(Rc<StructType>),
}

/// Fixed property bundle of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TypeProperties {
    pub storable: bool,
    pub host_shareable: bool,
    pub composite: bool,
    pub constructible: bool,
    pub fixed_footprint: bool,
    pub indexable: bool,
    pub concrete: bool,
    pub scalar: bool,
    pub plain: bool,
}

/// Tags used by generic restrictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetaType {
    Boolean,
    Numeric,
    Integer,
    UnsignedInteger,
    Float,
    Float16,
    Scalar,
    Vector,
    Matrix,
    Pointer,
    Enum,
    String,
    Struct,
}

impl MetaType {
    /// Parse a restriction tag as written in a generic declaration
    pub fn from_name(name: &str) -> Option<MetaType> {
        let tag = match name {
            "Boolean" => Self::Boolean,
            "Numeric" => Self::Numeric,
            "Integer" => Self::Integer,
            "UnsignedInteger" => Self::UnsignedInteger,
            "Float" => Self::Float,
            "Float16" => Self::Float16,
            "Scalar" => Self::Scalar,
            "Vector" => Self::Vector,
            "Matrix" => Self::Matrix,
            "Pointer" => Self::Pointer,
            "Enum" => Self::Enum,
            "String" => Self::String,
            "Struct" => Self::Struct,
            _ => return None,
        };
        Some(tag)
    }
}

impl Type {
    // Constants for common types
    pub const BOOL: Self = Self::Boolean;
    pub const I32: Self = Self::Numeric(NumericKind::Integer);
    pub const U32: Self = Self::Numeric(NumericKind::UnsignedInteger);
    pub const F32: Self = Self::Numeric(NumericKind::Float);
    pub const F16: Self = Self::Numeric(NumericKind::Float16);
    pub const ABSTRACT_INT: Self = Self::Numeric(NumericKind::AbstractInteger);
    pub const ABSTRACT_FLOAT: Self = Self::Numeric(NumericKind::AbstractFloat);

    /// Create a vector type
    pub fn vector(dimension: u8, inner: Type) -> Self {
        Self::Vector {
            dimension,
            inner: Box::new(inner),
        }
    }

    /// Create a matrix type
    pub fn matrix(rows: u8, columns: u8, inner: Type) -> Self {
        Self::Matrix {
            rows,
            columns,
            inner: Box::new(inner),
        }
    }

    /// Create a pointer type
    pub fn pointer(referenced: Type, address_space: AddressSpace) -> Self {
        Self::Pointer {
            referenced: Box::new(referenced),
            address_space,
        }
    }

    /// Create an enum type
    pub fn enumeration(name: impl Into<String>, underlying: Type) -> Self {
        Self::Enum {
            name: name.into(),
            underlying: Box::new(underlying),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    pub fn numeric_kind(&self) -> Option<NumericKind> {
        match self {
            Self::Numeric(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Element type of a vector, the type itself for everything else.
    pub fn element_type(&self) -> &Type {
        match self {
            Self::Vector { inner, .. } => inner,
            other => other,
        }
    }

    /// Property bundle of this type
    pub fn properties(&self) -> TypeProperties {
        match self {
            Self::Invalid => TypeProperties::default(),
            Self::Void | Self::String => TypeProperties {
                concrete: true,
                ..TypeProperties::default()
            },
            Self::Boolean => TypeProperties {
                storable: true,
                host_shareable: false,
                composite: false,
                constructible: true,
                fixed_footprint: true,
                indexable: false,
                concrete: true,
                scalar: true,
                plain: true,
            },
            Self::Numeric(kind) => TypeProperties {
                storable: true,
                host_shareable: kind.is_concrete(),
                composite: false,
                constructible: true,
                fixed_footprint: true,
                indexable: false,
                concrete: kind.is_concrete(),
                scalar: true,
                plain: true,
            },
            Self::Vector { inner, .. } | Self::Matrix { inner, .. } => {
                let inner = inner.properties();
                TypeProperties {
                    storable: inner.storable,
                    host_shareable: inner.host_shareable,
                    composite: true,
                    constructible: inner.constructible,
                    fixed_footprint: true,
                    indexable: true,
                    concrete: inner.concrete,
                    scalar: false,
                    plain: true,
                }
            }
            Self::Pointer { .. } => TypeProperties {
                fixed_footprint: true,
                concrete: true,
                ..TypeProperties::default()
            },
            Self::Enum { underlying, .. } => {
                let underlying = underlying.properties();
                TypeProperties {
                    storable: underlying.storable,
                    host_shareable: false,
                    composite: false,
                    constructible: false,
                    fixed_footprint: underlying.fixed_footprint,
                    indexable: false,
                    concrete: true,
                    scalar: underlying.scalar,
                    plain: true,
                }
            }
            Self::Struct(layout) => {
                let all = |check: fn(&TypeProperties) -> bool| {
                    layout.members.iter().all(|m| check(&m.ty.properties()))
                };
                TypeProperties {
                    storable: all(|p| p.storable),
                    host_shareable: all(|p| p.host_shareable),
                    composite: true,
                    constructible: all(|p| p.constructible),
                    fixed_footprint: all(|p| p.fixed_footprint),
                    indexable: false,
                    concrete: true,
                    scalar: false,
                    plain: all(|p| p.plain),
                }
            }
        }
    }

    /// Meta type tags this type satisfies
    pub fn meta_types(&self) -> Vec<MetaType> {
        match self {
            Self::Invalid | Self::Void => Vec::new(),
            Self::Boolean => vec![MetaType::Boolean, MetaType::Scalar],
            Self::Numeric(kind) => {
                let mut tags = vec![MetaType::Numeric, MetaType::Scalar];
                match kind {
                    NumericKind::AbstractInteger => tags.extend([
                        MetaType::Integer,
                        MetaType::UnsignedInteger,
                        MetaType::Float,
                        MetaType::Float16,
                    ]),
                    NumericKind::AbstractFloat => {
                        tags.extend([MetaType::Float, MetaType::Float16])
                    }
                    NumericKind::Integer => tags.push(MetaType::Integer),
                    NumericKind::UnsignedInteger => tags.push(MetaType::UnsignedInteger),
                    NumericKind::Float16 => tags.push(MetaType::Float16),
                    NumericKind::Float => tags.push(MetaType::Float),
                }
                tags
            }
            // A vector also satisfies the tags of its element, except `Scalar`.
            Self::Vector { inner, .. } => {
                let mut tags = vec![MetaType::Vector];
                tags.extend(inner.meta_types().into_iter().filter(|tag| *tag != MetaType::Scalar));
                tags
            }
            Self::Matrix { .. } => vec![MetaType::Matrix],
            Self::Pointer { .. } => vec![MetaType::Pointer],
            Self::Enum { .. } => vec![MetaType::Enum],
            Self::String => vec![MetaType::String],
            Self::Struct(_) => vec![MetaType::Struct],
        }
    }

    /// Replace abstract numeric kinds by their concrete defaults.
    pub fn concretize(&self) -> Type {
        match self {
            Self::Numeric(kind) => Self::Numeric(kind.concretize()),
            Self::Vector { dimension, inner } => Self::vector(*dimension, inner.concretize()),
            Self::Matrix {
                rows,
                columns,
                inner,
            } => Self::matrix(*rows, *columns, inner.concretize()),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => write!(f, "<invalid>"),
            Self::Void => write!(f, "void"),
            Self::Boolean => write!(f, "bool"),
            Self::Numeric(kind) => write!(f, "{}", kind),
            Self::Vector { dimension, inner } => write!(f, "vec{}<{}>", dimension, inner),
            Self::Matrix {
                rows,
                columns,
                inner,
            } => write!(f, "mat{}x{}<{}>", columns, rows, inner),
            Self::Pointer {
                referenced,
                address_space,
            } => write!(f, "ptr<{}, {}>", address_space.name(), referenced),
            Self::Enum { name, .. } => write!(f, "{}", name),
            Self::String => write!(f, "string"),
            Self::Struct(layout) => write!(f, "{}", layout.name),
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AbstractInteger => "abstract-int",
            Self::AbstractFloat => "abstract-float",
            Self::Integer => "i32",
            Self::UnsignedInteger => "u32",
            Self::Float16 => "f16",
            Self::Float => "f32",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_boolean_properties() {
        let props = Type::BOOL.properties();
        assert!(props.storable);
        assert!(!props.composite);
        assert!(props.constructible);
        assert!(props.fixed_footprint);
        assert!(!props.indexable);
        assert!(props.concrete);
        assert!(props.scalar);
        assert!(props.plain);
        assert!(!props.host_shareable);
    }

    #[test]
    fn test_invalid_has_no_properties() {
        assert_eq!(Type::Invalid.properties(), TypeProperties::default());
    }

    #[test]
    fn test_vector_properties_follow_inner() {
        let abstract_vector = Type::vector(3, Type::ABSTRACT_FLOAT);
        assert!(!abstract_vector.properties().concrete);
        assert!(Type::vector(3, Type::F32).properties().host_shareable);
        assert!(Type::vector(3, Type::F32).properties().indexable);
    }

    #[test]
    fn test_struct_properties() {
        let layout = StructType {
            name: "Light".to_string(),
            members: vec![
                StructMember { name: "color".to_string(), ty: Type::vector(3, Type::F32) },
                StructMember { name: "enabled".to_string(), ty: Type::BOOL },
            ],
        };
        let props = Type::Struct(Rc::new(layout)).properties();
        assert!(props.storable);
        assert!(props.composite);
        assert!(!props.host_shareable);
    }

    #[test]
    fn test_concretize() {
        assert_eq!(Type::ABSTRACT_INT.concretize(), Type::I32);
        assert_eq!(
            Type::vector(2, Type::ABSTRACT_FLOAT).concretize(),
            Type::vector(2, Type::F32)
        );
    }

    #[test]
    fn test_vector_meta_types_include_element() {
        assert_eq!(
            Type::vector(3, Type::F32).meta_types(),
            vec![MetaType::Vector, MetaType::Numeric, MetaType::Float]
        );
        assert_eq!(
            Type::vector(2, Type::BOOL).meta_types(),
            vec![MetaType::Vector, MetaType::Boolean]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Type::matrix(2, 3, Type::F32).to_string(), "mat3x2<f32>");
        assert_eq!(
            Type::pointer(Type::I32, AddressSpace::Private).to_string(),
            "ptr<private, i32>"
        );
    }
}
