//! Equality and cast relations between types

use super::type_system::Type;

impl Type {
    /// Language level type equality. `Invalid` equals nothing, not even itself.
    pub fn equals(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Invalid, _) | (_, Type::Invalid) => false,
            (Type::Void, Type::Void)
            | (Type::Boolean, Type::Boolean)
            | (Type::String, Type::String) => true,
            (Type::Numeric(a), Type::Numeric(b)) => a == b,
            (
                Type::Vector { dimension: da, inner: ia },
                Type::Vector { dimension: db, inner: ib },
            ) => da == db && ia.equals(ib),
            (
                Type::Matrix { rows: ra, columns: ca, inner: ia },
                Type::Matrix { rows: rb, columns: cb, inner: ib },
            ) => ra == rb && ca == cb && ia.equals(ib),
            (
                Type::Pointer { referenced: ra, address_space: sa },
                Type::Pointer { referenced: rb, address_space: sb },
            ) => sa == sb && ra.equals(rb),
            (Type::Enum { name: a, .. }, Type::Enum { name: b, .. }) => a == b,
            (Type::Struct(a), Type::Struct(b)) => a.name == b.name,
            _ => false,
        }
    }

    /// Whether a value of this type can be used where `target` is expected
    /// without an explicit conversion.
    pub fn is_implicit_castable_into(&self, target: &Type) -> bool {
        match (self, target) {
            (Type::Invalid, _) | (_, Type::Invalid) => false,
            (Type::Numeric(from), Type::Numeric(to)) => from.is_implicit_castable_into(*to),
            (
                Type::Vector { dimension: df, inner: from },
                Type::Vector { dimension: dt, inner: to },
            ) => df == dt && from.is_implicit_castable_into(to),
            (
                Type::Matrix { rows: rf, columns: cf, inner: from },
                Type::Matrix { rows: rt, columns: ct, inner: to },
            ) => rf == rt && cf == ct && from.is_implicit_castable_into(to),
            // The address space of a pointer is fixed at the call site, not by the type.
            (Type::Pointer { referenced: from, .. }, Type::Pointer { referenced: to, .. }) => {
                from.equals(to)
            }
            // Booleans, enums, strings and structs only into themselves.
            _ => self.equals(target),
        }
    }

    /// Explicit conversions, a superset of the implicit ones.
    ///
    /// Booleans only convert into themselves.
    pub fn is_explicit_castable_into(&self, target: &Type) -> bool {
        if self.is_implicit_castable_into(target) {
            return true;
        }

        match (self, target) {
            (Type::Invalid, _) | (Type::Boolean, _) => false,
            (Type::Numeric(_), Type::Numeric(_)) => true,
            (
                Type::Vector { dimension: df, inner: from },
                Type::Vector { dimension: dt, inner: to },
            ) => df == dt && from.is_explicit_castable_into(to),
            (
                Type::Matrix { rows: rf, columns: cf, inner: from },
                Type::Matrix { rows: rt, columns: ct, inner: to },
            ) => rf == rt && cf == ct && from.is_explicit_castable_into(to),
            (Type::Enum { underlying, .. }, _) => underlying.is_explicit_castable_into(target),
            _ => false,
        }
    }

    /// Two types are compatible when either one widens into the other.
    pub fn is_mutually_castable(&self, other: &Type) -> bool {
        self.is_implicit_castable_into(other) || other.is_implicit_castable_into(self)
    }

    /// The type both operands end up in. Keeps `self` unless only `self`
    /// widens into `other`.
    pub fn common_type(&self, other: &Type) -> Type {
        if !other.is_implicit_castable_into(self) && self.is_implicit_castable_into(other) {
            other.clone()
        } else {
            self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{AddressSpace, Type};
    use pretty_assertions::assert_eq;

    fn concrete_types() -> Vec<Type> {
        vec![
            Type::Void,
            Type::BOOL,
            Type::I32,
            Type::U32,
            Type::F32,
            Type::F16,
            Type::ABSTRACT_INT,
            Type::ABSTRACT_FLOAT,
            Type::String,
            Type::vector(3, Type::F32),
            Type::matrix(4, 4, Type::F32),
            Type::pointer(Type::I32, AddressSpace::Function),
            Type::enumeration("Mode", Type::I32),
        ]
    }

    #[test]
    fn test_implicit_cast_is_reflexive() {
        for ty in concrete_types() {
            assert!(ty.is_implicit_castable_into(&ty), "{} into itself", ty);
        }
        assert!(!Type::Invalid.is_implicit_castable_into(&Type::Invalid));
    }

    #[test]
    fn test_invalid_equals_nothing() {
        assert!(!Type::Invalid.equals(&Type::Invalid));
        assert!(!Type::Invalid.equals(&Type::I32));
    }

    #[test]
    fn test_enum_equality_by_name() {
        let a = Type::enumeration("Mode", Type::I32);
        let b = Type::enumeration("Mode", Type::I32);
        let c = Type::enumeration("Light", Type::I32);
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        assert!(!a.is_implicit_castable_into(&Type::I32));
        assert!(a.is_explicit_castable_into(&Type::I32));
    }

    #[test]
    fn test_numeric_widening() {
        assert!(Type::ABSTRACT_INT.is_implicit_castable_into(&Type::U32));
        assert!(Type::ABSTRACT_INT.is_implicit_castable_into(&Type::F32));
        assert!(Type::ABSTRACT_FLOAT.is_implicit_castable_into(&Type::F32));
        assert!(!Type::ABSTRACT_FLOAT.is_implicit_castable_into(&Type::I32));
        assert!(Type::F16.is_implicit_castable_into(&Type::F32));
        assert!(!Type::F32.is_implicit_castable_into(&Type::F16));
        assert!(!Type::I32.is_implicit_castable_into(&Type::U32));
        assert!(Type::F16.is_mutually_castable(&Type::F32));
        assert!(!Type::I32.is_mutually_castable(&Type::U32));
    }

    #[test]
    fn test_boolean_never_converts() {
        assert!(!Type::BOOL.is_implicit_castable_into(&Type::I32));
        assert!(!Type::BOOL.is_explicit_castable_into(&Type::I32));
        assert!(Type::BOOL.is_explicit_castable_into(&Type::BOOL));
        assert!(!Type::Invalid.is_explicit_castable_into(&Type::Invalid));
    }

    #[test]
    fn test_explicit_numeric_conversion() {
        assert!(Type::F32.is_explicit_castable_into(&Type::I32));
        assert!(Type::vector(2, Type::F32).is_explicit_castable_into(&Type::vector(2, Type::U32)));
        assert!(!Type::vector(2, Type::F32).is_explicit_castable_into(&Type::vector(3, Type::U32)));
    }

    #[test]
    fn test_vector_lifting() {
        let abstract_vector = Type::vector(3, Type::ABSTRACT_INT);
        assert!(abstract_vector.is_implicit_castable_into(&Type::vector(3, Type::F32)));
        assert!(!abstract_vector.is_implicit_castable_into(&Type::vector(2, Type::F32)));
    }

    #[test]
    fn test_pointer_cast_ignores_address_space() {
        let function = Type::pointer(Type::I32, AddressSpace::Function);
        let private = Type::pointer(Type::I32, AddressSpace::Private);
        assert!(private.is_implicit_castable_into(&function));
        assert!(!private.equals(&function));
    }

    #[test]
    fn test_common_type() {
        assert_eq!(Type::ABSTRACT_INT.common_type(&Type::U32), Type::U32);
        assert_eq!(Type::F32.common_type(&Type::F16), Type::F32);
        assert_eq!(Type::F32.common_type(&Type::F32), Type::F32);
    }
}
