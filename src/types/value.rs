//! Compile-time constant values

use super::type_system::NumericKind;
use serde::Serialize;
use std::fmt;

/// A value known at analysis time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConstantValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl ConstantValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Fold unary `-`
    pub fn negate(&self) -> Option<ConstantValue> {
        match self {
            Self::Integer(value) => value.checked_neg().map(Self::Integer),
            Self::Float(value) => Some(Self::Float(-value)),
            _ => None,
        }
    }

    /// Fold unary `~` within the width of `kind`
    pub fn bit_not(&self, kind: NumericKind) -> Option<ConstantValue> {
        let value = self.as_integer()?;
        let folded = match kind {
            NumericKind::Integer => i64::from(!(value as i32)),
            NumericKind::UnsignedInteger => i64::from(!(value as u32)),
            NumericKind::AbstractInteger => !value,
            _ => return None,
        };
        Some(Self::Integer(folded))
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Boolean(value) => write!(f, "{}", value),
            Self::String(value) => write!(f, "\"{}\"", value),
        }
    }
}
