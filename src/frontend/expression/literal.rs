//! Literal values: booleans, strings, and integer or float numbers with
//! the WGSL suffixes `i`, `u`, `f` and `h`

use super::ExpressionData;
use crate::frontend::context::Context;
use crate::frontend::cst::LiteralCst;
use crate::frontend::node::{NodeKind, NodeRef};
use crate::types::{ConstantValue, FixedState, NumericKind, Type};
use crate::utils::Result;

pub struct LiteralExpression;

impl<'a> NodeKind<'a> for LiteralExpression {
    type Cst = LiteralCst;
    type Data = ExpressionData;

    const NAME: &'static str = "literal value expression";

    fn build(_cst: &'a LiteralCst) -> Self {
        Self
    }

    fn on_process(&mut self, cst: &'a LiteralCst, this: NodeRef, context: &mut Context) -> Result<ExpressionData> {
        match parse_literal(&cst.text_value) {
            Some((value, ty)) => Ok(ExpressionData {
                constant_value: Some(value),
                ..ExpressionData::value(ty, FixedState::Constant)
            }),
            None => {
                context.push_incident(format!("Invalid literal '{}'", cst.text_value), Some(this));
                Ok(ExpressionData::value(Type::Invalid, FixedState::Constant))
            }
        }
    }
}

/// Parse literal text into its value and type
pub fn parse_literal(text: &str) -> Option<(ConstantValue, Type)> {
    match text {
        "true" => return Some((ConstantValue::Boolean(true), Type::BOOL)),
        "false" => return Some((ConstantValue::Boolean(false), Type::BOOL)),
        _ => {}
    }

    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        let inner = &text[1..text.len() - 1];
        return Some((ConstantValue::String(inner.to_string()), Type::String));
    }

    // Hex digits include 'f', so hex literals only take integer suffixes
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        let (digits, kind) = integer_suffix(hex);
        let value = i64::from_str_radix(digits, 16).ok()?;
        return integer(value, kind);
    }

    let (body, suffix) = match text.char_indices().last()? {
        (index, suffix @ ('i' | 'u' | 'f' | 'h')) => (&text[..index], Some(suffix)),
        _ => (text, None),
    };
    let float_syntax = body.contains(|c| matches!(c, '.' | 'e' | 'E'));

    match suffix {
        Some('f') => float(body, NumericKind::Float),
        Some('h') => float(body, NumericKind::Float16),
        None if float_syntax => float(body, NumericKind::AbstractFloat),
        _ if float_syntax => None,
        _ => {
            let (digits, kind) = integer_suffix(text);
            integer(digits.parse().ok()?, kind)
        }
    }
}

fn integer_suffix(text: &str) -> (&str, NumericKind) {
    if let Some(digits) = text.strip_suffix('i') {
        (digits, NumericKind::Integer)
    } else if let Some(digits) = text.strip_suffix('u') {
        (digits, NumericKind::UnsignedInteger)
    } else {
        (text, NumericKind::AbstractInteger)
    }
}

fn integer(value: i64, kind: NumericKind) -> Option<(ConstantValue, Type)> {
    let fits = match kind {
        NumericKind::Integer => i32::try_from(value).is_ok(),
        NumericKind::UnsignedInteger => u32::try_from(value).is_ok(),
        _ => true,
    };
    fits.then(|| (ConstantValue::Integer(value), Type::Numeric(kind)))
}

fn float(body: &str, kind: NumericKind) -> Option<(ConstantValue, Type)> {
    if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let value: f64 = body.parse().ok()?;
    Some((ConstantValue::Float(value), Type::Numeric(kind)))
}
