//! Type-driven value synthesis.

use rand::{Rng, RngCore};
use tracing::*;

use crate::context::ValidationContext;
use crate::errors::ValidationError;
use crate::shape::TypeShape;
use crate::value::Value;

/// Bytes 8-bit integers are drawn from.
const INT8_DIGITS: &[u8] = b"1234";

/// Alphabet strings are drawn from.
const STRING_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Produces a representative value for a shape.
///
/// Overrides seeded into the context win, then memoized values, then the
/// generic rules.  Everything except byte buffers is memoized before
/// returning, so every later request for the same shape in this run yields
/// the same value.  Byte buffers are freshly randomized on every call.
///
/// Fails with [`ValidationError::UnsupportedShape`] if no rule matches the
/// shape or anything nested in it.  Nothing is memoized for a shape whose
/// synthesis failed.
pub fn synthesize(shape: &TypeShape, ctx: &mut ValidationContext) -> Result<Value, ValidationError> {
    if let Some(v) = ctx.lookup(shape) {
        return Ok(v.clone());
    }

    let value = generate(shape, ctx)?;
    trace!(%shape, ?value, "synthesized value");

    if !shape.is_uncached() {
        ctx.remember(shape.clone(), value.clone());
    }

    Ok(value)
}

fn generate(shape: &TypeShape, ctx: &mut ValidationContext) -> Result<Value, ValidationError> {
    let cfg = ctx.config();
    let int_bound = cfg.int_bound.clamp(1, i32::MAX as i64);
    let string_len = cfg.string_len;
    let buffer_len = cfg.buffer_len;
    let array_len = cfg.array_len;

    let rng = ctx.rng();
    let value = match shape {
        TypeShape::Bool => Value::Bool(rng.random()),
        TypeShape::Int8 => Value::Int8(INT8_DIGITS[rng.random_range(0..INT8_DIGITS.len())] as i8),
        TypeShape::Int32 => Value::Int32(rng.random_range(0..int_bound) as i32),
        TypeShape::Int64 => Value::Int64(rng.random_range(0..int_bound)),
        TypeShape::Float32 => Value::Float32(rng.random()),
        TypeShape::Float64 => Value::Float64(rng.random()),
        TypeShape::Str => Value::Str(
            (0..string_len)
                .map(|_| STRING_ALPHABET[rng.random_range(0..STRING_ALPHABET.len())] as char)
                .collect(),
        ),
        TypeShape::Bytes => {
            let mut buf = vec![0; buffer_len];
            rng.fill_bytes(&mut buf);
            Value::Bytes(buf)
        }
        TypeShape::Enum(e) => {
            let variants = e.variants();
            if variants.is_empty() {
                return Err(unsupported(shape));
            }
            Value::Enum(variants[rng.random_range(0..variants.len())])
        }
        TypeShape::EnumSet(e) => Value::EnumSet(e.variants().to_vec()),
        TypeShape::Array(elem) => Value::Array(
            (0..array_len)
                .map(|_| synthesize(elem, ctx))
                .collect::<Result<_, _>>()?,
        ),
        TypeShape::List(elem) => Value::List(vec![synthesize(elem, ctx)?]),
        TypeShape::Set(elem) => Value::Set(vec![synthesize(elem, ctx)?]),
        TypeShape::Map(k, v) => {
            let key = synthesize(k, ctx)?;
            let value = synthesize(v, ctx)?;
            Value::Map(vec![(key, value)])
        }
        TypeShape::Record(_) | TypeShape::Parametrized { .. } => return Err(unsupported(shape)),
    };

    Ok(value)
}

fn unsupported(shape: &TypeShape) -> ValidationError {
    error!(%shape, "no synthesis rule for shape");
    ValidationError::UnsupportedShape {
        shape: shape.clone(),
    }
}
