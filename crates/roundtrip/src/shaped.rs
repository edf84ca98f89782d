//! Links Rust types to their [`TypeShape`] and to [`Value`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use crate::errors::ValidationError;
use crate::shape::{EnumShape, TypeShape};
use crate::value::Value;

/// Types that can be synthesized and compared by the validator.
pub trait Shaped: Sized {
    /// The shape used to pick a synthesis rule and to key the value cache.
    fn shape() -> TypeShape;

    /// Converts to a dynamic value.
    fn to_value(&self) -> Value;

    /// Converts from a dynamic value of this type's shape.
    fn from_value(value: &Value) -> Result<Self, ValidationError>;
}

/// Enumerated types with a closed, statically known member list.
///
/// Use [`crate::impl_enum_shape`] rather than implementing this by hand.
pub trait EnumShaped: Shaped + Copy + Ord + 'static {
    /// The enum's shape descriptor.
    const SHAPE: EnumShape;

    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Name of this member.
    fn variant_name(&self) -> &'static str;

    /// Looks up a member by name.
    fn from_variant_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.variant_name() == name)
    }
}

/// Builds the error for a value that doesn't fit `T`.
#[doc(hidden)]
pub fn unexpected<T: Shaped>(value: &Value) -> ValidationError {
    ValidationError::ValueConversion {
        expected: T::shape(),
        found: format!("{value:?}"),
    }
}

/// Shared `from_value` body for enums generated by [`crate::impl_enum_shape`].
#[doc(hidden)]
pub fn enum_from_value<E: EnumShaped>(value: &Value) -> Result<E, ValidationError> {
    match value {
        Value::Enum(name) => E::from_variant_name(name).ok_or_else(|| unexpected::<E>(value)),
        _ => Err(unexpected::<E>(value)),
    }
}

fn elems_from_values<T: Shaped>(values: &[Value]) -> Result<Vec<T>, ValidationError> {
    values.iter().map(T::from_value).collect()
}

/// Simple macro to wrap the scalar types, not much to see.
macro_rules! impl_scalar_shaped {
    ( $ty:ty => $variant:ident ) => {
        impl Shaped for $ty {
            fn shape() -> TypeShape {
                TypeShape::$variant
            }

            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn from_value(value: &Value) -> Result<Self, ValidationError> {
                match value {
                    Value::$variant(v) => Ok(v.clone()),
                    _ => Err(unexpected::<Self>(value)),
                }
            }
        }
    };
}

impl_scalar_shaped!(bool => Bool);
impl_scalar_shaped!(i8 => Int8);
impl_scalar_shaped!(i32 => Int32);
impl_scalar_shaped!(i64 => Int64);
impl_scalar_shaped!(f32 => Float32);
impl_scalar_shaped!(f64 => Float64);
impl_scalar_shaped!(String => Str);

/// Opaque mutable byte buffer.
///
/// Plain `Vec<u8>` is an ordered list of bytes as far as shapes are
/// concerned, this wrapper marks a buffer that gets freshly synthesized on
/// every request.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ByteBuf(Vec<u8>);

impl ByteBuf {
    /// Wraps a vec.
    pub fn new(inner: Vec<u8>) -> Self {
        Self(inner)
    }

    /// Returns the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Takes out the inner vec.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(inner: Vec<u8>) -> Self {
        Self(inner)
    }
}

impl From<ByteBuf> for Vec<u8> {
    fn from(buf: ByteBuf) -> Self {
        buf.0
    }
}

impl AsRef<[u8]> for ByteBuf {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for ByteBuf {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl Shaped for ByteBuf {
    fn shape() -> TypeShape {
        TypeShape::Bytes
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.0.clone())
    }

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Bytes(b) => Ok(Self(b.clone())),
            _ => Err(unexpected::<Self>(value)),
        }
    }
}

/// Set holding members of one enum type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumSet<E: EnumShaped>(BTreeSet<E>);

impl<E: EnumShaped> EnumSet<E> {
    /// Constructs an empty set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Constructs a set holding every member of `E`.
    pub fn all() -> Self {
        E::ALL.iter().copied().collect()
    }

    /// Adds a member, returning if it was newly inserted.
    pub fn insert(&mut self, member: E) -> bool {
        self.0.insert(member)
    }

    /// Returns if the member is present.
    pub fn contains(&self, member: &E) -> bool {
        self.0.contains(member)
    }

    /// Number of members present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns if no members are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over members in order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.0.iter()
    }
}

impl<E: EnumShaped> Default for EnumSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnumShaped> FromIterator<E> for EnumSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<E: EnumShaped> Shaped for EnumSet<E> {
    fn shape() -> TypeShape {
        TypeShape::EnumSet(E::SHAPE)
    }

    fn to_value(&self) -> Value {
        Value::EnumSet(self.0.iter().map(EnumShaped::variant_name).collect())
    }

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let Value::EnumSet(names) = value else {
            return Err(unexpected::<Self>(value));
        };

        names
            .iter()
            .map(|name| E::from_variant_name(name).ok_or_else(|| unexpected::<Self>(value)))
            .collect()
    }
}

impl<T: Shaped> Shaped for Box<[T]> {
    fn shape() -> TypeShape {
        TypeShape::array(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Shaped::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Array(items) => Ok(elems_from_values(items)?.into_boxed_slice()),
            _ => Err(unexpected::<Self>(value)),
        }
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::list(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Shaped::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::List(items) => elems_from_values(items),
            _ => Err(unexpected::<Self>(value)),
        }
    }
}

impl<T: Shaped + Ord> Shaped for BTreeSet<T> {
    fn shape() -> TypeShape {
        TypeShape::set(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(Shaped::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Set(items) => Ok(elems_from_values(items)?.into_iter().collect()),
            _ => Err(unexpected::<Self>(value)),
        }
    }
}

impl<T: Shaped + Eq + Hash> Shaped for HashSet<T> {
    fn shape() -> TypeShape {
        TypeShape::set(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(Shaped::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Set(items) => Ok(elems_from_values(items)?.into_iter().collect()),
            _ => Err(unexpected::<Self>(value)),
        }
    }
}

fn entries_from_values<K: Shaped, V: Shaped>(
    entries: &[(Value, Value)],
) -> Result<Vec<(K, V)>, ValidationError> {
    entries
        .iter()
        .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
        .collect()
}

impl<K: Shaped + Ord, V: Shaped> Shaped for BTreeMap<K, V> {
    fn shape() -> TypeShape {
        TypeShape::map(K::shape(), V::shape())
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Map(entries) => Ok(entries_from_values(entries)?.into_iter().collect()),
            _ => Err(unexpected::<Self>(value)),
        }
    }
}

impl<K: Shaped + Eq + Hash, V: Shaped> Shaped for HashMap<K, V> {
    fn shape() -> TypeShape {
        TypeShape::map(K::shape(), V::shape())
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Map(entries) => Ok(entries_from_values(entries)?.into_iter().collect()),
            _ => Err(unexpected::<Self>(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_enum_shape;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    enum Lane {
        Fast,
        Slow,
    }

    impl_enum_shape!(Lane { Fast, Slow });

    #[test]
    fn test_container_shapes() {
        assert_eq!(Vec::<i32>::shape(), TypeShape::list(TypeShape::Int32));
        assert_eq!(Box::<[String]>::shape(), TypeShape::array(TypeShape::Str));
        assert_eq!(BTreeSet::<i64>::shape(), HashSet::<i64>::shape());
        assert_eq!(
            HashMap::<String, ByteBuf>::shape(),
            TypeShape::map(TypeShape::Str, TypeShape::Bytes)
        );
        assert_eq!(
            EnumSet::<Lane>::shape(),
            TypeShape::EnumSet(EnumShape::new("Lane", &["Fast", "Slow"]))
        );
    }

    #[test]
    fn test_enum_conversion() {
        assert_eq!(Lane::Slow.to_value(), Value::Enum("Slow"));
        assert_eq!(Lane::from_value(&Value::Enum("Fast")).unwrap(), Lane::Fast);

        let err = Lane::from_value(&Value::Enum("Sideways")).unwrap_err();
        assert!(matches!(err, ValidationError::ValueConversion { .. }));
    }

    #[test]
    fn test_enum_set_all() {
        let all = EnumSet::<Lane>::all();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&Lane::Fast));
        assert_eq!(all.to_value(), Value::EnumSet(vec!["Slow", "Fast"]));
    }

    #[test]
    fn test_wrong_value_kind_is_rejected() {
        let err = Vec::<i32>::from_value(&Value::Set(vec![Value::Int32(1)])).unwrap_err();
        match err {
            ValidationError::ValueConversion { expected, .. } => {
                assert_eq!(expected, TypeShape::list(TypeShape::Int32));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_map_round_trips_through_value() {
        let mut map = HashMap::new();
        map.insert("abc".to_owned(), 7i64);
        map.insert("xyz".to_owned(), 9i64);
        let back = HashMap::<String, i64>::from_value(&map.to_value()).unwrap();
        assert_eq!(map, back);
    }
}
