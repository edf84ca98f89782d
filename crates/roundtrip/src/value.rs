//! Dynamically typed synthesized values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value synthesized for a [`crate::TypeShape`].
///
/// Collection variants keep their elements in a `Vec` regardless of the
/// concrete container they end up in, the typed side does the conversion.
/// Set, enum set and map values compare without regard to element order.
#[derive(Clone, Debug)]
pub enum Value {
    /// Boolean.
    Bool(bool),

    /// 8-bit integer.
    Int8(i8),

    /// 32-bit integer.
    Int32(i32),

    /// 64-bit integer.
    Int64(i64),

    /// Single precision float.
    Float32(f32),

    /// Double precision float.
    Float64(f64),

    /// String.
    Str(String),

    /// Byte buffer.
    Bytes(Vec<u8>),

    /// Enum member, by name.
    Enum(&'static str),

    /// Array elements.
    Array(Vec<Value>),

    /// List elements.
    List(Vec<Value>),

    /// Set elements.
    Set(Vec<Value>),

    /// Enum set members, by name.
    EnumSet(Vec<&'static str>),

    /// Map entries.
    Map(Vec<(Value, Value)>),

    /// Nested record instance.
    Record(RecordValue),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (Int8(a), Int8(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (Float32(a), Float32(b)) => a == b,
            (Float64(a), Float64(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (Enum(a), Enum(b)) => a == b,
            (Array(a), Array(b)) | (List(a), List(b)) => a == b,
            (Set(a), Set(b)) => same_members(a, b),
            (EnumSet(a), EnumSet(b)) => same_members(a, b),
            (Map(a), Map(b)) => same_members(a, b),
            (Record(a), Record(b)) => a == b,
            _ => false,
        }
    }
}

/// Unordered comparison for collections without duplicates.
fn same_members<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x))
}

/// Object-safe view of a nested record instance.
trait ErasedRecord: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn eq_erased(&self, other: &dyn Any) -> bool;
}

impl<T: Any + fmt::Debug + PartialEq + Send + Sync> ErasedRecord for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_erased(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

/// Type-erased record instance, shared between every property that requests
/// the same record shape.
#[derive(Clone)]
pub struct RecordValue {
    name: &'static str,
    inner: Arc<dyn ErasedRecord>,
}

impl RecordValue {
    /// Wraps a record instance.
    pub fn new<T>(name: &'static str, value: T) -> Self
    where
        T: Any + fmt::Debug + PartialEq + Send + Sync,
    {
        Self {
            name,
            inner: Arc::new(value),
        }
    }

    /// Type path of the wrapped record.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Borrows the wrapped instance if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).as_any().downcast_ref::<T>()
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && (*self.inner).eq_erased((*other.inner).as_any())
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}
