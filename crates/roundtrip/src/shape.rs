//! Type shape descriptors.

use std::fmt;

/// Describes an enumerated type by name and member names.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EnumShape {
    name: &'static str,
    variants: &'static [&'static str],
}

impl EnumShape {
    /// Constructs a new instance.
    pub const fn new(name: &'static str, variants: &'static [&'static str]) -> Self {
        Self { name, variants }
    }

    /// Name of the enum type.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Member names, in declaration order.
    pub const fn variants(&self) -> &'static [&'static str] {
        self.variants
    }
}

/// Classification of a property's value type, used to pick a synthesis rule.
///
/// Shapes are compared by exact identity including nested parameters, so
/// `List(Int32)` and `List(Int64)` are distinct cache keys.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeShape {
    /// `bool`.
    Bool,

    /// 8-bit integer.
    Int8,

    /// 32-bit integer.
    Int32,

    /// 64-bit integer.
    Int64,

    /// Single precision float.
    Float32,

    /// Double precision float.
    Float64,

    /// UTF-8 string.
    Str,

    /// Opaque mutable byte buffer.
    Bytes,

    /// Enumerated type.
    Enum(EnumShape),

    /// Fixed-size array.
    Array(Box<TypeShape>),

    /// Ordered list.
    List(Box<TypeShape>),

    /// Set of unique elements.
    Set(Box<TypeShape>),

    /// Set containing members of one enum.
    EnumSet(EnumShape),

    /// Key/value mapping.
    Map(Box<TypeShape>, Box<TypeShape>),

    /// Aggregate type, by full type path.  Only available through
    /// pre-seeding.
    Record(&'static str),

    /// Any other generic container.  Never synthesizable.
    Parametrized {
        /// Container name.
        container: &'static str,
        /// Type parameters.
        params: Vec<TypeShape>,
    },
}

impl TypeShape {
    /// Convenience constructor for [`TypeShape::Array`].
    pub fn array(elem: TypeShape) -> Self {
        Self::Array(Box::new(elem))
    }

    /// Convenience constructor for [`TypeShape::List`].
    pub fn list(elem: TypeShape) -> Self {
        Self::List(Box::new(elem))
    }

    /// Convenience constructor for [`TypeShape::Set`].
    pub fn set(elem: TypeShape) -> Self {
        Self::Set(Box::new(elem))
    }

    /// Convenience constructor for [`TypeShape::Map`].
    pub fn map(key: TypeShape, value: TypeShape) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Returns if values of this shape must never be memoized.
    pub fn is_uncached(&self) -> bool {
        matches!(self, Self::Bytes)
    }
}

/// Last path segment of a type path.
fn short_name(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int8 => f.write_str("i8"),
            Self::Int32 => f.write_str("i32"),
            Self::Int64 => f.write_str("i64"),
            Self::Float32 => f.write_str("f32"),
            Self::Float64 => f.write_str("f64"),
            Self::Str => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
            Self::Enum(e) => write!(f, "enum {}", e.name()),
            Self::Array(elem) => write!(f, "[{elem}]"),
            Self::List(elem) => write!(f, "list<{elem}>"),
            Self::Set(elem) => write!(f, "set<{elem}>"),
            Self::EnumSet(e) => write!(f, "enumset<{}>", e.name()),
            Self::Map(k, v) => write!(f, "map<{k}, {v}>"),
            Self::Record(path) => f.write_str(short_name(path)),
            Self::Parametrized { container, params } => {
                write!(f, "{container}<")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{p}")?;
                }
                f.write_str(">")
            }
        }
    }
}
