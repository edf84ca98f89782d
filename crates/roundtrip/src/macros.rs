//! Macros for hooking user types into shape synthesis.

/// Generates [`crate::EnumShaped`] and [`crate::Shaped`] impls for a fieldless
/// enum.  The enum must be `Copy + Ord + Debug`.
#[macro_export]
macro_rules! impl_enum_shape {
    ($name:ident { $( $variant:ident ),+ $(,)? }) => {
        impl $crate::EnumShaped for $name {
            const SHAPE: $crate::EnumShape =
                $crate::EnumShape::new(stringify!($name), &[$( stringify!($variant) ),+]);

            const ALL: &'static [Self] = &[$( $name::$variant ),+];

            fn variant_name(&self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant), )+
                }
            }
        }

        impl $crate::Shaped for $name {
            fn shape() -> $crate::TypeShape {
                $crate::TypeShape::Enum(<Self as $crate::EnumShaped>::SHAPE)
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Enum($crate::EnumShaped::variant_name(self))
            }

            fn from_value(value: &$crate::Value) -> Result<Self, $crate::ValidationError> {
                $crate::shaped::enum_from_value(value)
            }
        }
    };
}

/// Generates a [`crate::Shaped`] impl for an aggregate type that is used as a
/// property of another record.
///
/// Aggregates have the [`crate::TypeShape::Record`] shape, so a value only
/// exists once the caller has seeded one into the
/// [`crate::ValidationContext`].  The shape is keyed by the full type path,
/// so same-named types in different modules never share a value.  The type
/// must be `Clone + Debug + PartialEq + Send + Sync + 'static`.
#[macro_export]
macro_rules! impl_record_shape {
    ($name:ident) => {
        impl $crate::Shaped for $name {
            fn shape() -> $crate::TypeShape {
                $crate::TypeShape::Record(::core::any::type_name::<Self>())
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Record($crate::RecordValue::new(
                    ::core::any::type_name::<Self>(),
                    ::core::clone::Clone::clone(self),
                ))
            }

            fn from_value(value: &$crate::Value) -> Result<Self, $crate::ValidationError> {
                match value {
                    $crate::Value::Record(r) => r
                        .downcast_ref::<Self>()
                        .cloned()
                        .ok_or_else(|| $crate::shaped::unexpected::<Self>(value)),
                    _ => Err($crate::shaped::unexpected::<Self>(value)),
                }
            }
        }
    };
}
