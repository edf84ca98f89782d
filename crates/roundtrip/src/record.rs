//! The contract a record type under test satisfies.

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::errors::{OperationKind, ValidationError, WireError};
use crate::shape::TypeShape;
use crate::shaped::Shaped;
use crate::value::Value;

/// Wire-format values that can travel as bytes.
///
/// Every borsh type gets this for free.
pub trait WireCodec: Sized {
    /// Encodes into a newly allocated vec.
    fn encode_wire(&self) -> Result<Vec<u8>, WireError>;

    /// Decodes from a buffer, failing if there's leftover bytes.
    fn decode_wire(buf: &[u8]) -> Result<Self, WireError>;
}

impl<T: BorshSerialize + BorshDeserialize> WireCodec for T {
    fn encode_wire(&self) -> Result<Vec<u8>, WireError> {
        Ok(borsh::to_vec(self)?)
    }

    fn decode_wire(buf: &[u8]) -> Result<Self, WireError> {
        Ok(borsh::from_slice(buf)?)
    }
}

/// A record type with a wire-format twin.
///
/// Default construction comes from [`Default`], whole-object equality from
/// [`PartialEq`].  Properties are declared by [`Record::operations`] using
/// the `get_<name>`/`set_<name>` convention.
pub trait Record: Default + PartialEq + fmt::Debug + 'static {
    /// The wire-format twin.
    type Wire: WireCodec + fmt::Debug;

    /// Name used in reports and logs.
    const NAME: &'static str;

    /// Declares the record's accessors and mutators.
    fn operations() -> Vec<Operation<Self>>;

    /// Serializes to the wire form.  `None` means the record could not
    /// produce one.
    fn to_wire(&self) -> Option<Self::Wire>;

    /// Reconstructs from the wire form.
    fn from_wire(wire: Self::Wire) -> Result<Self, WireError>;
}

/// Where an operation is declared.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Origin {
    /// Declared directly on the record.
    Declared,

    /// Provided by a shared base schema.  Never considered for pairing.
    Inherited,
}

/// Zero-argument read of one property.
pub struct Accessor<R> {
    shape: TypeShape,
    call: Box<dyn Fn(&R) -> Value>,
}

impl<R> Accessor<R> {
    /// Shape of the returned value.
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Reads the property.
    pub fn get(&self, record: &R) -> Value {
        (self.call)(record)
    }
}

/// Single-argument write of one property.
pub struct Mutator<R> {
    shape: TypeShape,
    call: Box<dyn Fn(&mut R, &Value) -> Result<(), ValidationError>>,
}

impl<R> Mutator<R> {
    /// Shape of the accepted value.
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Writes the property.
    pub fn set(&self, record: &mut R, value: &Value) -> Result<(), ValidationError> {
        (self.call)(record, value)
    }
}

pub(crate) enum OperationBody<R> {
    Accessor(Accessor<R>),
    Mutator(Mutator<R>),
}

/// One entry of a record's declarative schema.
pub struct Operation<R> {
    name: &'static str,
    origin: Origin,
    body: OperationBody<R>,
}

impl<R: 'static> Operation<R> {
    /// Declares an accessor returning an owned value.
    pub fn accessor<T, F>(name: &'static str, f: F) -> Self
    where
        T: Shaped + 'static,
        F: Fn(&R) -> T + 'static,
    {
        Self::new(
            name,
            OperationBody::Accessor(Accessor {
                shape: T::shape(),
                call: Box::new(move |r: &R| f(r).to_value()),
            }),
        )
    }

    /// Declares an accessor returning a borrow, like the getters generated
    /// for plain field access.
    pub fn accessor_ref<T: Shaped + 'static>(name: &'static str, f: fn(&R) -> &T) -> Self {
        Self::new(
            name,
            OperationBody::Accessor(Accessor {
                shape: T::shape(),
                call: Box::new(move |r: &R| f(r).to_value()),
            }),
        )
    }

    /// Declares a mutator.
    pub fn mutator<T, F>(name: &'static str, f: F) -> Self
    where
        T: Shaped + 'static,
        F: Fn(&mut R, T) + 'static,
    {
        Self::new(
            name,
            OperationBody::Mutator(Mutator {
                shape: T::shape(),
                call: Box::new(move |r: &mut R, v: &Value| {
                    f(r, T::from_value(v)?);
                    Ok(())
                }),
            }),
        )
    }

    fn new(name: &'static str, body: OperationBody<R>) -> Self {
        Self {
            name,
            origin: Origin::Declared,
            body,
        }
    }
}

impl<R> Operation<R> {
    /// Marks the operation as coming from a shared base schema.
    pub fn inherited(mut self) -> Self {
        self.origin = Origin::Inherited;
        self
    }

    /// Operation name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Where the operation is declared.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Accessor or mutator.
    pub fn kind(&self) -> OperationKind {
        match self.body {
            OperationBody::Accessor(_) => OperationKind::Accessor,
            OperationBody::Mutator(_) => OperationKind::Mutator,
        }
    }

    /// Value shape the operation reads or writes.
    pub fn shape(&self) -> &TypeShape {
        match &self.body {
            OperationBody::Accessor(a) => &a.shape,
            OperationBody::Mutator(m) => &m.shape,
        }
    }

    pub(crate) fn into_body(self) -> OperationBody<R> {
        self.body
    }
}

impl<R> fmt::Debug for Operation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .field("kind", &self.kind())
            .field("shape", self.shape())
            .finish()
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor").field("shape", &self.shape).finish()
    }
}

impl<R> fmt::Debug for Mutator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutator").field("shape", &self.shape).finish()
    }
}
