use std::fmt;

use thiserror::Error;

use crate::shape::TypeShape;

/// Errors from moving a wire value through its byte encoding.
#[derive(Debug, Error)]
pub enum WireError {
    /// The underlying codec failed.
    #[error("wire codec: {0}")]
    Codec(#[from] std::io::Error),

    /// The record rejected a wire value it was handed.
    #[error("invalid wire value: {0}")]
    Invalid(String),
}

/// Which side of a property was declared twice.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OperationKind {
    /// A `get_<name>` operation.
    Accessor,

    /// A `set_<name>` operation.
    Mutator,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accessor => f.write_str("accessor"),
            Self::Mutator => f.write_str("mutator"),
        }
    }
}

/// Record capability that failed to produce a usable result.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Capability {
    /// `Record::to_wire`.
    Serialize,

    /// `Record::from_wire`.
    FromWire,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize => f.write_str("to_wire"),
            Self::FromWire => f.write_str("from_wire"),
        }
    }
}

/// A single post-round-trip inequality.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mismatch {
    /// Property name, or `None` for the whole-object comparison.
    pub property: Option<String>,

    /// Debug rendering of the value on the original instance.
    pub original: String,

    /// Debug rendering of the value on the reconstructed instance.
    pub reconstructed: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(name) => write!(f, "property {name}: ")?,
            None => f.write_str("whole record: ")?,
        }
        write!(f, "{} != {}", self.original, self.reconstructed)
    }
}

/// Errors from validating record round trips.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No synthesis rule exists for a shape.  Fatal to the run.
    #[error("unsupported shape {shape}")]
    UnsupportedShape {
        /// The offending shape.
        shape: TypeShape,
    },

    /// Two accessors or two mutators resolve to the same property.
    #[error("{record}: multiple {kind}s for property {property}")]
    AmbiguousProperty {
        /// Record type name.
        record: &'static str,
        /// Property name.
        property: String,
        /// Which side was duplicated.
        kind: OperationKind,
    },

    /// A construction or serialization capability did not produce a value.
    #[error("{record}: {capability} failed ({detail})")]
    MissingCapability {
        /// Record type name.
        record: &'static str,
        /// The capability that failed.
        capability: Capability,
        /// Human readable cause.
        detail: String,
    },

    /// The serialized value does not travel as the declared wire type.
    #[error("{record}: serialized value is not a valid {wire}: {source}")]
    TypeMismatch {
        /// Record type name.
        record: &'static str,
        /// Wire type name.
        wire: &'static str,
        /// Underlying codec error.
        #[source]
        source: WireError,
    },

    /// Values differ after the round trip.
    #[error("{record}: {} mismatch(es) after round trip: {}", .mismatches.len(), join(.mismatches))]
    ValueMismatch {
        /// Record type name.
        record: &'static str,
        /// Every mismatch found, object level first.
        mismatches: Vec<Mismatch>,
    },

    /// A value did not have the shape its consumer expected.
    #[error("value {found} does not fit shape {expected}")]
    ValueConversion {
        /// Shape the consumer expected.
        expected: TypeShape,
        /// Debug rendering of the value handed over.
        found: String,
    },
}

impl ValidationError {
    /// Returns if the error means the generic machinery itself can't proceed,
    /// so the rest of the run should be abandoned.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedShape { .. })
    }
}

fn join(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
