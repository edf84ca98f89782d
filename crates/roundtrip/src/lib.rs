//! Generic round trip validation for record types with a wire-format twin.
//!
//! A record declares its accessors and mutators with [`Record::operations`].
//! The validator pairs them up by the `get_<name>`/`set_<name>` convention,
//! synthesizes one representative value per property shape, pushes a
//! populated instance through its wire form and back, and checks that nothing
//! was lost.
//!
//! All run state lives in a [`ValidationContext`] that is passed explicitly.

#[cfg(test)]
use serde_json as _;

mod config;
pub use config::{
    DEFAULT_ARRAY_LEN, DEFAULT_BUFFER_LEN, DEFAULT_INT_BOUND, DEFAULT_STRING_LEN, SynthConfig,
};

mod context;
pub use context::ValidationContext;

mod errors;
pub use errors::{Capability, Mismatch, OperationKind, ValidationError, WireError};

mod introspect;
pub use introspect::{
    ACCESSOR_PREFIX, Discovery, ExcludedProperty, ExclusionReason, MUTATOR_PREFIX, PropertyPair,
    WIRE_ACCESSOR, discover_pairs,
};

mod macros;

mod record;
pub use record::{Accessor, Mutator, Operation, Origin, Record, WireCodec};

mod run;
pub use run::{RecordOutcome, RunReport, ValidationRun};

mod shape;
pub use shape::{EnumShape, TypeShape};

pub mod shaped;
pub use shaped::{ByteBuf, EnumSet, EnumShaped, Shaped};

mod synth;
pub use synth::synthesize;

mod validator;
pub use validator::{RecordReport, validate};

mod value;
pub use value::{RecordValue, Value};
