//! Round trip validation of one record type.

use std::any::type_name;

use tracing::*;

use crate::context::ValidationContext;
use crate::errors::{Capability, Mismatch, ValidationError};
use crate::introspect::{ExcludedProperty, discover_pairs};
use crate::record::{Record, WireCodec};

/// Summary of a record that survived its round trip.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordReport {
    /// Record type name.
    pub record: &'static str,

    /// Wire type name.
    pub wire: &'static str,

    /// Properties that were checked, in name order.
    pub properties: Vec<String>,

    /// Potential properties that were left out.
    pub excluded: Vec<ExcludedProperty>,
}

/// Validates that an `R` survives a trip through its wire form.
///
/// Builds a default instance, applies every discovered mutator with its
/// synthesized value, serializes it, moves the wire value through its byte
/// encoding, reconstructs a second instance from it and compares the two,
/// first as whole objects and then property by property.  Every mismatch is
/// collected before failing, a whole-object mismatch does not skip the
/// per-property checks.
pub fn validate<R: Record>(ctx: &mut ValidationContext) -> Result<RecordReport, ValidationError> {
    let wire_name = type_name::<R::Wire>();
    info!(record = R::NAME, wire = wire_name, "validating record round trip");

    let discovery = discover_pairs::<R>(ctx)?;

    let mut original = R::default();
    for pair in discovery.pairs.values() {
        pair.apply(&mut original)?;
    }

    let wire = original
        .to_wire()
        .ok_or_else(|| ValidationError::MissingCapability {
            record: R::NAME,
            capability: Capability::Serialize,
            detail: "returned no wire value".to_owned(),
        })?;

    let mismatch = |source| ValidationError::TypeMismatch {
        record: R::NAME,
        wire: wire_name,
        source,
    };
    let buf = wire.encode_wire().map_err(mismatch)?;
    let wire = R::Wire::decode_wire(&buf).map_err(mismatch)?;
    trace!(record = R::NAME, len = buf.len(), ?wire, "wire value travelled");

    let reconstructed = R::from_wire(wire).map_err(|e| ValidationError::MissingCapability {
        record: R::NAME,
        capability: Capability::FromWire,
        detail: e.to_string(),
    })?;

    let mut mismatches = Vec::new();
    if original != reconstructed {
        mismatches.push(Mismatch {
            property: None,
            original: format!("{original:?}"),
            reconstructed: format!("{reconstructed:?}"),
        });
    }

    for pair in discovery.pairs.values() {
        let orig_value = pair.get(&original);
        let recon_value = pair.get(&reconstructed);
        if orig_value != recon_value {
            mismatches.push(Mismatch {
                property: Some(pair.name().to_owned()),
                original: format!("{orig_value:?}"),
                reconstructed: format!("{recon_value:?}"),
            });
        }
    }

    if !mismatches.is_empty() {
        warn!(record = R::NAME, count = mismatches.len(), "values lost in round trip");
        return Err(ValidationError::ValueMismatch {
            record: R::NAME,
            mismatches,
        });
    }

    Ok(RecordReport {
        record: R::NAME,
        wire: wire_name,
        properties: discovery.pairs.into_keys().collect(),
        excluded: discovery.excluded,
    })
}
