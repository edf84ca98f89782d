//! Pairs a record's accessors with its mutators.

use std::collections::BTreeMap;
use std::fmt;

use tracing::*;

use crate::context::ValidationContext;
use crate::errors::{OperationKind, ValidationError};
use crate::record::{Accessor, Mutator, OperationBody, Origin, Record};
use crate::shape::TypeShape;
use crate::synth::synthesize;
use crate::value::Value;

/// Prefix of accessor names.
pub const ACCESSOR_PREFIX: &str = "get_";

/// Prefix of mutator names.
pub const MUTATOR_PREFIX: &str = "set_";

/// Accessor name reserved for a record's own wire conversion, never treated as
/// a property.
pub const WIRE_ACCESSOR: &str = "get_wire";

/// Why a potential property was left out of the round trip contract.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExclusionReason {
    /// Read-only property.
    AccessorOnly,

    /// Write-only property.
    MutatorOnly,

    /// Both sides exist but disagree on the value type.
    ShapeMismatch {
        /// Shape returned by the accessor.
        accessor: TypeShape,
        /// Shape accepted by the mutator.
        mutator: TypeShape,
    },
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessorOnly => f.write_str("no mutator"),
            Self::MutatorOnly => f.write_str("no accessor"),
            Self::ShapeMismatch { accessor, mutator } => {
                write!(f, "accessor returns {accessor}, mutator takes {mutator}")
            }
        }
    }
}

/// A potential property that was left out.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExcludedProperty {
    /// Property name.
    pub name: String,

    /// Why it was left out.
    pub reason: ExclusionReason,
}

/// A matched accessor/mutator pair with the value the round trip uses.
#[derive(Debug)]
pub struct PropertyPair<R> {
    name: String,
    accessor: Accessor<R>,
    mutator: Mutator<R>,
    value: Value,
}

impl<R> PropertyPair<R> {
    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape both sides agree on.
    pub fn shape(&self) -> &TypeShape {
        self.accessor.shape()
    }

    /// The synthesized test value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Reads the property from a record.
    pub fn get(&self, record: &R) -> Value {
        self.accessor.get(record)
    }

    /// Writes the test value into a record.
    pub fn apply(&self, record: &mut R) -> Result<(), ValidationError> {
        self.mutator.set(record, &self.value)
    }
}

/// Result of introspecting a record type.
#[derive(Debug)]
pub struct Discovery<R> {
    pub(crate) pairs: BTreeMap<String, PropertyPair<R>>,
    pub(crate) excluded: Vec<ExcludedProperty>,
}

impl<R> Discovery<R> {
    /// Complete pairs, by property name.
    pub fn pairs(&self) -> &BTreeMap<String, PropertyPair<R>> {
        &self.pairs
    }

    /// Potential properties that were left out.
    pub fn excluded(&self) -> &[ExcludedProperty] {
        &self.excluded
    }
}

fn property_name<'n>(op_name: &'n str, prefix: &str) -> Option<&'n str> {
    op_name.strip_prefix(prefix).filter(|p| !p.is_empty())
}

/// Discovers the complete accessor/mutator pairs of `R` and synthesizes a
/// test value for each.
///
/// Inherited operations and [`WIRE_ACCESSOR`] are skipped, as are operations
/// that don't follow the naming convention.  One-sided properties and pairs
/// whose shapes disagree are excluded and reported, not treated as errors.
pub fn discover_pairs<R: Record>(
    ctx: &mut ValidationContext,
) -> Result<Discovery<R>, ValidationError> {
    let mut accessors = BTreeMap::new();
    let mut mutators = BTreeMap::new();

    for op in R::operations() {
        if op.origin() == Origin::Inherited || op.name() == WIRE_ACCESSOR {
            trace!(record = R::NAME, op = op.name(), "skipping operation");
            continue;
        }

        let op_name = op.name();
        let (prefix, kind) = match op.kind() {
            OperationKind::Accessor => (ACCESSOR_PREFIX, OperationKind::Accessor),
            OperationKind::Mutator => (MUTATOR_PREFIX, OperationKind::Mutator),
        };
        let Some(prop) = property_name(op_name, prefix) else {
            trace!(record = R::NAME, op = op_name, "not a property operation");
            continue;
        };

        let duplicate = match op.into_body() {
            OperationBody::Accessor(a) => accessors.insert(prop.to_owned(), a).is_some(),
            OperationBody::Mutator(m) => mutators.insert(prop.to_owned(), m).is_some(),
        };
        if duplicate {
            return Err(ValidationError::AmbiguousProperty {
                record: R::NAME,
                property: prop.to_owned(),
                kind,
            });
        }
    }

    let mut pairs = BTreeMap::new();
    let mut excluded = Vec::new();

    for (name, accessor) in accessors {
        let Some(mutator) = mutators.remove(&name) else {
            excluded.push(ExcludedProperty {
                name,
                reason: ExclusionReason::AccessorOnly,
            });
            continue;
        };

        if accessor.shape() != mutator.shape() {
            excluded.push(ExcludedProperty {
                name,
                reason: ExclusionReason::ShapeMismatch {
                    accessor: accessor.shape().clone(),
                    mutator: mutator.shape().clone(),
                },
            });
            continue;
        }

        let value = synthesize(accessor.shape(), ctx)?;
        debug!(record = R::NAME, property = %name, shape = %accessor.shape(), ?value, "new property");
        pairs.insert(
            name.clone(),
            PropertyPair {
                name,
                accessor,
                mutator,
                value,
            },
        );
    }

    excluded.extend(mutators.into_keys().map(|name| ExcludedProperty {
        name,
        reason: ExclusionReason::MutatorOnly,
    }));

    for ex in &excluded {
        info!(record = R::NAME, property = %ex.name, reason = %ex.reason, "excluding potential property");
    }

    Ok(Discovery { pairs, excluded })
}

/// Builds an `R` by default construction followed by every discovered
/// mutator.
pub(crate) fn populate<R: Record>(ctx: &mut ValidationContext) -> Result<R, ValidationError> {
    let discovery = discover_pairs::<R>(ctx)?;
    let mut record = R::default();
    for pair in discovery.pairs.values() {
        pair.apply(&mut record)?;
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WireError;
    use crate::record::Operation;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Lease {
        holder: String,
        term: i64,
        epoch: i32,
    }

    impl Lease {
        fn holder(&self) -> &String {
            &self.holder
        }
    }

    impl Record for Lease {
        type Wire = (String, i64, i32);

        const NAME: &'static str = "Lease";

        fn operations() -> Vec<Operation<Self>> {
            vec![
                Operation::accessor_ref("get_holder", Lease::holder),
                Operation::mutator("set_holder", |l: &mut Lease, v: String| l.holder = v),
                Operation::accessor("get_term", |l: &Lease| l.term),
                Operation::mutator("set_term", |l: &mut Lease, v: i64| l.term = v),
                // read-only
                Operation::accessor("get_epoch", |l: &Lease| l.epoch),
                Operation::accessor("get_wire", |l: &Lease| l.holder.clone()),
                Operation::accessor("holder_len", |l: &Lease| l.holder.len() as i64),
                Operation::mutator("set_", |_: &mut Lease, _: bool| {}),
            ]
        }

        fn to_wire(&self) -> Option<Self::Wire> {
            Some((self.holder.clone(), self.term, self.epoch))
        }

        fn from_wire(wire: Self::Wire) -> Result<Self, WireError> {
            let (holder, term, epoch) = wire;
            Ok(Self {
                holder,
                term,
                epoch,
            })
        }
    }

    #[test]
    fn test_discovers_complete_pairs_only() {
        let mut ctx = ValidationContext::with_seed(1);
        let discovery = discover_pairs::<Lease>(&mut ctx).unwrap();

        let names: Vec<_> = discovery.pairs().keys().cloned().collect();
        assert_eq!(names, ["holder", "term"]);
        assert_eq!(
            discovery.excluded(),
            &[ExcludedProperty {
                name: "epoch".to_owned(),
                reason: ExclusionReason::AccessorOnly,
            }]
        );

        let holder = &discovery.pairs()["holder"];
        assert_eq!(holder.shape(), &TypeShape::Str);
        assert!(matches!(holder.value(), Value::Str(s) if s.len() == 3));
    }

    #[test]
    fn test_populate_applies_values() {
        let mut ctx = ValidationContext::with_seed(1);
        let lease = populate::<Lease>(&mut ctx).unwrap();
        assert_eq!(lease.holder.len(), 3);
        assert_eq!(lease.epoch, 0);
        assert_eq!(Value::Str(lease.holder.clone()), ctx.synthesize(&TypeShape::Str).unwrap());
    }
}
