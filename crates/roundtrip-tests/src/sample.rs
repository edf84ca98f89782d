//! Sample records and their wire twins, used by the integration tests.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use strata_roundtrip::{
    ByteBuf, EnumSet, EnumShaped, Operation, Record, WireError, impl_enum_shape,
    impl_record_shape,
};

/// Encodes an enum member as its index in declaration order, `None` if the
/// member list doesn't contain it.
fn enum_index<E: EnumShaped>(member: E) -> Option<u8> {
    E::ALL
        .iter()
        .position(|m| *m == member)
        .and_then(|i| u8::try_from(i).ok())
}

/// Decodes an enum member from its index.
fn enum_at<E: EnumShaped>(index: u8) -> Result<E, WireError> {
    E::ALL
        .get(index as usize)
        .copied()
        .ok_or_else(|| WireError::Invalid(format!("{} index {index}", E::SHAPE.name())))
}

/// Role a peer plays in the network.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PeerRole {
    /// Orders transactions.
    Sequencer,
    /// Follows the chain.
    #[default]
    FullNode,
    /// Generates proofs.
    Prover,
}

impl_enum_shape!(PeerRole { Sequencer, FullNode, Prover });

/// Services a peer offers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Service {
    /// Serves blocks.
    Blocks,
    /// Serves proofs.
    Proofs,
    /// Serves state snapshots.
    Snapshots,
}

impl_enum_shape!(Service {
    Blocks,
    Proofs,
    Snapshots,
});

/// Wire form of [`PeerInfo`].
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct PeerInfoWire {
    name: String,
    port: i32,
    role: u8,
    services: Vec<u8>,
    pubkey: Vec<u8>,
    fallback_ports: Vec<i32>,
    aliases: Vec<String>,
    labels: Vec<(String, String)>,
    banned: bool,
    score: f32,
    version: i8,
}

/// Peer directory entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeerInfo {
    name: String,
    port: i32,
    role: PeerRole,
    services: EnumSet<Service>,
    pubkey: ByteBuf,
    fallback_ports: Box<[i32]>,
    aliases: Vec<String>,
    labels: BTreeMap<String, String>,
    banned: bool,
    score: f32,
    version: i8,
}

impl PeerInfo {
    /// Display name.
    pub fn name(&self) -> &String {
        &self.name
    }

    /// Sets the display name.
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Listening port.
    pub fn port(&self) -> i32 {
        self.port
    }

    /// Sets the listening port.
    pub fn set_port(&mut self, port: i32) {
        self.port = port;
    }

    /// Public key bytes.
    pub fn pubkey(&self) -> &ByteBuf {
        &self.pubkey
    }

    /// Sets the public key bytes.
    pub fn set_pubkey(&mut self, pubkey: ByteBuf) {
        self.pubkey = pubkey;
    }
}

impl Record for PeerInfo {
    type Wire = PeerInfoWire;

    const NAME: &'static str = "PeerInfo";

    fn operations() -> Vec<Operation<Self>> {
        vec![
            Operation::accessor_ref("get_name", PeerInfo::name),
            Operation::mutator("set_name", PeerInfo::set_name),
            Operation::accessor("get_port", PeerInfo::port),
            Operation::mutator("set_port", PeerInfo::set_port),
            Operation::accessor("get_role", |p: &PeerInfo| p.role),
            Operation::mutator("set_role", |p: &mut PeerInfo, v: PeerRole| p.role = v),
            Operation::accessor("get_services", |p: &PeerInfo| p.services.clone()),
            Operation::mutator("set_services", |p: &mut PeerInfo, v: EnumSet<Service>| {
                p.services = v
            }),
            Operation::accessor_ref("get_pubkey", PeerInfo::pubkey),
            Operation::mutator("set_pubkey", PeerInfo::set_pubkey),
            Operation::accessor("get_fallback_ports", |p: &PeerInfo| p.fallback_ports.clone()),
            Operation::mutator("set_fallback_ports", |p: &mut PeerInfo, v: Box<[i32]>| {
                p.fallback_ports = v
            }),
            Operation::accessor("get_aliases", |p: &PeerInfo| p.aliases.clone()),
            Operation::mutator("set_aliases", |p: &mut PeerInfo, v: Vec<String>| p.aliases = v),
            Operation::accessor("get_labels", |p: &PeerInfo| p.labels.clone()),
            Operation::mutator("set_labels", |p: &mut PeerInfo, v: BTreeMap<String, String>| {
                p.labels = v
            }),
            Operation::accessor("get_banned", |p: &PeerInfo| p.banned),
            Operation::mutator("set_banned", |p: &mut PeerInfo, v: bool| p.banned = v),
            Operation::accessor("get_score", |p: &PeerInfo| p.score),
            Operation::mutator("set_score", |p: &mut PeerInfo, v: f32| p.score = v),
            Operation::accessor("get_version", |p: &PeerInfo| p.version),
            Operation::mutator("set_version", |p: &mut PeerInfo, v: i8| p.version = v),
        ]
    }

    fn to_wire(&self) -> Option<Self::Wire> {
        Some(PeerInfoWire {
            name: self.name.clone(),
            port: self.port,
            role: enum_index(self.role)?,
            services: self
                .services
                .iter()
                .copied()
                .map(enum_index)
                .collect::<Option<_>>()?,
            pubkey: self.pubkey.as_slice().to_vec(),
            fallback_ports: self.fallback_ports.to_vec(),
            aliases: self.aliases.clone(),
            labels: self
                .labels
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            banned: self.banned,
            score: self.score,
            version: self.version,
        })
    }

    fn from_wire(wire: Self::Wire) -> Result<Self, WireError> {
        Ok(Self {
            name: wire.name,
            port: wire.port,
            role: enum_at(wire.role)?,
            services: wire
                .services
                .into_iter()
                .map(enum_at::<Service>)
                .collect::<Result<EnumSet<_>, WireError>>()?,
            pubkey: wire.pubkey.into(),
            fallback_ports: wire.fallback_ports.into_boxed_slice(),
            aliases: wire.aliases,
            labels: wire.labels.into_iter().collect(),
            banned: wire.banned,
            score: wire.score,
            version: wire.version,
        })
    }
}

/// Epoch interval.  `start <= end` always holds, so instances come from a
/// factory rather than generic synthesis.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EpochRange {
    start: i64,
    end: i64,
}

impl EpochRange {
    /// Constructs a range, returning `None` if it would be inverted.
    pub fn new(start: i64, end: i64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// First epoch.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Last epoch.
    pub fn end(&self) -> i64 {
        self.end
    }
}

impl_record_shape!(EpochRange);

/// Wire form of [`Checkpoint`].
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CheckpointWire {
    start: i64,
    end: i64,
    height: i64,
    tx_count: i32,
    proof: Vec<u8>,
}

/// Checkpoint summary over a range of epochs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Checkpoint {
    epochs: EpochRange,
    height: i64,
    tx_count: i32,
    proof: ByteBuf,
}

impl Checkpoint {
    /// Digest over the header fields.  Derived, so it has no mutator.
    pub fn digest(&self) -> i64 {
        self.height ^ ((self.tx_count as i64) << 20) ^ self.epochs.start
    }
}

impl Record for Checkpoint {
    type Wire = CheckpointWire;

    const NAME: &'static str = "Checkpoint";

    fn operations() -> Vec<Operation<Self>> {
        vec![
            Operation::accessor("get_epochs", |c: &Checkpoint| c.epochs.clone()),
            Operation::mutator("set_epochs", |c: &mut Checkpoint, v: EpochRange| c.epochs = v),
            Operation::accessor("get_height", |c: &Checkpoint| c.height),
            Operation::mutator("set_height", |c: &mut Checkpoint, v: i64| c.height = v),
            Operation::accessor("get_tx_count", |c: &Checkpoint| c.tx_count),
            Operation::mutator("set_tx_count", |c: &mut Checkpoint, v: i32| c.tx_count = v),
            Operation::accessor("get_proof", |c: &Checkpoint| c.proof.clone()),
            Operation::mutator("set_proof", |c: &mut Checkpoint, v: ByteBuf| c.proof = v),
            Operation::accessor("get_digest", Checkpoint::digest),
        ]
    }

    fn to_wire(&self) -> Option<Self::Wire> {
        Some(CheckpointWire {
            start: self.epochs.start,
            end: self.epochs.end,
            height: self.height,
            tx_count: self.tx_count,
            proof: self.proof.as_slice().to_vec(),
        })
    }

    fn from_wire(wire: Self::Wire) -> Result<Self, WireError> {
        let epochs = EpochRange::new(wire.start, wire.end)
            .ok_or_else(|| WireError::Invalid("inverted epoch range".to_owned()))?;
        Ok(Self {
            epochs,
            height: wire.height,
            tx_count: wire.tx_count,
            proof: wire.proof.into(),
        })
    }
}

/// Wire form of [`Subtree`].
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct SubtreeWire {
    name: String,
    weight: f32,
    children: Vec<SubtreeWire>,
}

/// Weighted scheduling tree.  Recursive, so generic synthesis can't build
/// one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subtree {
    name: String,
    weight: f32,
    children: Vec<Subtree>,
}

impl Subtree {
    /// Constructs a childless node.
    pub fn leaf(name: &str, weight: f32) -> Self {
        Self {
            name: name.to_owned(),
            weight,
            children: Vec::new(),
        }
    }

    /// Child nodes.
    pub fn children(&self) -> &[Subtree] {
        &self.children
    }

    fn to_wire_tree(&self) -> SubtreeWire {
        SubtreeWire {
            name: self.name.clone(),
            weight: self.weight,
            children: self.children.iter().map(Self::to_wire_tree).collect(),
        }
    }

    fn from_wire_tree(wire: SubtreeWire) -> Self {
        Self {
            name: wire.name,
            weight: wire.weight,
            children: wire.children.into_iter().map(Self::from_wire_tree).collect(),
        }
    }
}

impl_record_shape!(Subtree);

impl Record for Subtree {
    type Wire = SubtreeWire;

    const NAME: &'static str = "Subtree";

    fn operations() -> Vec<Operation<Self>> {
        vec![
            Operation::accessor("get_name", |s: &Subtree| s.name.clone()),
            Operation::mutator("set_name", |s: &mut Subtree, v: String| s.name = v),
            Operation::accessor("get_weight", |s: &Subtree| s.weight),
            Operation::mutator("set_weight", |s: &mut Subtree, v: f32| s.weight = v),
            Operation::accessor("get_children", |s: &Subtree| s.children.clone()),
            Operation::mutator("set_children", |s: &mut Subtree, v: Vec<Subtree>| {
                s.children = v
            }),
        ]
    }

    fn to_wire(&self) -> Option<Self::Wire> {
        Some(self.to_wire_tree())
    }

    fn from_wire(wire: Self::Wire) -> Result<Self, WireError> {
        Ok(Self::from_wire_tree(wire))
    }
}
