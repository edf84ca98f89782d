//! Properties of value synthesis that hold for every seed.

#![expect(missing_docs, reason = "test repo")]
#![expect(unused_crate_dependencies, reason = "macro hacks")]

use strata_roundtrip_tests::{
    proptest::prelude::*,
    sample::{PeerRole, Service},
    strata_roundtrip::{
        ByteBuf, EnumSet, Shaped, TypeShape, ValidationContext, ValidationError, Value,
    },
};

fn shapes() -> Vec<TypeShape> {
    vec![
        TypeShape::Bool,
        TypeShape::Int8,
        TypeShape::Int32,
        TypeShape::Int64,
        TypeShape::Float32,
        TypeShape::Float64,
        TypeShape::Str,
        PeerRole::shape(),
        EnumSet::<Service>::shape(),
        TypeShape::array(TypeShape::Int32),
        TypeShape::list(PeerRole::shape()),
        TypeShape::set(TypeShape::Str),
        TypeShape::map(TypeShape::Str, TypeShape::array(TypeShape::Bool)),
    ]
}

proptest! {
    #[test]
    fn test_synthesis_is_memoized(seed in any::<u64>()) {
        let mut ctx = ValidationContext::with_seed(seed);
        for shape in shapes() {
            let first = ctx.synthesize(&shape).unwrap();
            let second = ctx.synthesize(&shape).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn test_buffers_never_alias(seed in any::<u64>()) {
        let mut ctx = ValidationContext::with_seed(seed);
        let mut a = ctx.value::<ByteBuf>().unwrap().into_inner();
        let b = ctx.value::<ByteBuf>().unwrap();
        let b_before = b.clone();

        prop_assert_eq!(a.len(), 4);
        a[0] ^= 0xff;
        prop_assert_eq!(b, b_before);
        prop_assert!(!ctx.is_cached(&TypeShape::Bytes));
    }

    #[test]
    fn test_values_stay_in_range(seed in any::<u64>()) {
        let mut ctx = ValidationContext::with_seed(seed);

        let i = ctx.value::<i32>().unwrap();
        prop_assert!((0..1_000_000).contains(&i));

        let l = ctx.value::<i64>().unwrap();
        prop_assert!((0..1_000_000).contains(&l));

        let f = ctx.value::<f32>().unwrap();
        prop_assert!((0.0..1.0).contains(&f));

        let s = ctx.value::<String>().unwrap();
        prop_assert_eq!(s.len(), 3);
        prop_assert!(s.bytes().all(|c| c.is_ascii_lowercase()));
    }
}

#[test]
fn test_enum_set_is_exhaustive() {
    let mut ctx = ValidationContext::with_seed(5);
    let all = ctx.value::<EnumSet<Service>>().unwrap();
    assert_eq!(all, EnumSet::all());
    assert_eq!(all.len(), 3);
}

#[test]
fn test_array_has_two_elements() {
    let mut ctx = ValidationContext::with_seed(5);
    let arr = ctx.value::<Box<[PeerRole]>>().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0], arr[1]);
}

#[test]
fn test_unsupported_container_is_rejected() {
    let shape = TypeShape::Parametrized {
        container: "VecDeque",
        params: vec![TypeShape::Str],
    };

    let mut ctx = ValidationContext::with_seed(5);
    let err = ctx.synthesize(&TypeShape::list(shape.clone())).unwrap_err();

    match err {
        ValidationError::UnsupportedShape { shape: offending } => assert_eq!(offending, shape),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(
        ctx.synthesize(&shape).unwrap_err().to_string(),
        "unsupported shape VecDeque<string>"
    );
    assert!(!ctx.is_cached(&TypeShape::list(shape)));

    // The context stays usable after the failure.
    assert!(matches!(ctx.synthesize(&TypeShape::Bool), Ok(Value::Bool(_))));
}
