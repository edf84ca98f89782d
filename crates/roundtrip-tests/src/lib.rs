//! Test macros and sample records for strata-roundtrip.
//!
//! The main export is the `generate_roundtrip_tests!` macro, which turns one
//! line per record type into a fixed-seed round trip test plus a property
//! test over random seeds.

// Re-export dependencies for macro usage
pub use paste;
pub use proptest;
pub use strata_roundtrip;

pub mod sample;

/// Generates round trip tests for a type that implements
/// `strata_roundtrip::Record`.
///
/// This macro creates:
/// 1. A test validating the record with a fixed seed
/// 2. A proptest validating the record with an arbitrary seed, so every run
///    exercises different synthesized values
///
/// An optional third argument is a non-capturing closure run on every fresh
/// `ValidationContext` before validation, for seeding aggregates that can't
/// be synthesized generically.
///
/// # Example
/// ```rust,no_run
/// use strata_roundtrip_tests::generate_roundtrip_tests;
/// use strata_roundtrip_tests::sample::{PeerInfo, Subtree};
///
/// generate_roundtrip_tests!(PeerInfo, "peer_info");
/// generate_roundtrip_tests!(Subtree, "subtree", |ctx| {
///     ctx.seed(Subtree::leaf("root", 1.0));
/// });
/// # fn main() {}
/// ```
#[macro_export]
macro_rules! generate_roundtrip_tests {
    ($type:ty, $name:expr) => {
        $crate::generate_roundtrip_tests!($type, $name, |_ctx| {});
    };
    ($type:ty, $name:expr, $setup:expr) => {
        $crate::paste::paste! {
            mod [<roundtrip_ $name>] {
                use super::*;
                use $crate::proptest::prelude::{any, prop_assert};
                use $crate::strata_roundtrip::{ValidationContext, validate};

                fn context(seed: u64) -> ValidationContext {
                    let setup: fn(&mut ValidationContext) = $setup;
                    let mut ctx = ValidationContext::with_seed(seed);
                    setup(&mut ctx);
                    ctx
                }

                #[test]
                fn [<test_ $name _roundtrip>]() {
                    let mut ctx = context(0);
                    validate::<$type>(&mut ctx).expect("test: round trip should hold");
                }

                $crate::proptest::proptest! {
                    #[test]
                    fn [<test_ $name _roundtrip_any_seed>](seed in any::<u64>()) {
                        let mut ctx = context(seed);
                        let res = validate::<$type>(&mut ctx);
                        prop_assert!(res.is_ok(), "{:?}", res);
                    }
                }
            }
        }
    };
}
