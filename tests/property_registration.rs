/// Property-based tests for registration
///
/// These tests use proptest to generate random inputs and verify invariants
/// that should hold for all valid registrations.

use depository::{Argument, Concrete, Depository, DiError, Resolver};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct TestService {
    id: u32,
    name: String,
}

// Property: the last registration under a key wins
proptest! {
    #[test]
    fn last_registration_wins(ids in prop::collection::vec(0u32..1000, 1..10)) {
        let depository = Depository::new();

        for id in &ids {
            depository
                .singleton("service", Concrete::object(TestService {
                    id: *id,
                    name: format!("service_{}", id),
                }))
                .unwrap();
        }

        let resolved = depository.get_required::<TestService>("service");
        prop_assert_eq!(resolved.id, *ids.last().unwrap());
        prop_assert_eq!(&resolved.name, &format!("service_{}", ids.last().unwrap()));
        prop_assert_eq!(depository.len(), 1);
    }
}

// Property: a singleton resolves to the same instance however often it is resolved
proptest! {
    #[test]
    fn singleton_identity_is_stable(seed in 0u32..1000, resolutions in 2usize..20) {
        let depository = Depository::new();
        depository
            .singleton("service", Concrete::closure(move |_| Ok(TestService {
                id: seed,
                name: format!("factory_{}", seed),
            })))
            .unwrap();

        let first = depository.get::<TestService>("service").unwrap();
        for _ in 1..resolutions {
            let next = depository.get::<TestService>("service").unwrap();
            prop_assert!(Arc::ptr_eq(&first, &next));
        }
        prop_assert_eq!(first.id, seed);
    }
}

// Property: with() replaces the bound arguments, it never appends
proptest! {
    #[test]
    fn with_replaces_bound_arguments(
        batches in prop::collection::vec(prop::collection::vec(any::<i32>(), 0..6), 1..6)
    ) {
        let depository = Depository::new();
        let mut handle = depository
            .register("count", Concrete::closure(|args| Ok(args.len())))
            .unwrap();

        for batch in &batches {
            handle = handle.with(batch.iter().map(|v| Argument::value(*v)));
        }

        let count = depository.get::<usize>("count").unwrap();
        prop_assert_eq!(*count, batches.last().unwrap().len());
    }
}

// Property: call-time arguments never leak into later resolutions
proptest! {
    #[test]
    fn call_time_arguments_are_one_shot(bound in any::<i64>(), call in any::<i64>()) {
        let depository = Depository::new();
        depository
            .register("echo", Concrete::closure(|args| Ok(*args.get::<i64>(0)?)))
            .unwrap()
            .with([Argument::value(bound)]);

        let once = depository.get_with::<i64>("echo", &[Argument::value(call)]).unwrap();
        let again = depository.get::<i64>("echo").unwrap();
        prop_assert_eq!(*once, call);
        prop_assert_eq!(*again, bound);
    }
}

// Property: any non-blank key can be registered, aliased and resolved
proptest! {
    #[test]
    fn keys_and_aliases_resolve(key in "[A-Za-z][A-Za-z0-9_.]{0,16}", alias in "[a-z]{1,8}") {
        prop_assume!(key != alias);
        let depository = Depository::new();
        depository.register(&key, Concrete::object(key.clone())).unwrap();
        depository.alias(&alias, &key).unwrap();

        let direct = depository.get::<String>(&key).unwrap();
        let aliased = depository.get::<String>(&alias).unwrap();
        prop_assert!(Arc::ptr_eq(&direct, &aliased));
        prop_assert_eq!(direct.as_str(), key.as_str());
    }
}

// Property: blank keys are always rejected
proptest! {
    #[test]
    fn blank_keys_are_rejected(key in "[ \t]{0,4}") {
        let depository = Depository::new();
        let result = depository.register(&key, Concrete::object(1u8));
        prop_assert!(matches!(result, Err(DiError::InvalidKey(_))));
    }
}
