use craft_core::Ledger;

#[test]
fn clones_share_storage_until_written() {
    let base: Ledger = [("oak_planks", 3), ("stick", 2)].into_iter().collect();
    let mut handle = base.clone();
    assert!(handle.shares_storage_with(&base));

    handle.take("oak_planks", 2).unwrap();
    assert!(!handle.shares_storage_with(&base));
    assert_eq!(base.count("oak_planks"), 3, "original must not observe the write");
    assert_eq!(handle.count("oak_planks"), 1);
}

#[test]
fn take_fails_without_modifying() {
    let mut ledger: Ledger = [("coal", 1)].into_iter().collect();
    let err = ledger.take("coal", 2).unwrap_err();
    assert_eq!(err.item, "coal");
    assert_eq!(err.needed, 2);
    assert_eq!(err.available, 1);
    assert_eq!(ledger.count("coal"), 1);
}

#[test]
fn without_and_max_with_are_pure() {
    let owned: Ledger = [("oak_planks", 5), ("stick", 1)].into_iter().collect();
    let claims: Ledger = [("oak_planks", 3), ("stick", 4)].into_iter().collect();

    let left = owned.without(&claims);
    assert_eq!(left.count("oak_planks"), 2);
    assert_eq!(left.count("stick"), 0);
    assert!(!left.has("stick"));

    let widest = owned.max_with(&claims);
    assert_eq!(widest.count("oak_planks"), 5);
    assert_eq!(widest.count("stick"), 4);

    assert_eq!(owned.count("oak_planks"), 5);
    assert_eq!(claims.count("stick"), 4);
}

#[test]
fn zero_quantities_are_not_stored() {
    let mut ledger = Ledger::new();
    ledger.add("dirt", 0);
    assert!(ledger.is_empty());
    ledger.set("dirt", 4);
    ledger.take("dirt", 4).unwrap();
    assert!(ledger.is_empty());
    assert_eq!(ledger.iter().count(), 0);
}

mod properties {
    use craft_core::Ledger;
    use proptest::prelude::*;

    fn arb_ledger() -> impl Strategy<Value = Ledger> {
        prop::collection::btree_map("[a-e]", 0u32..20, 0..5)
            .prop_map(|items| items.into_iter().collect())
    }

    proptest! {
        #[test]
        fn without_never_exceeds_either_side(a in arb_ledger(), b in arb_ledger()) {
            let left = a.without(&b);
            for (item, count) in left.iter() {
                prop_assert!(count <= a.count(item));
                prop_assert_eq!(count, a.count(item).saturating_sub(b.count(item)));
            }
        }

        #[test]
        fn max_with_is_symmetric(a in arb_ledger(), b in arb_ledger()) {
            prop_assert_eq!(a.max_with(&b), b.max_with(&a));
        }

        #[test]
        fn plus_then_without_restores(a in arb_ledger(), b in arb_ledger()) {
            prop_assert_eq!(a.plus(&b).without(&b), a);
        }
    }
}
