use proptest::collection::btree_map;
use proptest::prelude::*;
use xmlform_model::SystemListId;
use xmlform_resolve::{verify_round_trip, InMemorySystemLists, SystemListResolver};

proptest! {
    #[test]
    fn prop_bijective_catalog_round_trips(entries in btree_map(0u64..500, "[A-Za-z ]{1,12}", 0..40)) {
        // Keep the first id per legacy value so the store accepts the set
        let mut seen = std::collections::HashSet::new();
        let unique: Vec<_> = entries
            .into_iter()
            .filter(|(_, legacy)| seen.insert(legacy.clone()))
            .map(|(id, legacy)| (SystemListId(id), legacy))
            .collect();

        let lists = InMemorySystemLists::from_entries(unique.clone()).unwrap();

        for (id, legacy) in &unique {
            let stored = lists.legacy_value_of(*id);
            prop_assert_eq!(stored.as_deref(), Some(legacy.as_str()));
            prop_assert_eq!(lists.find_by_legacy_value(legacy), Some(*id));
        }
        prop_assert!(verify_round_trip(&lists, lists.ids()).is_ok());
    }

    #[test]
    fn prop_colliding_legacy_values_are_rejected(a in 0u64..100, b in 100u64..200, legacy in "[a-z]{1,8}") {
        let result = InMemorySystemLists::from_entries([
            (SystemListId(a), legacy.clone()),
            (SystemListId(b), legacy),
        ]);
        prop_assert!(result.is_err());
    }
}
