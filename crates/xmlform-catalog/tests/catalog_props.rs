use proptest::prelude::*;
use xmlform_catalog::FieldTypeCatalog;

proptest! {
    #[test]
    fn prop_legacy_lookup_is_total(name in ".{0,24}") {
        let catalog = FieldTypeCatalog::builtin().unwrap();
        let resolved = catalog.legacy_to_current(&name);

        // Whatever comes back is a catalogued type
        prop_assert!(catalog.get(resolved.id).is_some());
    }

    #[test]
    fn prop_known_legacy_names_survive_case_changes(index in 0usize..17, upper in any::<bool>()) {
        let catalog = FieldTypeCatalog::builtin().unwrap();
        let field_type = catalog.iter().nth(index).unwrap();
        let legacy = if upper {
            field_type.legacy.to_uppercase()
        } else {
            field_type.legacy.clone()
        };

        prop_assert_eq!(catalog.legacy_to_current(&legacy).id, field_type.id);
    }
}

#[test]
fn every_type_has_at_most_one_carrier() {
    let catalog = FieldTypeCatalog::builtin().unwrap();
    for field_type in catalog.iter() {
        assert!(
            field_type.behavior.carriers().len() <= 1,
            "{} has several carriers",
            field_type.name
        );
    }
}
