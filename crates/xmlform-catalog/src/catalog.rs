//! Field type catalog
//!
//! Provides [`FieldTypeCatalog`], the validated, read-only view of a
//! [`CatalogConfig`]. All lookups are pure.

use crate::behavior::{Behavior, BehaviorFlag};
use crate::config::{CatalogConfig, FieldTypeRow};
use crate::error::CatalogError;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use xmlform_model::FieldTypeId;

/// A catalogued field type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    /// Current id
    pub id: FieldTypeId,
    /// Current name
    pub name: String,
    /// Legacy dialect name
    pub legacy: String,
    /// Classification
    pub behavior: Behavior,
}

/// Validated field type catalog
///
/// Both directions of the legacy mapping come from the same table, so they
/// cannot drift apart.
#[derive(Debug, Clone)]
pub struct FieldTypeCatalog {
    types: Vec<FieldType>,
    by_id: HashMap<FieldTypeId, usize>,
    by_name: HashMap<String, usize>,
    /// Lowercased legacy name -> row
    by_legacy: HashMap<String, usize>,
    default_type: usize,
    system_list_type: usize,
    ignored_attributes: HashSet<String>,
    on_field_attributes: HashSet<String>,
    value_attributes: HashSet<String>,
    delimiter: String,
}

impl FieldTypeCatalog {
    /// Build the built-in catalog
    ///
    /// # Errors
    /// Only fails if the embedded catalog is inconsistent.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_config(CatalogConfig::builtin()?)
    }

    /// Parse and validate catalog TOML
    ///
    /// # Errors
    /// Returns TOML or validation errors.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        Self::from_config(CatalogConfig::from_toml_str(source)?)
    }

    /// Load and validate a catalog file
    ///
    /// # Errors
    /// Returns IO, TOML or validation errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_config(CatalogConfig::load(path)?)
    }

    /// Validate a configuration into a catalog
    ///
    /// # Errors
    /// Rejects duplicate rows, sets naming unknown types, unknown default or
    /// system list types, types with more than one value carrier and an
    /// empty delimiter.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.multi_value_delimiter.is_empty() {
            return Err(CatalogError::EmptyDelimiter);
        }

        let mut types = Vec::with_capacity(config.types.len());
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();
        let mut by_legacy = HashMap::new();

        for (index, FieldTypeRow { id, name, legacy }) in config.types.into_iter().enumerate() {
            if by_id.insert(id, index).is_some() {
                return Err(CatalogError::DuplicateTypeId(id));
            }
            if by_name.insert(name.clone(), index).is_some() {
                return Err(CatalogError::DuplicateTypeName(name));
            }
            if by_legacy.insert(legacy.to_lowercase(), index).is_some() {
                return Err(CatalogError::DuplicateLegacyName(legacy));
            }
            types.push(FieldType {
                id,
                name,
                legacy,
                behavior: Behavior::empty(),
            });
        }

        let default_type = *by_name
            .get(&config.default_type)
            .ok_or_else(|| CatalogError::UnknownDefaultType(config.default_type.clone()))?;
        let system_list_type = *by_name
            .get(&config.system_list_type)
            .ok_or_else(|| CatalogError::UnknownSystemListType(config.system_list_type.clone()))?;

        for flag in BehaviorFlag::ALL {
            for name in config.behavior.members(flag) {
                let index = *by_name.get(name).ok_or_else(|| CatalogError::UnknownTypeInSet {
                    flag,
                    name: name.clone(),
                })?;
                types[index].behavior = types[index].behavior.with(flag);
            }
        }
        types[system_list_type].behavior =
            types[system_list_type].behavior.with(BehaviorFlag::SystemList);

        for field_type in &types {
            let carriers = field_type.behavior.carriers();
            if carriers.len() > 1 {
                return Err(CatalogError::ConflictingCarriers {
                    name: field_type.name.clone(),
                    carriers,
                });
            }
        }

        tracing::debug!(
            types = types.len(),
            default = %types[default_type].name,
            "field type catalog ready"
        );

        Ok(Self {
            types,
            by_id,
            by_name,
            by_legacy,
            default_type,
            system_list_type,
            ignored_attributes: config.attributes.ignored.into_iter().collect(),
            on_field_attributes: config.attributes.on_field.into_iter().collect(),
            value_attributes: config.attributes.value.into_iter().collect(),
            delimiter: config.multi_value_delimiter,
        })
    }

    /// Behavior flags of a type (empty for unknown ids)
    #[must_use]
    pub fn classify(&self, id: FieldTypeId) -> Behavior {
        self.get(id).map_or_else(Behavior::empty, |t| t.behavior)
    }

    /// Map a legacy type name to a current type
    ///
    /// Matching ignores ASCII case. Unmapped names resolve to the default
    /// type, so this never fails.
    #[must_use]
    pub fn legacy_to_current(&self, legacy: &str) -> &FieldType {
        match self.by_legacy.get(&legacy.to_lowercase()) {
            Some(&index) => &self.types[index],
            None => {
                tracing::debug!(legacy, "unmapped legacy field type, using default");
                &self.types[self.default_type]
            }
        }
    }

    /// Map a current type id to its legacy name
    #[must_use]
    pub fn current_to_legacy(&self, id: FieldTypeId) -> Option<&str> {
        self.get(id).map(|t| t.legacy.as_str())
    }

    /// Type by current id
    #[inline]
    #[must_use]
    pub fn get(&self, id: FieldTypeId) -> Option<&FieldType> {
        self.by_id.get(&id).map(|&index| &self.types[index])
    }

    /// Type by current name
    #[inline]
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&FieldType> {
        self.by_name.get(name).map(|&index| &self.types[index])
    }

    /// Fallback type for unmapped legacy names
    #[inline]
    #[must_use]
    pub fn default_type(&self) -> &FieldType {
        &self.types[self.default_type]
    }

    /// Type whose values are system list ids
    #[inline]
    #[must_use]
    pub fn system_list_type(&self) -> &FieldType {
        &self.types[self.system_list_type]
    }

    /// Attribute dropped on decode
    #[inline]
    #[must_use]
    pub fn is_ignored_attribute(&self, name: &str) -> bool {
        self.ignored_attributes.contains(name)
    }

    /// Attribute copied to a top-level field column on decode
    #[inline]
    #[must_use]
    pub fn is_on_field_attribute(&self, name: &str) -> bool {
        self.on_field_attributes.contains(name)
    }

    /// Attribute copied to the value slot on decode
    #[inline]
    #[must_use]
    pub fn is_value_attribute(&self, name: &str) -> bool {
        self.value_attributes.contains(name)
    }

    /// Separator of multi-selection values
    #[inline]
    #[must_use]
    pub fn multi_value_delimiter(&self) -> &str {
        &self.delimiter
    }

    /// All types in table order
    pub fn iter(&self) -> impl Iterator<Item = &FieldType> {
        self.types.iter()
    }

    /// Number of types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the catalog has no types
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::ValueCarrier;

    fn builtin() -> FieldTypeCatalog {
        FieldTypeCatalog::builtin().unwrap()
    }

    const MINIMAL: &str = r#"
        default_type = "text"
        system_list_type = "list"

        [[types]]
        id = 1
        name = "text"
        legacy = "text"

        [[types]]
        id = 2
        name = "list"
        legacy = "systemlist"
    "#;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin();
        assert_eq!(catalog.len(), 17);
        assert_eq!(catalog.default_type().name, "text_field");
        assert_eq!(catalog.system_list_type().legacy, "systemlist");
    }

    #[test]
    fn legacy_mapping_is_a_bijection() {
        let catalog = builtin();
        for field_type in catalog.iter() {
            let legacy = catalog.current_to_legacy(field_type.id).unwrap();
            assert_eq!(catalog.legacy_to_current(legacy).id, field_type.id);
        }
    }

    #[test]
    fn unknown_legacy_name_falls_back_to_default() {
        let catalog = builtin();
        assert_eq!(catalog.legacy_to_current("hologram").name, "text_field");
        assert_eq!(catalog.legacy_to_current("").name, "text_field");
    }

    #[test]
    fn legacy_lookup_ignores_case() {
        let catalog = builtin();
        assert_eq!(catalog.legacy_to_current("CheckBoxList").name, "checkbox_list");
    }

    #[test]
    fn unknown_current_type_has_no_legacy_name() {
        let catalog = builtin();
        assert_eq!(catalog.current_to_legacy(FieldTypeId(999)), None);
        assert!(catalog.classify(FieldTypeId(999)).is_empty());
    }

    #[test]
    fn builtin_carriers() {
        let catalog = builtin();
        let carrier = |name: &str| catalog.classify(catalog.by_name(name).unwrap().id).carrier();

        assert_eq!(carrier("text_area"), Some(ValueCarrier::Text));
        assert_eq!(carrier("yes_no"), Some(ValueCarrier::Text));
        assert_eq!(carrier("image"), Some(ValueCarrier::Src));
        assert_eq!(carrier("text_field"), Some(ValueCarrier::ValuePair));
        assert_eq!(carrier("system_list"), Some(ValueCarrier::ValuePair));
        assert_eq!(carrier("embed_files"), Some(ValueCarrier::Files));
        assert_eq!(carrier("checkbox_list"), None);
    }

    #[test]
    fn builtin_flags() {
        let catalog = builtin();
        let flags = |name: &str| catalog.classify(catalog.by_name(name).unwrap().id);

        assert!(flags("checkbox_list").contains(BehaviorFlag::MultiValued));
        assert!(flags("text_field").contains(BehaviorFlag::MinMaxLength));
        assert!(!flags("number").contains(BehaviorFlag::MinMaxLength));
        assert!(flags("yes_no").contains(BehaviorFlag::TextFallback));
        assert!(flags("system_list").contains(BehaviorFlag::SystemList));
    }

    #[test]
    fn attribute_sets_are_case_sensitive() {
        let catalog = builtin();
        assert!(catalog.is_ignored_attribute("data-files"));
        assert!(catalog.is_on_field_attribute("name"));
        assert!(!catalog.is_on_field_attribute("Name"));
        assert!(catalog.is_value_attribute("data-value"));
    }

    #[test]
    fn rejects_duplicate_legacy_name() {
        let source = format!("{MINIMAL}\n[[types]]\nid = 3\nname = \"other\"\nlegacy = \"TEXT\"\n");
        let err = FieldTypeCatalog::from_toml_str(&source).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateLegacyName(name) if name == "TEXT"));
    }

    #[test]
    fn rejects_duplicate_id() {
        let source = format!("{MINIMAL}\n[[types]]\nid = 2\nname = \"other\"\nlegacy = \"other\"\n");
        let err = FieldTypeCatalog::from_toml_str(&source).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTypeId(FieldTypeId(2))));
    }

    #[test]
    fn rejects_unknown_set_member() {
        let source = format!("{MINIMAL}\n[behavior]\nimage = [\"photo\"]\n");
        let err = FieldTypeCatalog::from_toml_str(&source).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownTypeInSet { flag: BehaviorFlag::Image, .. }
        ));
    }

    #[test]
    fn rejects_unknown_default() {
        let source = MINIMAL.replace("default_type = \"text\"", "default_type = \"nope\"");
        let err = FieldTypeCatalog::from_toml_str(&source).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDefaultType(_)));
    }

    #[test]
    fn rejects_conflicting_carriers() {
        let source = format!("{MINIMAL}\n[behavior]\nimage = [\"text\"]\nplain_value = [\"text\"]\n");
        let err = FieldTypeCatalog::from_toml_str(&source).unwrap_err();
        assert!(matches!(err, CatalogError::ConflictingCarriers { name, .. } if name == "text"));
    }

    #[test]
    fn accepts_system_list_infix_overlap() {
        let source =
            format!("{MINIMAL}\n[behavior]\ninfix_value = [\"list\"]\nplain_value = [\"list\"]\n");
        let catalog = FieldTypeCatalog::from_toml_str(&source).unwrap();
        assert_eq!(
            catalog.classify(FieldTypeId(2)).carrier(),
            Some(ValueCarrier::ValuePair)
        );
    }

    #[test]
    fn rejects_empty_delimiter() {
        let source = format!("multi_value_delimiter = \"\"\n{MINIMAL}");
        let err = FieldTypeCatalog::from_toml_str(&source).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyDelimiter));
    }
}
