//! Permission catalog: the live `{id, name, originalName}` list supplied by
//! callers, and the per-call index translating between IDs and graph keys.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// One entry of the permission catalog as delivered by permission storage.
///
/// `id` is optional because storage may list permissions that have not been
/// assigned an identifier yet; such entries never take part in expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPermission<Id> {
    #[serde(default)]
    pub id: Option<Id>,

    /// Display name (may be localized or renamed).
    pub name: String,

    /// Stable key when it differs from the display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

impl<Id> CatalogPermission<Id> {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            original_name: None,
        }
    }

    /// An entry that has not been assigned an identifier.
    pub fn unassigned(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            original_name: None,
        }
    }

    pub fn with_original_name(mut self, original_name: impl Into<String>) -> Self {
        self.original_name = Some(original_name.into());
        self
    }

    /// Key used to join this entry into the dependency table.
    pub fn graph_key(&self) -> &str {
        self.original_name.as_deref().unwrap_or(&self.name)
    }
}

/// ID <-> graph key lookup over one catalog snapshot.
///
/// Entries without an `id` are skipped. Colliding keys or IDs resolve to the
/// last entry in catalog order.
#[derive(Debug, Clone)]
pub struct CatalogIndex<'a, Id> {
    names_by_id: HashMap<&'a Id, &'a str>,
    ids_by_name: HashMap<&'a str, &'a Id>,
}

impl<'a, Id: Eq + Hash> CatalogIndex<'a, Id> {
    pub fn new(catalog: &'a [CatalogPermission<Id>]) -> Self {
        let mut names_by_id = HashMap::with_capacity(catalog.len());
        let mut ids_by_name = HashMap::with_capacity(catalog.len());

        for entry in catalog {
            let Some(id) = entry.id.as_ref() else {
                continue;
            };
            let key = entry.graph_key();
            names_by_id.insert(id, key);
            ids_by_name.insert(key, id);
        }

        Self {
            names_by_id,
            ids_by_name,
        }
    }

    pub fn name_of(&self, id: &Id) -> Option<&'a str> {
        self.names_by_id.get(id).copied()
    }

    pub fn id_of(&self, name: &str) -> Option<&'a Id> {
        self.ids_by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names_by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_key_prefers_original_name() {
        let plain = CatalogPermission::new(1, "shift.read");
        assert_eq!(plain.graph_key(), "shift.read");

        let renamed = CatalogPermission::new(2, "Schichten lesen").with_original_name("shift.read");
        assert_eq!(renamed.graph_key(), "shift.read");
    }

    #[test]
    fn index_skips_unassigned_entries() {
        let catalog = vec![
            CatalogPermission::new(1, "shift.create"),
            CatalogPermission::unassigned("company.read"),
        ];
        let index = CatalogIndex::new(&catalog);

        assert_eq!(index.len(), 1);
        assert_eq!(index.id_of("company.read"), None);
        assert_eq!(index.name_of(&1), Some("shift.create"));
    }

    #[test]
    fn index_joins_on_original_name() {
        let catalog = vec![CatalogPermission::new(7, "Read companies").with_original_name("company.read")];
        let index = CatalogIndex::new(&catalog);

        assert_eq!(index.id_of("company.read"), Some(&7));
        assert_eq!(index.id_of("Read companies"), None);
        assert_eq!(index.name_of(&7), Some("company.read"));
    }

    #[test]
    fn colliding_names_resolve_to_last_entry() {
        let catalog = vec![
            CatalogPermission::new(1, "company.read"),
            CatalogPermission::new(2, "company.read"),
        ];
        let index = CatalogIndex::new(&catalog);

        assert_eq!(index.id_of("company.read"), Some(&2));
        // Both IDs still translate to the shared name.
        assert_eq!(index.name_of(&1), Some("company.read"));
    }

    #[test]
    fn deserializes_storage_payload() {
        let json = r#"[
            {"id": 1, "name": "shift.create"},
            {"id": 2, "name": "Mitarbeiter lesen", "originalName": "employee.read"},
            {"name": "company.read"}
        ]"#;
        let catalog: Vec<CatalogPermission<u64>> = serde_json::from_str(json).unwrap();

        assert_eq!(catalog[1].graph_key(), "employee.read");
        assert_eq!(catalog[2].id, None);
    }

    #[test]
    fn string_ids_are_supported() {
        let catalog = vec![CatalogPermission::new("perm-a".to_string(), "wagon.read")];
        let index = CatalogIndex::new(&catalog);
        assert_eq!(index.name_of(&"perm-a".to_string()), Some("wagon.read"));
    }
}
