//! Permission dependency table.
//!
//! A static directed graph: an edge `u -> v` means "granting `u` requires also
//! granting `v`". Names that never appear as a key are leaves.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::Permission;
use crate::error::{TableError, TableResult};

/// Immutable mapping `name -> ordered set of directly required names`.
///
/// Built once at startup and injected into the resolver; it is never mutated
/// afterwards, so it can be shared across threads without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct DependencyTable {
    edges: HashMap<Permission, Vec<Permission>>,
}

impl DependencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dependency table of the rail-operations dashboard.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|&(name, requires)| (name, requires.iter().copied()))
            .collect()
    }

    /// Parse a table from a JSON object of `"name": ["required", ...]`.
    pub fn from_json_str(json: &str) -> TableResult<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Directly required names of `name`.
    ///
    /// Unknown names are leaves and yield an empty slice.
    pub fn requirements(&self, name: &str) -> &[Permission] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.edges.contains_key(name)
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every vertex of the graph: declared keys plus every required name.
    pub fn names(&self) -> BTreeSet<&Permission> {
        self.edges
            .iter()
            .flat_map(|(name, requires)| std::iter::once(name).chain(requires))
            .collect()
    }

    /// Keys that list themselves as a requirement.
    ///
    /// Harmless for resolution, but almost always an authoring mistake.
    pub fn self_references(&self) -> impl Iterator<Item = &Permission> {
        self.edges
            .iter()
            .filter(|(name, requires)| requires.contains(*name))
            .map(|(name, _)| name)
    }
}

impl<K, V> FromIterator<(K, V)> for DependencyTable
where
    K: Into<Permission>,
    V: IntoIterator,
    V::Item: Into<Permission>,
{
    /// Later entries for the same key replace earlier ones; repeated required
    /// names within one entry collapse to their first occurrence.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut edges = HashMap::new();
        for (name, requires) in iter {
            let mut seen = HashSet::new();
            let requires: Vec<Permission> = requires
                .into_iter()
                .map(Into::into)
                .filter(|p: &Permission| seen.insert(p.clone()))
                .collect();
            edges.insert(name.into(), requires);
        }
        Self { edges }
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for DependencyTable {
    type Error = TableError;

    fn try_from(raw: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        for (name, requires) in &raw {
            if name.is_empty() || requires.iter().any(String::is_empty) {
                return Err(TableError::EmptyName(name.clone()));
            }
        }
        Ok(raw.into_iter().collect())
    }
}

impl From<DependencyTable> for BTreeMap<String, Vec<String>> {
    fn from(table: DependencyTable) -> Self {
        table
            .edges
            .into_iter()
            .map(|(name, requires)| {
                (
                    name.to_string(),
                    requires.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in table
// ─────────────────────────────────────────────────────────────────────────────

const BUILTIN: &[(&str, &[&str])] = &[
    // Master data
    ("customer.read", &["company.read"]),
    ("customer.create", &["customer.read", "company.read"]),
    ("customer.update", &["customer.read", "company.read"]),
    ("customer.delete", &["customer.read"]),
    ("project.read", &["customer.read", "company.read"]),
    ("project.create", &["project.read", "customer.read", "company.read"]),
    ("project.update", &["project.read", "customer.read", "company.read"]),
    ("project.delete", &["project.read"]),
    ("location.read", &["company.read"]),
    ("location.create", &["location.read", "company.read"]),
    ("location.update", &["location.read", "company.read"]),
    ("location.delete", &["location.read"]),
    ("qualification.read", &["company.read"]),
    ("qualification.create", &["qualification.read"]),
    ("qualification.update", &["qualification.read"]),
    ("qualification.delete", &["qualification.read"]),
    // Staff
    ("employee.read", &["company.read"]),
    ("employee.create", &["employee.read", "company.read", "qualification.read"]),
    ("employee.update", &["employee.read", "company.read", "qualification.read"]),
    ("employee.delete", &["employee.read"]),
    // Rolling stock
    ("wagon.read", &["company.read", "customer.read"]),
    ("wagon.create", &["wagon.read", "customer.read", "location.read"]),
    ("wagon.update", &["wagon.read", "customer.read", "location.read"]),
    ("wagon.delete", &["wagon.read"]),
    // Shift planning
    (
        "shift.read",
        &[
            "company.read",
            "customer.read",
            "project.read",
            "employee.read",
            "location.read",
            "wagon.read",
        ],
    ),
    (
        "shift.create",
        &[
            "shift.read",
            "company.read",
            "customer.read",
            "project.read",
            "employee.read",
            "location.read",
            "wagon.read",
        ],
    ),
    (
        "shift.update",
        &[
            "shift.read",
            "company.read",
            "customer.read",
            "project.read",
            "employee.read",
            "location.read",
            "wagon.read",
        ],
    ),
    ("shift.delete", &["shift.read"]),
    // Timesheets
    ("timesheet.read", &["shift.read", "employee.read"]),
    ("timesheet.create", &["timesheet.read", "shift.read", "employee.read", "project.read"]),
    ("timesheet.update", &["timesheet.read", "shift.read", "employee.read", "project.read"]),
    ("timesheet.delete", &["timesheet.read"]),
    ("timesheet.approve", &["timesheet.read", "timesheet.update"]),
    // Quality management
    ("quality_report.read", &["customer.read", "project.read", "employee.read"]),
    ("quality_report.create", &["quality_report.read", "shift.read", "wagon.read"]),
    ("quality_report.update", &["quality_report.read", "shift.read", "wagon.read"]),
    ("quality_report.delete", &["quality_report.read"]),
    ("quality_action.read", &["quality_report.read", "employee.read"]),
    ("quality_action.create", &["quality_action.read", "quality_report.read"]),
    ("quality_action.update", &["quality_action.read", "quality_report.read"]),
    ("quality_action.delete", &["quality_action.read"]),
    // Administration
    ("company.update", &["company.read"]),
    ("role.read", &["permission.read"]),
    ("role.create", &["role.read", "permission.read"]),
    ("role.update", &["role.read", "permission.read"]),
    ("role.delete", &["role.read"]),
    ("user.read", &["role.read", "employee.read"]),
    ("user.create", &["user.read", "role.read", "employee.read"]),
    ("user.update", &["user.read", "role.read", "employee.read"]),
    ("user.delete", &["user.read"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_has_no_requirements() {
        let table = DependencyTable::builtin();
        assert!(table.requirements("does.not.exist").is_empty());
        // Leaves are not declared as keys.
        assert!(!table.contains("company.read"));
        assert!(table.requirements("company.read").is_empty());
    }

    #[test]
    fn later_entry_replaces_earlier_and_duplicates_collapse() {
        let table: DependencyTable = [
            ("a", vec!["x"]),
            ("a", vec!["b", "c", "b"]),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = table.requirements("a").iter().map(Permission::as_str).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn names_include_leaves() {
        let table: DependencyTable = [("shift.create", vec!["company.read", "employee.read"])]
            .into_iter()
            .collect();

        let names: Vec<&str> = table.names().into_iter().map(Permission::as_str).collect();
        assert_eq!(names, vec!["company.read", "employee.read", "shift.create"]);
    }

    #[test]
    fn parses_json_object() {
        let table = DependencyTable::from_json_str(
            r#"{"shift.create": ["company.read", "employee.read"], "employee.read": ["company.read"]}"#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.requirements("employee.read"), &[Permission::from_static("company.read")]);
    }

    #[test]
    fn rejects_empty_names() {
        let err = DependencyTable::from_json_str(r#"{"shift.create": [""]}"#).unwrap_err();
        assert!(matches!(err, TableError::EmptyName(ref name) if name == "shift.create"));

        let err = DependencyTable::from_json_str(r#"{"": ["company.read"]}"#).unwrap_err();
        assert!(matches!(err, TableError::EmptyName(_)));
    }

    #[test]
    fn rejects_non_object_json() {
        let err = DependencyTable::from_json_str(r#"["shift.create"]"#).unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }

    #[test]
    fn serde_round_trip_preserves_edges() {
        let table = DependencyTable::builtin();
        let json = serde_json::to_string(&table).unwrap();
        let back: DependencyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn reports_self_references() {
        let table: DependencyTable = [("a", vec!["a", "b"]), ("b", vec!["c"])].into_iter().collect();
        let found: Vec<&str> = table.self_references().map(Permission::as_str).collect();
        assert_eq!(found, vec!["a"]);
    }

    #[test]
    fn builtin_has_no_self_references() {
        assert_eq!(DependencyTable::builtin().self_references().count(), 0);
    }

    #[test]
    fn builtin_writes_imply_their_own_read() {
        let table = DependencyTable::builtin();
        for name in table.names() {
            let Some(verb) = name.verb() else { continue };
            if matches!(verb, "create" | "update" | "delete") {
                let read = format!("{}.read", name.resource());
                assert!(
                    table.requirements(name.as_str()).iter().any(|p| p.as_str() == read),
                    "{name} does not require {read}"
                );
            }
        }
    }
}
