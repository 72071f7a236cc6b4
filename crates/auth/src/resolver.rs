//! Dependency graph resolver.
//!
//! Pure, in-memory traversal over an injected [`DependencyTable`]:
//!
//! - No IO
//! - No panics
//! - No errors: unknown names, unmapped IDs and cycles degrade to "contributes
//!   nothing" instead of failing

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

use crate::catalog::{CatalogIndex, CatalogPermission};
use crate::{DependencyTable, Permission};

/// Result of expanding a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion<Id> {
    /// The selection (first occurrence order) followed by `added`.
    pub ids: Vec<Id>,

    /// IDs pulled in as dependencies that were not part of the selection.
    pub added: Vec<Id>,
}

/// Expands permission selections along a dependency table.
///
/// The resolver only reads its table, so one instance can serve concurrent
/// callers behind a shared reference.
#[derive(Debug, Clone, Default)]
pub struct DependencyResolver {
    table: DependencyTable,
}

impl DependencyResolver {
    pub fn new(table: DependencyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DependencyTable {
        &self.table
    }

    /// Directly required names of `name` (empty for unknown names).
    pub fn requirements(&self, name: &str) -> &[Permission] {
        self.table.requirements(name)
    }

    /// Every name transitively required by `start`, excluding `start` itself.
    ///
    /// Terminates on cyclic tables; a cycle leading back to `start` does not
    /// make `start` part of its own closure.
    pub fn closure(&self, start: &str) -> BTreeSet<Permission> {
        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut required = BTreeSet::new();
        let mut stack = vec![start];

        while let Some(name) = stack.pop() {
            for dep in self.table.requirements(name) {
                if visited.insert(dep.as_str()) {
                    required.insert(dep.clone());
                    stack.push(dep.as_str());
                }
            }
        }

        required
    }

    /// Union of [`closure`](Self::closure) over `names`.
    ///
    /// Traversal state is shared across all starting names, so each vertex is
    /// expanded at most twice however many names are given. A starting name
    /// appears in the result only when another starting name requires it.
    pub fn closure_of_many<I>(&self, names: I) -> BTreeSet<Permission>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let starts: Vec<I::Item> = names.into_iter().collect();

        let mut reach: HashMap<&str, Reach<'_>> = HashMap::new();
        let mut reached: HashMap<&str, &Permission> = HashMap::new();
        let mut stack: Vec<&str> = Vec::new();

        for start in &starts {
            let start = start.as_ref();
            if merge(&mut reach, start, Reach::From(start)) {
                stack.push(start);
            }
        }

        while let Some(name) = stack.pop() {
            let origin = reach[name];
            for dep in self.table.requirements(name) {
                reached.entry(dep.as_str()).or_insert(dep);
                if merge(&mut reach, dep.as_str(), origin) {
                    stack.push(dep.as_str());
                }
            }
        }

        reached
            .into_iter()
            .filter(|(name, _)| match reach[name] {
                Reach::From(origin) => origin != *name,
                Reach::Shared => true,
            })
            .map(|(_, permission)| permission.clone())
            .collect()
    }

    /// Close `selected` over the dependency table, translating through `catalog`.
    ///
    /// The selection is always kept verbatim (deduplicated), including IDs the
    /// catalog does not know. Required names without a catalog ID are skipped.
    pub fn expand<Id>(&self, selected: &[Id], catalog: &[CatalogPermission<Id>]) -> Vec<Id>
    where
        Id: Clone + Eq + Hash + Debug,
    {
        self.expand_with_report(selected, catalog).ids
    }

    /// Like [`expand`](Self::expand), additionally reporting which IDs were added.
    pub fn expand_with_report<Id>(
        &self,
        selected: &[Id],
        catalog: &[CatalogPermission<Id>],
    ) -> Expansion<Id>
    where
        Id: Clone + Eq + Hash + Debug,
    {
        let index = CatalogIndex::new(catalog);
        self.expand_indexed(selected, &index)
    }

    /// Expansion against a pre-built index, for callers expanding repeatedly
    /// over the same catalog snapshot.
    pub fn expand_indexed<Id>(&self, selected: &[Id], index: &CatalogIndex<'_, Id>) -> Expansion<Id>
    where
        Id: Clone + Eq + Hash + Debug,
    {
        let mut seen: HashSet<&Id> = HashSet::with_capacity(selected.len());
        let mut ids = Vec::with_capacity(selected.len());
        let mut names = Vec::with_capacity(selected.len());

        for id in selected {
            if !seen.insert(id) {
                continue;
            }
            ids.push(id.clone());
            match index.name_of(id) {
                Some(name) => names.push(name),
                None => tracing::trace!(id = ?id, "selected permission not in catalog"),
            }
        }

        let mut added = Vec::new();
        for name in self.closure_of_many(names) {
            match index.id_of(name.as_str()) {
                Some(id) => {
                    if seen.insert(id) {
                        added.push(id.clone());
                    }
                }
                None => tracing::trace!(permission = %name, "required permission has no catalog id"),
            }
        }

        tracing::debug!(
            selected = ids.len(),
            added = added.len(),
            "expanded permission selection"
        );

        ids.extend(added.iter().cloned());
        Expansion { ids, added }
    }
}

/// Which starting names reach a vertex: exactly one, or at least two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach<'a> {
    From(&'a str),
    Shared,
}

/// Join `incoming` into the vertex's reach; `true` if it changed.
fn merge<'a>(reach: &mut HashMap<&'a str, Reach<'a>>, name: &'a str, incoming: Reach<'a>) -> bool {
    match reach.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(incoming);
            true
        }
        Entry::Occupied(mut slot) => match (*slot.get(), incoming) {
            (Reach::Shared, _) => false,
            (Reach::From(current), Reach::From(other)) if current == other => false,
            _ => {
                slot.insert(Reach::Shared);
                true
            }
        },
    }
}
