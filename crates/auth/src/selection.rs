//! Role-editor selection state: select-all and single-permission toggles.
//!
//! Selecting only ever adds (through expansion); deselecting removes exactly
//! the toggled ID and never cascades to its dependencies, which may still be
//! required by other selected permissions.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::CatalogPermission;
use crate::resolver::DependencyResolver;

/// Outcome of [`PermissionSelection::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggled<Id> {
    /// The ID was added; `auto_added` lists dependencies pulled in with it.
    Selected { auto_added: Vec<Id> },
    /// The ID was removed; nothing else changed.
    Deselected,
}

/// A set of selected permission IDs, kept in selection order.
///
/// Serialized as a plain ID list; duplicates in stored lists are dropped on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSelection<Id> {
    ids: Vec<Id>,
}

impl<Id> Default for PermissionSelection<Id> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<Id> PermissionSelection<Id>
where
    Id: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing (possibly unclosed) selection; duplicates are dropped.
    pub fn from_ids(ids: impl IntoIterator<Item = Id>) -> Self {
        let mut seen = HashSet::new();
        let ids = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self { ids }
    }

    /// Every catalog permission that has an ID, closed over its dependencies.
    pub fn select_all(resolver: &DependencyResolver, catalog: &[CatalogPermission<Id>]) -> Self {
        let all: Vec<Id> = catalog.iter().filter_map(|p| p.id.clone()).collect();
        Self::from_ids(resolver.expand(&all, catalog))
    }

    /// Flip one permission.
    ///
    /// Selecting re-closes the whole selection; deselecting removes only `id`.
    pub fn toggle(
        &mut self,
        resolver: &DependencyResolver,
        id: Id,
        catalog: &[CatalogPermission<Id>],
    ) -> Toggled<Id> {
        if self.contains(&id) {
            self.ids.retain(|selected| *selected != id);
            return Toggled::Deselected;
        }

        self.ids.push(id);
        let expansion = resolver.expand_with_report(&self.ids, catalog);
        self.ids = expansion.ids;
        Toggled::Selected {
            auto_added: expansion.added,
        }
    }

    /// Close the current selection in place, returning the IDs that were added.
    pub fn close(&mut self, resolver: &DependencyResolver, catalog: &[CatalogPermission<Id>]) -> Vec<Id> {
        let expansion = resolver.expand_with_report(&self.ids, catalog);
        self.ids = expansion.ids;
        expansion.added
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<Id> {
        self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<Id: Serialize> Serialize for PermissionSelection<Id> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}

impl<'de, Id> Deserialize<'de> for PermissionSelection<Id>
where
    Id: Deserialize<'de> + Clone + Eq + Hash + Debug,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Id>::deserialize(deserializer).map(Self::from_ids)
    }
}
