//! Permission dependency resolution for the rail-operations dashboard.
//!
//! Expands a selection of permissions into the closed set required for those
//! permissions to be usable (granting `shift.update` implies reading the
//! companies, customers, projects and employees a shift references).
//!
//! This crate is intentionally decoupled from HTTP, storage and sessions:
//! permission identifiers in, expanded permission identifiers out.

pub mod catalog;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod permissions;
pub mod resolver;
pub mod selection;

pub use catalog::{CatalogIndex, CatalogPermission};
pub use dependencies::DependencyTable;
pub use error::{TableError, TableResult};
pub use permissions::Permission;
pub use resolver::{DependencyResolver, Expansion};
pub use selection::{PermissionSelection, Toggled};
