//! Dependency-table configuration.
//!
//! Production runs on the built-in table; deployments can point
//! `RAILOPS_PERMISSION_TABLE` at a JSON file (`{"name": ["required", ...]}`)
//! to replace it without a rebuild.

use std::ffi::OsString;
use std::path::Path;

use crate::error::{TableError, TableResult};
use crate::{DependencyResolver, DependencyTable};

/// Environment variable naming a JSON dependency table file.
pub const TABLE_PATH_ENV: &str = "RAILOPS_PERMISSION_TABLE";

/// Load the dependency table selected by the environment.
pub fn load_table() -> TableResult<DependencyTable> {
    load_table_with(|key| std::env::var_os(key))
}

/// Load the dependency table, reading `TABLE_PATH_ENV` through `lookup`.
///
/// Unset selects the built-in table; set reads the JSON file it names.
pub fn load_table_with<F>(lookup: F) -> TableResult<DependencyTable>
where
    F: FnOnce(&str) -> Option<OsString>,
{
    match lookup(TABLE_PATH_ENV) {
        Some(path) => load_table_from(path),
        None => {
            tracing::info!("{TABLE_PATH_ENV} not set; using built-in permission dependency table");
            Ok(DependencyTable::builtin())
        }
    }
}

/// Load and validate a JSON dependency table from `path`.
pub fn load_table_from(path: impl AsRef<Path>) -> TableResult<DependencyTable> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
    let table = DependencyTable::from_json_str(&json)?;

    for name in table.self_references() {
        tracing::warn!(permission = %name, "permission lists itself as a dependency");
    }
    tracing::debug!(path = %path.display(), entries = table.len(), "loaded permission dependency table");

    Ok(table)
}

/// Resolver over the table selected by the environment.
pub fn load_resolver() -> TableResult<DependencyResolver> {
    load_table().map(DependencyResolver::new)
}
