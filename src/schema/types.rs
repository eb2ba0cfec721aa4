//! Type definitions for the parsed schema model
//!
//! All entities are built once by the parser and never mutated afterwards;
//! the differ only reads them. Name-keyed maps use insertion order so that
//! generated scripts are byte-reproducible for a given pair of inputs.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Represents a single column declaration
///
/// `extra` holds the verbatim remainder of the column line after the type
/// token, including any trailing comma and COMMENT text. It takes part in
/// equality, so a changed default or comment is detected as a modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub field_type: String,
    pub extra: String,
}

impl Field {
    /// Create a new field
    pub fn new(name: &str, field_type: &str, extra: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            extra: extra.to_string(),
        }
    }
}

/// Represents a primary key constraint
///
/// Only one governing field is retained; for a composite key the first
/// listed field wins. `label` is whatever text sat between the keyword and
/// the opening parenthesis (usually empty) and does not affect equality.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub label: String,
    pub field: String,
}

impl PartialEq for PrimaryKey {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
    }
}

/// Represents a unique key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueKey {
    pub name: String,
    pub fields: Vec<String>,
}

/// Represents a plain (non-unique) index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub fields: Vec<String>,
}

/// Represents one parsed CREATE TABLE statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub fields: IndexMap<String, Field>,
    pub primary_key: Option<PrimaryKey>,
    pub unique_keys: IndexMap<String, UniqueKey>,
    pub indexes: IndexMap<String, Index>,
    /// The verbatim creation statement, emitted unchanged when the whole
    /// table is new in the target schema.
    pub origin_sql: String,
}

impl Table {
    /// Create a new table with the given name and verbatim source
    pub fn new(name: &str, origin_sql: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: IndexMap::new(),
            primary_key: None,
            unique_keys: IndexMap::new(),
            indexes: IndexMap::new(),
            origin_sql: origin_sql.to_string(),
        }
    }

    /// Add a field, replacing any prior field of the same name
    pub fn add_field(&mut self, field: Field) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Add a unique key, replacing any prior key of the same name
    pub fn add_unique_key(&mut self, key: UniqueKey) {
        self.unique_keys.insert(key.name.clone(), key);
    }

    /// Add an index, replacing any prior index of the same name
    pub fn add_index(&mut self, index: Index) {
        self.indexes.insert(index.name.clone(), index);
    }
}

/// Represents one parsed schema dump
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    pub name: Option<String>,
    pub tables: IndexMap<String, Table>,
    /// Verbatim INSERT statements, compared by exact text only.
    pub fixtures: IndexSet<String>,
    /// Every kept input line, used as the full-redeploy fallback when no
    /// incremental diff is possible.
    pub origin_sql: String,
}

impl Database {
    /// Create a new empty database model
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            tables: IndexMap::new(),
            fixtures: IndexSet::new(),
            origin_sql: String::new(),
        }
    }

    /// Add a table, replacing any prior table of the same name
    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }
}
