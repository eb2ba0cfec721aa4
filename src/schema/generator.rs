//! Migration script generator
//!
//! This module compares two parsed [`Database`] models and renders the
//! ALTER/DROP/CREATE statements that transform the origin schema into the
//! target schema. Generation never fails: every combination of
//! present/absent/equal/unequal entities has an explicit branch, and "no
//! difference" simply emits nothing for that scope.
//!
//! Output is assembled as an ordered list of fragments joined once at the
//! end, so a given pair of inputs always produces byte-identical text.

use indexmap::IndexSet;

use crate::schema::types::{Database, Field, Index, PrimaryKey, Table, UniqueKey};
use crate::utils::text::strip_backticks;

const INSERT_KEYWORD: &str = "INSERT INTO";

/// Generate the migration script that upgrades `origin` to `target`
///
/// When the origin database name is missing or differs from the target's,
/// no incremental diff is attempted and the target's verbatim source is
/// returned as a full redeploy.
pub fn upgrade_sql(origin: &Database, target: &Database) -> String {
    let origin_name = origin.name.as_deref().unwrap_or("").trim();
    let target_name = target.name.as_deref().unwrap_or("").trim();
    if origin_name.is_empty() || origin_name != target_name {
        tracing::info!(
            origin = %origin_name,
            target = %target_name,
            "database names differ, emitting full redeploy"
        );
        return target.origin_sql.clone();
    }

    let mut fragments: Vec<String> = Vec::new();
    fragments.push(format!("USE {};", target_name));

    // Dropped tables first, then creations and alterations in target order.
    for table_name in origin.tables.keys() {
        if !target.tables.contains_key(table_name) {
            tracing::debug!(table = %table_name, "table dropped");
            fragments.push(format!("DROP TABLE IF EXISTS `{}`;", table_name));
        }
    }
    for (table_name, table) in &target.tables {
        match origin.tables.get(table_name) {
            None => {
                tracing::debug!(table = %table_name, "table added");
                fragments.push(table.origin_sql.clone());
            }
            Some(origin_table) => {
                if let Some(alter) = alter_table(origin_table, table) {
                    tracing::debug!(table = %table_name, "table altered");
                    fragments.push(alter);
                }
            }
        }
    }

    fragments.extend(fixture_diff(&origin.fixtures, &target.fixtures));

    let mut script = String::new();
    for fragment in &fragments {
        script.push_str(fragment);
        script.push('\n');
    }
    script
}

/// Build one ALTER TABLE statement covering every difference between the
/// two tables, or `None` when they are structurally equal
///
/// Clause order is fixed: columns, then primary key, then unique keys,
/// then indexes; within each category origin-side drops come before
/// target-side additions and modifications. A renamed key is always a
/// drop of the old name plus an add of the new one.
pub fn alter_table(origin: &Table, target: &Table) -> Option<String> {
    let mut clauses: Vec<String> = Vec::new();

    for field_name in origin.fields.keys() {
        if !target.fields.contains_key(field_name) {
            clauses.push(drop_field(field_name));
        }
    }
    for (field_name, field) in &target.fields {
        match origin.fields.get(field_name) {
            None => clauses.push(add_field(field)),
            Some(origin_field) if origin_field != field => clauses.push(modify_field(field)),
            Some(_) => {}
        }
    }

    match (&origin.primary_key, &target.primary_key) {
        (None, Some(primary_key)) => clauses.push(add_primary_key(primary_key)),
        (Some(_), None) => clauses.push(drop_primary_key()),
        (Some(origin_key), Some(target_key)) if origin_key != target_key => {
            clauses.push(drop_primary_key());
            clauses.push(add_primary_key(target_key));
        }
        _ => {}
    }

    for (key_name, key) in &origin.unique_keys {
        if !target.unique_keys.contains_key(key_name) {
            clauses.push(drop_index(&key.name));
        }
    }
    for (key_name, key) in &target.unique_keys {
        match origin.unique_keys.get(key_name) {
            None => clauses.push(add_unique_key(key)),
            Some(origin_key) if origin_key != key => {
                clauses.push(drop_index(&origin_key.name));
                clauses.push(add_unique_key(key));
            }
            Some(_) => {}
        }
    }

    for (index_name, index) in &origin.indexes {
        if !target.indexes.contains_key(index_name) {
            clauses.push(drop_index(&index.name));
        }
    }
    for (index_name, index) in &target.indexes {
        match origin.indexes.get(index_name) {
            None => clauses.push(add_index(index)),
            Some(origin_index) if origin_index != index => {
                clauses.push(drop_index(&origin_index.name));
                clauses.push(add_index(index));
            }
            Some(_) => {}
        }
    }

    if clauses.is_empty() {
        return None;
    }
    let mut body = clauses.join("\n");
    if body.ends_with(',') {
        body.pop();
    }
    Some(format!("ALTER TABLE `{}`\n{};", target.name, body))
}

/// Emit fixture statements present in the target set but not the origin set
///
/// An INSERT fixture is preceded by a TRUNCATE of its table so the reload
/// starts clean. Fixtures removed from the target are not represented in
/// the output; fixture data is treated as append-only seed data.
pub fn fixture_diff(origin: &IndexSet<String>, target: &IndexSet<String>) -> Vec<String> {
    let mut fragments = Vec::new();
    for sql in target {
        if origin.contains(sql) {
            continue;
        }
        if let Some(table_name) = insert_target_table(sql) {
            fragments.push(format!("TRUNCATE TABLE {};", table_name));
        }
        fragments.push(sql.clone());
    }
    fragments
}

/// The table an INSERT statement writes to, or `None` for any other shape
fn insert_target_table(sql: &str) -> Option<String> {
    let rest = sql.strip_prefix(INSERT_KEYWORD)?;
    let end = rest.find('(')?;
    Some(strip_backticks(&rest[..end]).trim().to_string())
}

fn add_field(field: &Field) -> String {
    // No appended comma: `extra` carries the source line's own trailing
    // comma and comment text verbatim.
    format!(
        "ADD COLUMN `{}` {} {}",
        field.name, field.field_type, field.extra
    )
}

fn modify_field(field: &Field) -> String {
    format!(
        "MODIFY COLUMN `{}` {} {}",
        field.name, field.field_type, field.extra
    )
}

fn drop_field(field_name: &str) -> String {
    format!("DROP COLUMN `{}`,", field_name)
}

fn add_primary_key(primary_key: &PrimaryKey) -> String {
    format!("ADD PRIMARY KEY (`{}`),", primary_key.field)
}

fn drop_primary_key() -> String {
    "DROP PRIMARY KEY,".to_string()
}

fn add_unique_key(key: &UniqueKey) -> String {
    format!("ADD CONSTRAINT {} UNIQUE ({}),", key.name, key.fields.join(","))
}

fn add_index(index: &Index) -> String {
    format!("ADD INDEX {} ({}),", index.name, index.fields.join(","))
}

fn drop_index(key_name: &str) -> String {
    format!("DROP INDEX {},", key_name)
}
