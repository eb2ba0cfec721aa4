//! sql_diff: generates MySQL migration scripts by diffing two schema dumps
//!
//! Given an "origin" and a "target" schema dump, sql_diff parses each into a
//! structured [`Database`] model and emits the statements that transform the
//! former into the latter: dropped, added, and altered tables, columns, keys,
//! and indexes, plus a minimal seed-data diff.
//!
//! The parser is heuristic, not grammatical: it recovers structure from the
//! text conventions of MySQL dumps (statement terminators, backtick quoting,
//! uppercase keyword prefixes) and silently ignores anything it does not
//! recognize. Nothing here connects to a live database; the whole pipeline
//! is a pure text-to-model-to-text transformation.

pub mod error;
pub mod schema;
pub mod utils;


use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// Re-export main types for easier access
pub use error::{Error, Result};
pub use schema::generator::upgrade_sql;
pub use schema::parser::{parse, parse_str};
pub use schema::types::{Database, Field, Index, PrimaryKey, Table, UniqueKey};

/// Parse two schema dump files and generate the migration script between them
pub fn diff_files(origin_path: &Path, target_path: &Path) -> Result<String> {
    let origin = parse(BufReader::new(File::open(origin_path)?))?;
    let target = parse(BufReader::new(File::open(target_path)?))?;
    Ok(upgrade_sql(&origin, &target))
}
