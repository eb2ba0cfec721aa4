//! Heuristic schema-dump parser
//!
//! This module recovers a structured [`Database`] model from loosely
//! formatted MySQL dump text. There is no grammar: statements are split on a
//! trailing `;`, classified by case-sensitive keyword prefix, and table
//! bodies are decomposed line by line through an ordered rule table.
//! Malformed input yields a wrong or missing entity, never an error; the
//! only failure that propagates is an I/O error from the line source.

use std::io::BufRead;

use crate::error::Result;
use crate::schema::types::{Database, Field, Index, PrimaryKey, Table, UniqueKey};
use crate::utils::text::{split_field_list, strip_backticks, strip_leading_keyword};

const COMMENT_PREFIXES: &[&str] = &["--", "/*", "*"];

const DATABASE_KEYWORDS: &[&str] = &["CREATE DATABASE IF NOT EXISTS", "CREATE DATABASE", "USE"];
const TABLE_KEYWORDS: &[&str] = &["CREATE TABLE IF NOT EXISTS", "CREATE TABLE"];
const INSERT_KEYWORD: &str = "INSERT INTO";

/// Parse one schema dump from a buffered line source
pub fn parse<R: BufRead>(reader: R) -> Result<Database> {
    let mut state = ParseState::default();
    for line in reader.lines() {
        state.feed(&line?);
    }
    Ok(state.finish())
}

/// Parse one schema dump already held in memory
pub fn parse_str(sql: &str) -> Database {
    let mut state = ParseState::default();
    for line in sql.lines() {
        state.feed(line);
    }
    state.finish()
}

/// Accumulates statements during the left-to-right scan of the input
#[derive(Default)]
struct ParseState {
    database: Database,
    /// The not-yet-terminated statement being accumulated.
    fragment: String,
    /// Every kept input line, verbatim.
    origin_sql: String,
}

impl ParseState {
    /// Consume one raw input line
    fn feed(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if COMMENT_PREFIXES.iter().any(|p| line.starts_with(p)) {
            return;
        }
        self.fragment.push_str(line);
        self.fragment.push('\n');
        self.origin_sql.push_str(line);
        self.origin_sql.push('\n');
        if line.ends_with(';') {
            let fragment = std::mem::take(&mut self.fragment);
            self.classify_fragment(&fragment);
        }
    }

    /// Classify one complete statement by keyword prefix
    ///
    /// The checks are deliberately independent rather than an else-chain;
    /// an unrecognized statement simply falls through all of them and
    /// survives only in the verbatim full text.
    fn classify_fragment(&mut self, fragment: &str) {
        if DATABASE_KEYWORDS.iter().any(|k| fragment.starts_with(k)) {
            let name = parse_db_name(fragment);
            tracing::debug!(database = %name, "parsed database statement");
            self.database.name = Some(name);
        }
        if TABLE_KEYWORDS.iter().any(|k| fragment.starts_with(k)) {
            let table = parse_table(fragment);
            tracing::debug!(
                table = %table.name,
                fields = table.fields.len(),
                "parsed table statement"
            );
            self.database.add_table(table);
        }
        if fragment.starts_with(INSERT_KEYWORD) {
            self.database
                .fixtures
                .insert(fragment.trim_end().to_string());
        }
    }

    fn finish(mut self) -> Database {
        self.database.origin_sql = self.origin_sql;
        tracing::debug!(
            database = ?self.database.name,
            tables = self.database.tables.len(),
            fixtures = self.database.fixtures.len(),
            "finished parsing dump"
        );
        self.database
    }
}

fn parse_db_name(sql: &str) -> String {
    let rest = strip_leading_keyword(sql, DATABASE_KEYWORDS);
    strip_backticks(rest).replace(';', "").trim().to_string()
}

/// One classification rule for a table-body line
///
/// Rules are tested independently per line, in order; a line may fire more
/// than one rule (a key line containing COMMENT also produces a field).
type BodyRule = (fn(&str) -> bool, fn(&mut Table, &str));

const BODY_RULES: &[BodyRule] = &[
    (is_primary_key_line, apply_primary_key),
    (is_unique_key_line, apply_unique_key),
    (is_index_line, apply_index),
    (is_field_line, apply_field),
];

/// Decompose one CREATE TABLE statement into a [`Table`]
fn parse_table(sql: &str) -> Table {
    let open = sql.find('(');
    let close = sql.rfind(')');
    let (head, body) = match (open, close) {
        (Some(open), Some(close)) if open < close => (&sql[..open], &sql[open + 1..close]),
        _ => (sql, ""),
    };
    let name = parse_table_name(head);
    let mut table = Table::new(&name, sql.trim_end());
    for line in body.lines() {
        for (predicate, apply) in BODY_RULES {
            if predicate(line) {
                apply(&mut table, line);
            }
        }
    }
    table
}

fn parse_table_name(sql: &str) -> String {
    let rest = strip_leading_keyword(sql, TABLE_KEYWORDS);
    strip_backticks(rest).replace(';', "").trim().to_string()
}

fn is_primary_key_line(line: &str) -> bool {
    line.starts_with("PRIMARY KEY")
}

fn is_unique_key_line(line: &str) -> bool {
    line.starts_with("UNIQUE KEY")
}

fn is_index_line(line: &str) -> bool {
    line.starts_with("KEY")
}

fn is_field_line(line: &str) -> bool {
    line.contains("COMMENT")
}

fn apply_primary_key(table: &mut Table, line: &str) {
    if let Some((label, fields)) = parse_key_parts(line, "PRIMARY KEY") {
        // Composite keys keep only the first listed field.
        if let Some(field) = fields.into_iter().next().filter(|f| !f.is_empty()) {
            table.primary_key = Some(PrimaryKey { label, field });
        }
    }
}

fn apply_unique_key(table: &mut Table, line: &str) {
    if let Some((name, fields)) = parse_key_parts(line, "UNIQUE KEY") {
        table.add_unique_key(UniqueKey { name, fields });
    }
}

fn apply_index(table: &mut Table, line: &str) {
    if let Some((name, fields)) = parse_key_parts(line, "KEY") {
        table.add_index(Index { name, fields });
    }
}

fn apply_field(table: &mut Table, line: &str) {
    if let Some(field) = parse_field(line) {
        table.add_field(field);
    }
}

/// Extract the name and field list of a key declaration
///
/// Shape: `KEYWORD name (field, field, ...)` where the name may be empty
/// (primary keys) and the fields may be backtick-quoted.
fn parse_key_parts(line: &str, keyword: &str) -> Option<(String, Vec<String>)> {
    let rest = line.strip_prefix(keyword)?.trim();
    let open = rest.find('(')?;
    let close = rest.find(')')?;
    if close < open {
        return None;
    }
    let name = strip_backticks(&rest[..open]).trim().to_string();
    let fields = split_field_list(&rest[open + 1..close]);
    Some((name, fields))
}

/// Extract a column declaration
///
/// The name is the text between the first pair of backticks, the type is
/// the first whitespace-delimited token after it, and everything left on
/// the line (trailing comma and comment included) is kept verbatim as the
/// extra clause.
fn parse_field(line: &str) -> Option<Field> {
    let start = line.find('`')?;
    let end = start + 1 + line[start + 1..].find('`')?;
    let name = &line[start + 1..end];
    let rest = line[end + 1..].trim();
    let (field_type, extra) = match rest.split_once(' ') {
        Some((field_type, extra)) => (field_type, extra.trim()),
        None => (rest, ""),
    };
    Some(Field::new(name, field_type, extra))
}
