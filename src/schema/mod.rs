//! Schema parsing, modeling, and migration generation

pub mod generator;
pub mod parser;
pub mod types;

pub use generator::upgrade_sql;
pub use parser::{parse, parse_str};
pub use types::Database;
