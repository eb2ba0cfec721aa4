//! Utility functions for sql_diff

pub mod logging;
pub mod text;
