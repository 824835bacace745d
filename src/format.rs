//! Line format contract shared with the SQL logging formatter
//!
//! The formatter on the system-under-test side writes each executed
//! statement as one stdout line starting with [`SQL_LINE_PREFIX`]. The
//! capture side classifies lines by that exact prefix; everything after it
//! is the statement, passed through verbatim.

/// Prefix marking a captured output line as an encoded SQL statement.
pub const SQL_LINE_PREFIX: &str = "SQLTAP_SQL: ";

/// Render a statement as a tagged line (without a trailing newline), the
/// inverse of classification.
pub fn tag_statement(sql: &str) -> String {
    format!("{SQL_LINE_PREFIX}{sql}")
}
