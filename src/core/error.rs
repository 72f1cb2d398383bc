use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("No table is bound for alias '{0}'")]
    UnboundAlias(String),
    #[error("JOIN predicate must be a single 'left.field = right.field' equality: {0}")]
    UnsupportedJoinPredicate(String),
    #[error("Field '{0}' is ambiguous; qualify it with a table alias")]
    AmbiguousField(String),
    #[error("ORDER BY cannot compare {0} with {1}")]
    TypeMismatch(&'static str, &'static str),
    #[error("LIMIT must be a non-negative integer, got {0}")]
    InvalidLimit(i64),
    #[error("Table '{0}' is not mapped to any source file")]
    TableNotMapped(String),
    #[error("Mapped path '{path}' in '{file}' must target an array of objects")]
    InvalidSourcePath { file: String, path: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
