// jsonsql - SQL-shaped queries over schema-less JSON files
//
// The executor is the heart of the crate: a one-shot, stateless pipeline that
// filters, joins, projects, sorts, and truncates record sequences. The parser
// and source modules feed it; the output module serializes what it produces.

// Clippy configuration - allow non-critical warnings
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::float_cmp)]
#![allow(clippy::multiple_crate_versions)]

// Core data structures (Value, Record, TableBinding, QueryError)
pub mod core;

// SQL-shaped query parser (SELECT/TOP/FROM/JOIN/WHERE/ORDER BY/LIMIT)
pub mod parser;

// Query executor (conditions, joins, projection, sort, limit)
pub mod executor;

// Source resolution (table mappings, JSON loading, path evaluation)
pub mod source;

// Output formatting (JSON array, terminal table)
pub mod output;

// Re-export commonly used types for convenience
pub use crate::core::{QueryError, Record, TableBinding, Value};
pub use crate::executor::QueryExecutor;
pub use crate::parser::{QueryPlan, parse_query};
pub use crate::source::{MappingStore, SourceResolver};

/// Parses `sql`, resolves every referenced table through `store`, and runs
/// the query, returning the final result set.
pub fn run_query(sql: &str, store: &MappingStore) -> Result<Vec<Record>, QueryError> {
    let plan = parse_query(sql)?;
    let resolver = SourceResolver::new(store);

    let mut bindings = Vec::with_capacity(1 + plan.joins.len());
    bindings.push(TableBinding::new(
        plan.from.alias.clone(),
        resolver.resolve(&plan.from.table)?,
    ));
    for join in &plan.joins {
        bindings.push(TableBinding::new(
            join.table.alias.clone(),
            resolver.resolve(&join.table.table)?,
        ));
    }

    QueryExecutor::execute(&plan, bindings)
}
