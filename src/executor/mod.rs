/// Executor module - the query execution pipeline
///
/// Structure:
/// - conditions: WHERE clause and JOIN predicate evaluation
/// - join: hash-join engine (INNER, LEFT)
/// - project: column selection and aliasing
/// - sort: multi-key ORDER BY
/// - limit: TOP/LIMIT validation and truncation
/// - queries: the pipeline orchestrator
pub mod conditions;
pub mod join;
pub mod limit;
pub mod project;
pub mod queries;
pub mod sort;

pub use conditions::ConditionEvaluator;
pub use join::JoinEngine;
pub use limit::Limiter;
pub use project::Projector;
pub use queries::QueryExecutor;
pub use sort::Sorter;
