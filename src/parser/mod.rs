// Module declarations
mod common;
mod queries;
mod statement;

// Re-export all public plan types
pub use statement::{
    CompareOp, Condition, JoinKind, JoinSpec, Operand, OrderKey, QueryPlan, SelectItem, SortOrder,
    TableRef,
};

use crate::core::QueryError;

/// Parses one SQL-shaped query into a [`QueryPlan`].
pub fn parse_query(input: &str) -> Result<QueryPlan, QueryError> {
    let input = input.trim();
    let input = input.trim_end_matches(';');

    match queries::select(input) {
        Ok((remaining, plan)) => {
            if remaining.trim().is_empty() {
                Ok(plan)
            } else {
                Err(QueryError::Parse(format!(
                    "Unexpected input after query: {remaining}"
                )))
            }
        }
        Err(e) => Err(QueryError::Parse(format!("{e:?}"))),
    }
}
