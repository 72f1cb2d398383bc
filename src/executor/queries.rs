/// Query pipeline orchestration.
///
/// One-shot, stateless pass over the bound tables:
/// BindTables → ApplyJoins → ApplyWhere → ApplySelect → ApplyOrderBy →
/// ApplyLimit. Plan shape is validated up front so a structurally bad query
/// fails before any stage runs, with no partial output.
use super::conditions::ConditionEvaluator;
use super::join::JoinEngine;
use super::limit::Limiter;
use super::project::Projector;
use super::sort::Sorter;
use crate::core::{QueryError, Record, TableBinding};
use crate::parser::{QueryPlan, SelectItem};
use std::collections::HashMap;

pub struct QueryExecutor;

impl QueryExecutor {
    /// Executes a validated plan against the given table bindings and returns
    /// the final result set.
    pub fn execute(
        plan: &QueryPlan,
        bindings: Vec<TableBinding>,
    ) -> Result<Vec<Record>, QueryError> {
        let limit = Limiter::validate(plan.limit)?;
        Self::validate_field_refs(plan)?;

        let mut tables: HashMap<String, Vec<Record>> = bindings
            .into_iter()
            .map(|binding| (binding.alias, binding.records))
            .collect();

        // BindTables
        let base = tables
            .remove(&plan.from.alias)
            .ok_or_else(|| QueryError::UnboundAlias(plan.from.alias.clone()))?;
        let mut rows: Vec<Record> = base
            .into_iter()
            .map(|record| record.with_alias(&plan.from.alias))
            .collect();

        // ApplyJoins: pairwise, left-to-right, in clause order
        if !plan.joins.is_empty() {
            let mut scope = vec![plan.from.alias.clone()];
            rows = rows.into_iter().map(|r| r.qualified(&plan.from.alias)).collect();
            for join in &plan.joins {
                let (probe_field, build_field) = JoinEngine::predicate_fields(join, &scope)?;
                let right = tables
                    .remove(&join.table.alias)
                    .ok_or_else(|| QueryError::UnboundAlias(join.table.alias.clone()))?;
                let right: Vec<Record> = right
                    .into_iter()
                    .map(|r| r.qualified(&join.table.alias))
                    .collect();
                rows = JoinEngine::join(rows, &right, join, &probe_field, &build_field)?;
                scope.push(join.table.alias.clone());
            }
        }

        // ApplyWhere. Without an ORDER BY the limit may cut the scan short;
        // with one, the full filtered set must be materialized first.
        let early_stop = if plan.order_by.is_empty() { limit } else { None };
        if let Some(condition) = &plan.filter {
            let mut filtered = Vec::new();
            for record in rows {
                if ConditionEvaluator::evaluate(&record, condition)? {
                    filtered.push(record);
                    if early_stop.is_some_and(|n| filtered.len() >= n) {
                        break;
                    }
                }
            }
            rows = filtered;
        } else if let Some(n) = early_stop {
            Limiter::apply(&mut rows, n);
        }

        // ApplySelect. An empty select list behaves as a wildcard so plans
        // built programmatically need not spell `*` out.
        if !plan.select.is_empty() {
            rows = rows
                .iter()
                .map(|record| Projector::project(record, &plan.select))
                .collect::<Result<_, _>>()?;
        }

        // ApplyOrderBy
        Sorter::sort(&mut rows, &plan.order_by)?;

        // ApplyLimit
        if let Some(n) = limit {
            Limiter::apply(&mut rows, n);
        }

        Ok(rows)
    }

    // Every alias-qualified field in WHERE/SELECT/ORDER BY must reference the
    // FROM table or a joined table.
    fn validate_field_refs(plan: &QueryPlan) -> Result<(), QueryError> {
        let mut fields = Vec::new();
        if let Some(condition) = &plan.filter {
            condition.referenced_fields(&mut fields);
        }
        for item in &plan.select {
            if let SelectItem::Field { field, .. } = item {
                fields.push(field.clone());
            }
        }
        for key in &plan.order_by {
            fields.push(key.field.clone());
        }

        for name in fields {
            if let Some((qualifier, _)) = name.split_once('.') {
                let known = qualifier == plan.from.alias
                    || plan.joins.iter().any(|j| j.table.alias == qualifier);
                if !known {
                    return Err(QueryError::UnboundAlias(qualifier.to_string()));
                }
            }
        }
        Ok(())
    }
}
