/// Condition evaluation for WHERE clauses and JOIN predicates.
///
/// Evaluation is total over schema-less records: a missing field reads as
/// Null, and the only comparisons that match Null are explicit null checks
/// (a literal NULL operand). Mismatched-type ordering comparisons degrade to
/// `false` here; only structural plan errors surface as `QueryError`.
use crate::core::{QueryError, Record, Value};
use crate::parser::{CompareOp, Condition, Operand};

pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Evaluate a condition tree against a record (simple or joined composite).
    pub fn evaluate(record: &Record, condition: &Condition) -> Result<bool, QueryError> {
        match condition {
            Condition::Compare { left, op, right } => Self::compare(record, left, *op, right),
            Condition::And(children) => {
                for child in children {
                    if !Self::evaluate(record, child)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Or(children) => {
                for child in children {
                    if Self::evaluate(record, child)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Condition::Not(child) => Ok(!Self::evaluate(record, child)?),
        }
    }

    fn compare(
        record: &Record,
        left: &Operand,
        op: CompareOp,
        right: &Operand,
    ) -> Result<bool, QueryError> {
        // Explicit null check: a literal NULL on either side tests the other
        // operand for null-ness.
        if let Operand::Literal(Value::Null) = right {
            return Self::null_check(record, left, op);
        }
        if let Operand::Literal(Value::Null) = left {
            return Self::null_check(record, right, op);
        }

        let left_value = Self::resolve(record, left)?;
        let right_value = Self::resolve(record, right)?;

        // Null from a missing field (or null document value) matches nothing.
        if left_value.is_null() || right_value.is_null() {
            return Ok(false);
        }

        Ok(match op {
            CompareOp::Eq => left_value == right_value,
            CompareOp::NotEq => left_value != right_value,
            CompareOp::Gt => Self::ordered(&left_value, &right_value)
                .is_some_and(|o| o == std::cmp::Ordering::Greater),
            CompareOp::Lt => Self::ordered(&left_value, &right_value)
                .is_some_and(|o| o == std::cmp::Ordering::Less),
            CompareOp::GtEq => Self::ordered(&left_value, &right_value)
                .is_some_and(|o| o != std::cmp::Ordering::Less),
            CompareOp::LtEq => Self::ordered(&left_value, &right_value)
                .is_some_and(|o| o != std::cmp::Ordering::Greater),
        })
    }

    fn null_check(record: &Record, operand: &Operand, op: CompareOp) -> Result<bool, QueryError> {
        let is_null = Self::resolve(record, operand)?.is_null();
        match op {
            CompareOp::Eq => Ok(is_null),
            CompareOp::NotEq => Ok(!is_null),
            // Ordering against NULL never matches.
            _ => Ok(false),
        }
    }

    fn resolve(record: &Record, operand: &Operand) -> Result<Value, QueryError> {
        match operand {
            Operand::Literal(value) => Ok(value.clone()),
            Operand::Field(name) => Ok(record.resolve(name)?.cloned().unwrap_or(Value::Null)),
        }
    }

    /// Type-aware ordering: None for mismatched or unordered operand types.
    fn ordered(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => x.partial_cmp(y),
            (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
            (Value::Boolean(x), Value::Boolean(y)) => Some(x.cmp(y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_record() -> Record {
        let mut r = Record::new();
        r.insert("name", Value::Text("Widget".to_string()));
        r.insert("price", Value::Number(19.99));
        r.insert("active", Value::Boolean(true));
        r
    }

    fn compare(left: &str, op: CompareOp, right: Value) -> Condition {
        Condition::Compare {
            left: Operand::Field(left.to_string()),
            op,
            right: Operand::Literal(right),
        }
    }

    #[test]
    fn test_equals() {
        let r = product_record();
        let cond = compare("name", CompareOp::Eq, Value::Text("Widget".to_string()));
        assert!(ConditionEvaluator::evaluate(&r, &cond).unwrap());

        let cond = compare("name", CompareOp::Eq, Value::Text("Gadget".to_string()));
        assert!(!ConditionEvaluator::evaluate(&r, &cond).unwrap());
    }

    #[test]
    fn test_ordering_operators() {
        let r = product_record();
        assert!(ConditionEvaluator::evaluate(&r, &compare("price", CompareOp::Gt, Value::Number(10.0))).unwrap());
        assert!(!ConditionEvaluator::evaluate(&r, &compare("price", CompareOp::Gt, Value::Number(20.0))).unwrap());
        assert!(ConditionEvaluator::evaluate(&r, &compare("price", CompareOp::Lt, Value::Number(20.0))).unwrap());
        assert!(ConditionEvaluator::evaluate(&r, &compare("price", CompareOp::GtEq, Value::Number(19.99))).unwrap());
        assert!(ConditionEvaluator::evaluate(&r, &compare("price", CompareOp::LtEq, Value::Number(19.99))).unwrap());
    }

    #[test]
    fn test_string_ordering_is_lexical() {
        let r = product_record();
        let cond = compare("name", CompareOp::Gt, Value::Text("Vidget".to_string()));
        assert!(ConditionEvaluator::evaluate(&r, &cond).unwrap());
    }

    #[test]
    fn test_boolean_ordering_false_before_true() {
        let r = product_record();
        let cond = compare("active", CompareOp::Gt, Value::Boolean(false));
        assert!(ConditionEvaluator::evaluate(&r, &cond).unwrap());
    }

    #[test]
    fn test_mismatched_types_never_equal() {
        let r = product_record();
        let eq = compare("price", CompareOp::Eq, Value::Text("19.99".to_string()));
        assert!(!ConditionEvaluator::evaluate(&r, &eq).unwrap());

        let neq = compare("price", CompareOp::NotEq, Value::Text("19.99".to_string()));
        assert!(ConditionEvaluator::evaluate(&r, &neq).unwrap());
    }

    #[test]
    fn test_mismatched_type_ordering_degrades_to_false() {
        let r = product_record();
        let cond = compare("price", CompareOp::Gt, Value::Text("abc".to_string()));
        assert!(!ConditionEvaluator::evaluate(&r, &cond).unwrap());
    }

    #[test]
    fn test_missing_field_matches_nothing() {
        let r = product_record();
        for op in [CompareOp::Eq, CompareOp::NotEq, CompareOp::Gt, CompareOp::Lt] {
            let cond = compare("missing", op, Value::Number(1.0));
            assert!(!ConditionEvaluator::evaluate(&r, &cond).unwrap());
        }
    }

    #[test]
    fn test_explicit_null_check() {
        let mut r = product_record();
        r.insert("discount", Value::Null);

        let is_null = compare("discount", CompareOp::Eq, Value::Null);
        assert!(ConditionEvaluator::evaluate(&r, &is_null).unwrap());

        // Missing fields read as Null too
        let missing_is_null = compare("missing", CompareOp::Eq, Value::Null);
        assert!(ConditionEvaluator::evaluate(&r, &missing_is_null).unwrap());

        let not_null = compare("name", CompareOp::NotEq, Value::Null);
        assert!(ConditionEvaluator::evaluate(&r, &not_null).unwrap());

        let name_is_null = compare("name", CompareOp::Eq, Value::Null);
        assert!(!ConditionEvaluator::evaluate(&r, &name_is_null).unwrap());
    }

    #[test]
    fn test_and_or_short_circuit() {
        let r = product_record();
        let t = compare("price", CompareOp::Gt, Value::Number(10.0));
        let f = compare("price", CompareOp::Gt, Value::Number(100.0));

        assert!(ConditionEvaluator::evaluate(&r, &Condition::And(vec![t.clone(), t.clone()])).unwrap());
        assert!(!ConditionEvaluator::evaluate(&r, &Condition::And(vec![t.clone(), f.clone()])).unwrap());
        assert!(ConditionEvaluator::evaluate(&r, &Condition::Or(vec![f.clone(), t.clone()])).unwrap());
        assert!(!ConditionEvaluator::evaluate(&r, &Condition::Or(vec![f.clone(), f.clone()])).unwrap());
    }

    #[test]
    fn test_not_is_involution() {
        let r = product_record();
        for cond in [
            compare("price", CompareOp::Gt, Value::Number(10.0)),
            compare("price", CompareOp::Gt, Value::Number(100.0)),
            compare("missing", CompareOp::Eq, Value::Number(1.0)),
        ] {
            let plain = ConditionEvaluator::evaluate(&r, &cond).unwrap();
            let negated =
                ConditionEvaluator::evaluate(&r, &Condition::Not(Box::new(cond))).unwrap();
            assert_eq!(plain, !negated);
        }
    }

    #[test]
    fn test_de_morgan_equivalence() {
        let r = product_record();
        let conds = [
            compare("price", CompareOp::Gt, Value::Number(10.0)),
            compare("price", CompareOp::Gt, Value::Number(100.0)),
            compare("name", CompareOp::Eq, Value::Text("Widget".to_string())),
        ];
        for a in &conds {
            for b in &conds {
                let not_and = Condition::Not(Box::new(Condition::And(vec![
                    a.clone(),
                    b.clone(),
                ])));
                let or_nots = Condition::Or(vec![
                    Condition::Not(Box::new(a.clone())),
                    Condition::Not(Box::new(b.clone())),
                ]);
                assert_eq!(
                    ConditionEvaluator::evaluate(&r, &not_and).unwrap(),
                    ConditionEvaluator::evaluate(&r, &or_nots).unwrap(),
                );
            }
        }
    }

    #[test]
    fn test_field_to_field_comparison() {
        let mut r = Record::new();
        r.insert("a", Value::Number(5.0));
        r.insert("b", Value::Number(3.0));
        let cond = Condition::Compare {
            left: Operand::Field("a".to_string()),
            op: CompareOp::Gt,
            right: Operand::Field("b".to_string()),
        };
        assert!(ConditionEvaluator::evaluate(&r, &cond).unwrap());
    }

    #[test]
    fn test_ambiguous_field_is_an_error() {
        let mut r = Record::new();
        r.insert("o.id", Value::Number(1.0));
        r.insert("p.id", Value::Number(1.0));
        let cond = compare("id", CompareOp::Eq, Value::Number(1.0));
        assert!(matches!(
            ConditionEvaluator::evaluate(&r, &cond),
            Err(QueryError::AmbiguousField(_))
        ));
    }
}
