/// Equality joins between two record streams.
///
/// Classic build-then-probe hash join: the right-hand sequence is indexed by
/// its join-key value, then each left record probes the index. Join order is
/// never reoptimized; multi-way joins run left-to-right in clause order.
use crate::core::{QueryError, Record, Value};
use crate::parser::{CompareOp, Condition, JoinKind, JoinSpec, Operand};
use std::collections::HashMap;

pub struct JoinEngine;

/// Hashable form of a join-key Value. Null and NaN keys are unrepresentable
/// on purpose: per type-aware equality they can never match anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum JoinKey {
    Text(String),
    Number(u64),
    Boolean(bool),
}

fn join_key(value: &Value) -> Option<JoinKey> {
    match value {
        Value::Null => None,
        Value::Boolean(b) => Some(JoinKey::Boolean(*b)),
        Value::Number(n) if n.is_nan() => None,
        // Collapse -0.0 and 0.0 onto one bit pattern
        Value::Number(n) => Some(JoinKey::Number(if *n == 0.0 { 0.0f64 } else { *n }.to_bits())),
        Value::Text(s) => Some(JoinKey::Text(s.clone())),
    }
}

impl JoinEngine {
    /// Validates the ON condition and splits it into the probe-side and
    /// build-side field references.
    ///
    /// The predicate must be a single `a.field = b.field` equality where one
    /// qualifier is the joined table's alias and the other is an alias already
    /// in scope (the FROM table or an earlier join).
    pub fn predicate_fields(
        spec: &JoinSpec,
        scope: &[String],
    ) -> Result<(String, String), QueryError> {
        let Condition::Compare {
            left: Operand::Field(a),
            op: CompareOp::Eq,
            right: Operand::Field(b),
        } = &spec.on
        else {
            return Err(QueryError::UnsupportedJoinPredicate(format!("{:?}", spec.on)));
        };

        let qualifier = |field: &str| -> Result<String, QueryError> {
            field.split_once('.').map(|(q, _)| q.to_string()).ok_or_else(|| {
                QueryError::UnsupportedJoinPredicate(format!(
                    "join field '{field}' must be alias-qualified"
                ))
            })
        };

        let (qual_a, qual_b) = (qualifier(a)?, qualifier(b)?);
        let joined = &spec.table.alias;

        let (probe_field, probe_qual, build_field) = if qual_b == *joined {
            (a.clone(), qual_a, b.clone())
        } else if qual_a == *joined {
            (b.clone(), qual_b, a.clone())
        } else {
            return Err(QueryError::UnboundAlias(format!("{qual_a}' or '{qual_b}")));
        };

        if !scope.iter().any(|alias| *alias == probe_qual) {
            return Err(QueryError::UnboundAlias(probe_qual));
        }

        Ok((probe_field, build_field))
    }

    /// Joins two already alias-qualified record streams.
    ///
    /// INNER drops unmatched left records; LEFT emits them once with every
    /// right-side field set to Null.
    pub fn join(
        left: Vec<Record>,
        right: &[Record],
        spec: &JoinSpec,
        probe_field: &str,
        build_field: &str,
    ) -> Result<Vec<Record>, QueryError> {
        // Build phase: index the right side by join-key value.
        let mut index: HashMap<JoinKey, Vec<usize>> = HashMap::new();
        for (i, record) in right.iter().enumerate() {
            if let Some(value) = record.resolve(build_field)? {
                if let Some(key) = join_key(value) {
                    index.entry(key).or_default().push(i);
                }
            }
        }

        // Null-fill shape for LEFT joins: union of right-side field names in
        // encounter order.
        let mut right_fields: Vec<String> = Vec::new();
        if spec.kind == JoinKind::Left {
            for record in right {
                for key in record.keys() {
                    if !right_fields.iter().any(|k| k == key) {
                        right_fields.push(key.to_string());
                    }
                }
            }
        }

        // Probe phase.
        let mut output = Vec::new();
        for record in left {
            let matches = record
                .resolve(probe_field)?
                .and_then(join_key)
                .and_then(|key| index.get(&key));

            match matches {
                Some(indices) => {
                    for &i in indices {
                        output.push(Self::composite(&record, right[i].iter()));
                    }
                }
                None => {
                    if spec.kind == JoinKind::Left {
                        let nulls = right_fields.iter().map(|k| (k.as_str(), &Value::Null));
                        output.push(Self::composite(&record, nulls));
                    }
                }
            }
        }

        Ok(output)
    }

    fn composite<'a>(
        left: &Record,
        right_fields: impl Iterator<Item = (&'a str, &'a Value)>,
    ) -> Record {
        let mut merged = Record::new();
        for (key, value) in left.iter() {
            merged.insert(key, value.clone());
        }
        for (key, value) in right_fields {
            merged.insert(key, value.clone());
        }
        merged
    }
}
