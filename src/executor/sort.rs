/// Multi-key ORDER BY with type-aware comparison.
use crate::core::{QueryError, Record, Value};
use crate::parser::{OrderKey, SortOrder};
use std::cmp::Ordering;

pub struct Sorter;

impl Sorter {
    /// Stable multi-key sort: ties on the first key fall through to the next.
    ///
    /// Null sorts before any non-null value regardless of direction; the
    /// direction flips only the non-null ordering. Two non-null values of
    /// different types under one key are a TypeMismatch error, checked up
    /// front so sorting never produces a silently wrong order.
    pub fn sort(records: &mut [Record], keys: &[OrderKey]) -> Result<(), QueryError> {
        if keys.is_empty() {
            return Ok(());
        }

        // Resolve every key once; resolution errors and mixed-type keys
        // surface before any reordering happens.
        let mut sort_keys: Vec<Vec<Value>> = Vec::with_capacity(records.len());
        for record in records.iter() {
            let mut row_keys = Vec::with_capacity(keys.len());
            for key in keys {
                row_keys.push(record.resolve(&key.field)?.cloned().unwrap_or(Value::Null));
            }
            sort_keys.push(row_keys);
        }

        for i in 0..keys.len() {
            let mut seen: Option<&Value> = None;
            for row_keys in &sort_keys {
                let value = &row_keys[i];
                if value.is_null() {
                    continue;
                }
                match seen {
                    None => seen = Some(value),
                    Some(prior) if prior.type_name() != value.type_name() => {
                        return Err(QueryError::TypeMismatch(
                            prior.type_name(),
                            value.type_name(),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by(|&a, &b| {
            for (i, key) in keys.iter().enumerate() {
                let ord = Self::compare(&sort_keys[a][i], &sort_keys[b][i], key.order);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });

        // Apply the permutation via one clone pass
        let reordered: Vec<Record> = order.iter().map(|&i| records[i].clone()).collect();
        for (slot, record) in records.iter_mut().zip(reordered) {
            *slot = record;
        }
        Ok(())
    }

    fn compare(a: &Value, b: &Value, order: SortOrder) -> Ordering {
        let ord = match (a, b) {
            (Value::Null, Value::Null) => return Ordering::Equal,
            (Value::Null, _) => return Ordering::Less,
            (_, Value::Null) => return Ordering::Greater,
            (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
            (Value::Text(x), Value::Text(y)) => x.cmp(y),
            (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
            // Mixed non-null types are rejected before sorting begins
            _ => Ordering::Equal,
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, price: f64, tag: f64) -> Record {
        let mut r = Record::new();
        r.insert("category", Value::Text(category.to_string()));
        r.insert("price", Value::Number(price));
        r.insert("tag", Value::Number(tag));
        r
    }

    fn key(field: &str, order: SortOrder) -> OrderKey {
        OrderKey { field: field.to_string(), order }
    }

    #[test]
    fn test_multi_key_sort() {
        let mut records = vec![record("B", 10.0, 0.0), record("A", 20.0, 1.0), record("A", 10.0, 2.0)];
        Sorter::sort(
            &mut records,
            &[key("category", SortOrder::Asc), key("price", SortOrder::Desc)],
        )
        .unwrap();
        let shape: Vec<(String, f64)> = records
            .iter()
            .map(|r| {
                let Some(Value::Text(c)) = r.get("category").cloned() else { panic!() };
                let Some(Value::Number(p)) = r.get("price").cloned() else { panic!() };
                (c, p)
            })
            .collect();
        assert_eq!(
            shape,
            vec![("A".to_string(), 20.0), ("A".to_string(), 10.0), ("B".to_string(), 10.0)]
        );
    }

    #[test]
    fn test_sort_is_stable() {
        // Equal keys keep their input order; `tag` records the input position
        let mut records = vec![
            record("A", 1.0, 0.0),
            record("A", 1.0, 1.0),
            record("A", 1.0, 2.0),
            record("B", 1.0, 3.0),
            record("A", 1.0, 4.0),
        ];
        Sorter::sort(&mut records, &[key("category", SortOrder::Asc)]).unwrap();
        let tags: Vec<f64> = records
            .iter()
            .filter(|r| r.get("category") == Some(&Value::Text("A".to_string())))
            .map(|r| match r.get("tag") {
                Some(Value::Number(n)) => *n,
                _ => panic!(),
            })
            .collect();
        assert_eq!(tags, vec![0.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_null_sorts_first_regardless_of_direction() {
        let mut with_null = Record::new();
        with_null.insert("price", Value::Null);
        let mut records = vec![record("A", 5.0, 0.0), with_null.clone(), record("A", 1.0, 1.0)];

        Sorter::sort(&mut records, &[key("price", SortOrder::Asc)]).unwrap();
        assert_eq!(records[0].get("price"), Some(&Value::Null));

        Sorter::sort(&mut records, &[key("price", SortOrder::Desc)]).unwrap();
        assert_eq!(records[0].get("price"), Some(&Value::Null));
        assert_eq!(records[1].get("price"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn test_missing_field_sorts_as_null() {
        let mut missing = Record::new();
        missing.insert("category", Value::Text("Z".to_string()));
        let mut records = vec![record("A", 5.0, 0.0), missing];
        Sorter::sort(&mut records, &[key("price", SortOrder::Asc)]).unwrap();
        assert_eq!(records[0].get("category"), Some(&Value::Text("Z".to_string())));
    }

    #[test]
    fn test_mixed_types_error() {
        let mut stringly = Record::new();
        stringly.insert("price", Value::Text("cheap".to_string()));
        let mut records = vec![record("A", 5.0, 0.0), stringly];
        assert!(matches!(
            Sorter::sort(&mut records, &[key("price", SortOrder::Asc)]),
            Err(QueryError::TypeMismatch(_, _))
        ));
    }

    #[test]
    fn test_empty_keys_leave_order_unchanged() {
        let mut records = vec![record("B", 1.0, 0.0), record("A", 2.0, 1.0)];
        Sorter::sort(&mut records, &[]).unwrap();
        assert_eq!(records[0].get("category"), Some(&Value::Text("B".to_string())));
    }
}
