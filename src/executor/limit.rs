/// TOP/LIMIT truncation.
use crate::core::{QueryError, Record};

pub struct Limiter;

impl Limiter {
    /// Validates a plan's raw limit. The plan carries it signed so that a
    /// negative TOP/LIMIT is a structural error, not a silent empty result.
    pub fn validate(limit: Option<i64>) -> Result<Option<usize>, QueryError> {
        match limit {
            None => Ok(None),
            Some(n) if n >= 0 => Ok(Some(usize::try_from(n).unwrap_or(usize::MAX))),
            Some(n) => Err(QueryError::InvalidLimit(n)),
        }
    }

    /// Keeps the first `n` records (or all of them if fewer).
    pub fn apply(records: &mut Vec<Record>, n: usize) {
        records.truncate(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let mut r = Record::new();
                r.insert("i", Value::Number(i as f64));
                r
            })
            .collect()
    }

    #[test]
    fn test_validate_rejects_negative() {
        assert!(matches!(Limiter::validate(Some(-1)), Err(QueryError::InvalidLimit(-1))));
        assert_eq!(Limiter::validate(Some(0)).unwrap(), Some(0));
        assert_eq!(Limiter::validate(None).unwrap(), None);
    }

    #[test]
    fn test_apply_truncates() {
        let mut rs = records(5);
        Limiter::apply(&mut rs, 2);
        assert_eq!(rs.len(), 2);
        assert_eq!(rs[0].get("i"), Some(&Value::Number(0.0)));
    }

    #[test]
    fn test_apply_beyond_length_keeps_all() {
        let mut rs = records(3);
        Limiter::apply(&mut rs, 10);
        assert_eq!(rs.len(), 3);
    }

    #[test]
    fn test_apply_zero_empties() {
        let mut rs = records(3);
        Limiter::apply(&mut rs, 0);
        assert!(rs.is_empty());
    }
}
