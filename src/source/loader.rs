/// JSON document loading and record conversion.
///
/// Resolves a table name to its mapped files, evaluates each mapping's path
/// expression, and flattens the targeted array of objects into Records. Path
/// expressions are the dotted subset the mappings need: optional `$` root,
/// `.member` access, `[n]` index, `[*]` wildcard.
use super::mapping::{MappingStore, SourceLocation};
use crate::core::{QueryError, Record, Value};

pub struct SourceResolver<'a> {
    store: &'a MappingStore,
}

impl<'a> SourceResolver<'a> {
    #[must_use]
    pub const fn new(store: &'a MappingStore) -> Self {
        Self { store }
    }

    /// Reads every mapped location for `table` and concatenates their records.
    pub fn resolve(&self, table: &str) -> Result<Vec<Record>, QueryError> {
        let locations = self
            .store
            .locations(table)
            .ok_or_else(|| QueryError::TableNotMapped(table.to_string()))?;

        let mut records = Vec::new();
        for location in locations {
            records.extend(load_location(location)?);
        }
        Ok(records)
    }
}

fn load_location(location: &SourceLocation) -> Result<Vec<Record>, QueryError> {
    let file = std::fs::File::open(&location.file)?;
    let document: serde_json::Value = serde_json::from_reader(std::io::BufReader::new(file))?;
    let path = location.path.as_deref().unwrap_or("$");

    let bad_path = || QueryError::InvalidSourcePath {
        file: location.file.display().to_string(),
        path: path.to_string(),
    };

    let targets = eval_path(&document, path).ok_or_else(bad_path)?;

    let mut records = Vec::new();
    for target in targets {
        match target {
            serde_json::Value::Array(items) => {
                for item in items {
                    records.push(object_to_record(item).ok_or_else(bad_path)?);
                }
            }
            // A lone object at the mapped path is taken as a single record
            serde_json::Value::Object(_) => {
                records.push(object_to_record(target).ok_or_else(bad_path)?);
            }
            _ => return Err(bad_path()),
        }
    }
    Ok(records)
}

/// Walks `path` through `root`, returning every matched node. `None` means
/// the expression was malformed or missed the document entirely.
fn eval_path<'v>(
    root: &'v serde_json::Value,
    path: &str,
) -> Option<Vec<&'v serde_json::Value>> {
    let trimmed = path.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);

    let mut cursor = vec![root];
    if trimmed.is_empty() {
        return Some(cursor);
    }

    for segment in trimmed.split('.') {
        let (member, indexes) = parse_segment(segment)?;

        if !member.is_empty() {
            cursor = cursor
                .into_iter()
                .map(|node| node.get(member))
                .collect::<Option<Vec<_>>>()?;
        }

        for index in indexes {
            let mut next = Vec::new();
            for node in cursor {
                let items = node.as_array()?;
                match index {
                    ArrayIndex::Wildcard => next.extend(items.iter()),
                    ArrayIndex::At(i) => next.push(items.get(i)?),
                }
            }
            cursor = next;
        }
    }
    Some(cursor)
}

enum ArrayIndex {
    Wildcard,
    At(usize),
}

// Splits `items[0][*]` into ("items", [At(0), Wildcard]).
fn parse_segment(segment: &str) -> Option<(&str, Vec<ArrayIndex>)> {
    let bracket = segment.find('[').unwrap_or(segment.len());
    let (member, mut rest) = segment.split_at(bracket);

    let mut indexes = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        let (token, tail) = inner.split_at(close);
        indexes.push(if token == "*" {
            ArrayIndex::Wildcard
        } else {
            ArrayIndex::At(token.parse().ok()?)
        });
        rest = tail.strip_prefix(']')?;
    }
    Some((member, indexes))
}

fn object_to_record(value: &serde_json::Value) -> Option<Record> {
    let object = value.as_object()?;
    let mut record = Record::new();
    for (key, field) in object {
        record.insert(key.clone(), json_to_value(field));
    }
    Some(record)
}

// Scalars map directly; nested structures are carried as their compact JSON
// text so every record stays a flat mapping.
fn json_to_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        serde_json::Value::String(s) => Value::Text(s.clone()),
        nested => Value::Text(nested.to_string()),
    }
}
