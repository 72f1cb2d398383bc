use super::error::QueryError;
use super::value::Value;

/// One logical row: an ordered field-name-to-Value mapping.
///
/// Field keys are either bare (`name`) or alias-qualified (`o.name`, as
/// produced by joins). Keys are unique within a record; inserting an existing
/// key replaces its value in place. A record read directly from a source table
/// carries that table's alias so qualified references resolve against it.
#[derive(Debug, Clone, Default)]
pub struct Record {
    alias: Option<String>,
    fields: Vec<(String, Value)>,
}

impl Record {
    #[must_use]
    pub const fn new() -> Self {
        Self { alias: None, fields: Vec::new() }
    }

    /// Tags the record with the table alias it was read under.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Inserts a field, replacing the value if the key is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    /// Exact-key lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Resolves a field reference against this record.
    ///
    /// Resolution order: exact key; then, for `alias.field` where the alias is
    /// this record's own tag, the bare field; then, for a bare name, the
    /// trailing component of qualified keys. A bare name matching more than
    /// one qualified key is rejected rather than silently picking a side.
    /// `Ok(None)` means the field is absent and reads as Null.
    pub fn resolve(&self, name: &str) -> Result<Option<&Value>, QueryError> {
        if let Some(value) = self.get(name) {
            return Ok(Some(value));
        }
        if let Some((qualifier, field)) = name.split_once('.') {
            if self.alias.as_deref() == Some(qualifier) {
                return Ok(self.get(field));
            }
            return Ok(None);
        }
        let mut found = None;
        for (key, value) in &self.fields {
            if key.split_once('.').is_some_and(|(_, trailing)| trailing == name) {
                if found.is_some() {
                    return Err(QueryError::AmbiguousField(name.to_string()));
                }
                found = Some(value);
            }
        }
        Ok(found)
    }

    /// Returns a copy with every bare key prefixed by `alias.`.
    ///
    /// Keys that are already qualified (from an earlier join) are untouched.
    #[must_use]
    pub fn qualified(&self, alias: &str) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|(key, value)| {
                if key.contains('.') {
                    (key.clone(), value.clone())
                } else {
                    (format!("{alias}.{key}"), value.clone())
                }
            })
            .collect();
        Self { alias: None, fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
