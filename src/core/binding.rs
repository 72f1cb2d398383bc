use super::record::Record;

/// A query alias paired with the record sequence resolved for it.
///
/// Bindings are built once per invocation, before the engine runs; if a table
/// is partitioned across several files the resolver has already concatenated
/// them into one flat sequence.
#[derive(Debug, Clone)]
pub struct TableBinding {
    pub alias: String,
    pub records: Vec<Record>,
}

impl TableBinding {
    #[must_use]
    pub fn new(alias: impl Into<String>, records: Vec<Record>) -> Self {
        Self { alias: alias.into(), records }
    }
}
