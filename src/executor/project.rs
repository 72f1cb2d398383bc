/// Column selection and aliasing.
use crate::core::{QueryError, Record, Value};
use crate::parser::SelectItem;

pub struct Projector;

impl Projector {
    /// Shapes one record per the select list.
    ///
    /// `*` passes every field through in encounter order, keeping whatever
    /// alias qualification earlier joins established. A named item emits
    /// under its output alias, or else under its bare trailing component
    /// (`p.name` becomes `name`). Absent fields project as Null, consistent
    /// with the WHERE missing-field policy.
    pub fn project(record: &Record, items: &[SelectItem]) -> Result<Record, QueryError> {
        let mut output = Record::new();
        for item in items {
            match item {
                SelectItem::Wildcard => {
                    for (key, value) in record.iter() {
                        output.insert(key, value.clone());
                    }
                }
                SelectItem::Field { field, output: out_alias } => {
                    let value = record.resolve(field)?.cloned().unwrap_or(Value::Null);
                    let key = out_alias.as_deref().unwrap_or_else(|| {
                        field.split_once('.').map_or(field.as_str(), |(_, trailing)| trailing)
                    });
                    output.insert(key, value);
                }
            }
        }
        Ok(output)
    }
}
