use std::collections::HashMap;

/// One CSV data row: field name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl Record {
    /// Value of `field`, or `None` if the row has no such field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Set `field` to `value`, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// An in-memory CSV file: the ordered header plus every row in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub fields: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            records: Vec::new(),
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Append `field` to the header unless it is already present.
    ///
    /// Returns `true` if the field was added. An existing field keeps its position.
    pub fn ensure_field(&mut self, field: &str) -> bool {
        if self.has_field(field) {
            return false;
        }
        self.fields.push(field.to_string());
        true
    }

    /// Values of `record` in header order; missing fields become empty strings.
    pub fn row_values<'a>(&'a self, record: &'a Record) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .map(move |f| record.get(f).unwrap_or_default())
    }
}
