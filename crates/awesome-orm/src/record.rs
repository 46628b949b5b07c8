//! Result rows returned by [`select`](crate::executor::select).

use awesome_common::{Error, Result};

use crate::value::{FromValue, Value};

/// One result row: column names paired with their values, in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Later lookups return the first column with a name.
    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.cells.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Read a column and convert it to `T`.
    pub fn value<T: FromValue>(&self, column: &str) -> Result<T> {
        let value = self
            .get(column)
            .ok_or_else(|| Error::invalid_input(format!("no column named `{}`", column)))?;
        T::from_value(value)
            .map_err(|e| Error::invalid_input(format!("column `{}`: {}", column, e)))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
