//! The [`Model`] trait and the record operations every model gets.
//!
//! A model type declares its fields once in [`Model::fields`]. The ORM turns
//! that declaration into a cached [`ModelMeta`] and uses its templates for
//! [`find`](Model::find), [`find_all`](Model::find_all),
//! [`find_number`](Model::find_number), [`save`](Model::save),
//! [`update`](Model::update) and [`remove`](Model::remove).

use std::sync::Arc;

use awesome_common::{Error, Result};
use rusqlite::Connection;

use crate::executor::{execute, select};
use crate::field::Field;
use crate::meta::ModelMeta;
use crate::record::Record;
use crate::registry;
use crate::value::Value;

/// Row limit for [`Model::find_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// `limit ?`
    Count(u32),
    /// `limit ?, ?` with offset then count.
    Range(u32, u32),
}

/// Optional clauses appended to the select template by [`Model::find_all`].
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub where_clause: Option<String>,
    pub args: Vec<Value>,
    pub order_by: Option<String>,
    pub limit: Option<Limit>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `where` clause with its bound arguments.
    pub fn filter(mut self, clause: impl Into<String>, args: Vec<Value>) -> Self {
        self.where_clause = Some(clause.into());
        self.args = args;
        self
    }

    pub fn order_by(mut self, clause: impl Into<String>) -> Self {
        self.order_by = Some(clause.into());
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Append the clauses to `base`, returning the SQL and its arguments.
    ///
    /// Limit values are bound after the caller's arguments.
    pub fn render(&self, base: &str) -> (String, Vec<Value>) {
        let mut sql = base.to_string();
        let mut args = self.args.clone();

        if let Some(clause) = &self.where_clause {
            sql.push_str(" where ");
            sql.push_str(clause);
        }
        if let Some(order) = &self.order_by {
            sql.push_str(" order by ");
            sql.push_str(order);
        }
        match self.limit {
            Some(Limit::Count(count)) => {
                sql.push_str(" limit ?");
                args.push(Value::from(count));
            }
            Some(Limit::Range(offset, count)) => {
                sql.push_str(" limit ?, ?");
                args.push(Value::from(offset));
                args.push(Value::from(count));
            }
            None => {}
        }
        (sql, args)
    }
}

fn warn_unless_single(action: &str, rows: usize) {
    if rows != 1 {
        tracing::warn!("failed to {} record: affected rows: {}", action, rows);
    }
}

/// A type mapped to a table.
///
/// Implementors describe their fields and how to read and write attribute
/// values; the record operations are provided.
pub trait Model: Sized + 'static {
    /// Model name, also the table name unless [`Model::table`] says otherwise.
    const NAME: &'static str;

    fn table() -> Option<&'static str> {
        None
    }

    /// Declared attributes, in order, with their field descriptors.
    fn fields() -> Vec<(&'static str, Field)>;

    /// Current value of `attr`; `Value::Null` when unset.
    fn get(&self, attr: &str) -> Value;

    fn set(&mut self, attr: &str, value: Value) -> Result<()>;

    /// Build an instance from a row keyed by attribute name.
    fn from_record(record: &Record) -> Result<Self>;

    fn meta() -> Result<Arc<ModelMeta>> {
        registry::meta::<Self>()
    }

    /// Current value of `attr`, or its field default when unset.
    ///
    /// A computed default is stored back into the instance.
    fn get_value_or_default(&mut self, attr: &str) -> Result<Value> {
        let value = self.get(attr);
        if !value.is_null() {
            return Ok(value);
        }

        let meta = Self::meta()?;
        let field = meta.field(attr).ok_or_else(|| {
            Error::invalid_input(format!("{} has no field `{}`", Self::NAME, attr))
        })?;
        match field.default_value() {
            Some(default) => {
                let value = default.resolve();
                tracing::debug!("using default value for {}: {}", attr, value);
                self.set(attr, value.clone())?;
                Ok(value)
            }
            None => Ok(Value::Null),
        }
    }

    /// Find a record by primary key.
    fn find<K: Into<Value>>(conn: &Connection, pk: K) -> Result<Option<Self>> {
        let meta = Self::meta()?;
        let sql = format!(
            "{} where `{}`=?",
            meta.select_sql(),
            meta.column(meta.primary_key())
        );
        let records = select(conn, &sql, &[pk.into()], Some(1))?;
        records.first().map(Self::from_record).transpose()
    }

    /// Find records matching `options`.
    fn find_all(conn: &Connection, options: &FindOptions) -> Result<Vec<Self>> {
        let meta = Self::meta()?;
        let (sql, args) = options.render(meta.select_sql());
        select(conn, &sql, &args, None)?
            .iter()
            .map(Self::from_record)
            .collect()
    }

    /// Evaluate an aggregate such as `count(id)` over the table.
    ///
    /// Returns `None` when the query produces no row.
    fn find_number(
        conn: &Connection,
        select_field: &str,
        where_clause: Option<&str>,
        args: &[Value],
    ) -> Result<Option<Value>> {
        let meta = Self::meta()?;
        let mut sql = format!("select {} _num_ from `{}`", select_field, meta.table());
        if let Some(clause) = where_clause {
            sql.push_str(" where ");
            sql.push_str(clause);
        }
        let records = select(conn, &sql, args, Some(1))?;
        Ok(records.first().and_then(|r| r.get("_num_").cloned()))
    }

    /// Insert this instance, filling unset attributes from field defaults.
    fn save(&mut self, conn: &Connection) -> Result<()> {
        let meta = Self::meta()?;
        let mut args = Vec::with_capacity(meta.fields().len() + 1);
        for attr in meta.fields() {
            args.push(self.get_value_or_default(attr)?);
        }
        args.push(self.get_value_or_default(meta.primary_key())?);

        let rows = execute(conn, meta.insert_sql(), &args, true)?;
        warn_unless_single("insert", rows);
        Ok(())
    }

    /// Write the current attribute values to the row with this primary key.
    fn update(&self, conn: &Connection) -> Result<()> {
        let meta = Self::meta()?;
        if meta.fields().is_empty() {
            return Err(Error::invalid_input(format!(
                "{} has no columns to update",
                Self::NAME
            )));
        }
        let mut args: Vec<Value> = meta.fields().iter().map(|attr| self.get(attr)).collect();
        args.push(self.get(meta.primary_key()));

        let rows = execute(conn, meta.update_sql(), &args, true)?;
        warn_unless_single("update by primary key", rows);
        Ok(())
    }

    /// Delete the row with this primary key.
    fn remove(&self, conn: &Connection) -> Result<()> {
        let meta = Self::meta()?;
        let args = [self.get(meta.primary_key())];

        let rows = execute(conn, meta.delete_sql(), &args, true)?;
        warn_unless_single("remove by primary key", rows);
        Ok(())
    }

    /// Create the table if it doesn't exist yet.
    fn create_table(conn: &Connection) -> Result<()> {
        let meta = Self::meta()?;
        execute(conn, meta.create_table_sql(), &[], true)?;
        Ok(())
    }
}
