//! Statement execution.
//!
//! [`select`] returns rows as [`Record`]s; [`execute`] runs writes and DDL and
//! returns the number of affected rows. Both log the SQL before running it.

use awesome_common::{Error, Result};
use rusqlite::{params_from_iter, Connection};

use crate::record::Record;
use crate::value::Value;

fn log_sql(sql: &str, args: &[Value]) {
    tracing::info!("SQL: {}", sql);
    if !args.is_empty() {
        tracing::debug!("args: {:?}", args);
    }
}

/// Run a query and collect up to `size` rows (all rows when `None`).
///
/// `Some(0)` yields no rows.
pub fn select(
    conn: &Connection,
    sql: &str,
    args: &[Value],
    size: Option<usize>,
) -> Result<Vec<Record>> {
    log_sql(sql, args);

    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| Error::database(format!("Failed to prepare query: {}", e)))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt
        .query(params_from_iter(args.iter()))
        .map_err(|e| Error::database(e.to_string()))?;

    let mut records = Vec::new();
    while size.map_or(true, |limit| records.len() < limit) {
        let Some(row) = rows.next().map_err(|e| Error::database(e.to_string()))? else {
            break;
        };
        let record = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| Ok((name.clone(), Value::from(row.get_ref(idx)?))))
            .collect::<rusqlite::Result<Record>>()
            .map_err(|e| Error::database(e.to_string()))?;
        records.push(record);
    }

    tracing::info!("rows returned: {}", records.len());
    Ok(records)
}

/// Run an `INSERT`, `UPDATE`, `DELETE` or DDL statement.
///
/// With `autocommit` off the statement runs in its own transaction, committed
/// on success and rolled back on failure.
pub fn execute(conn: &Connection, sql: &str, args: &[Value], autocommit: bool) -> Result<usize> {
    log_sql(sql, args);

    if autocommit {
        return conn
            .execute(sql, params_from_iter(args.iter()))
            .map_err(|e| Error::database(e.to_string()));
    }

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(format!("Failed to begin transaction: {}", e)))?;
    // Dropping `tx` without commit rolls back.
    let affected = tx
        .execute(sql, params_from_iter(args.iter()))
        .map_err(|e| Error::database(e.to_string()))?;
    tx.commit()
        .map_err(|e| Error::database(format!("Failed to commit: {}", e)))?;
    Ok(affected)
}
