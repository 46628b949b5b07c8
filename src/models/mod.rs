//! Application models.
//!
//! Each model is a plain struct mapped to a table through
//! [`awesome_orm::Model`]. Primary keys are [`next_id`] strings and
//! `created_at` holds seconds since the Unix epoch.

mod blog;
mod comment;
mod user;

pub use blog::Blog;
pub use comment::Comment;
pub use user::User;

use awesome_common::{next_id, Error, Result};
use awesome_orm::{registry, Connection, FromValue, Model, Value};
use chrono::Utc;

fn id_default() -> Value {
    Value::from(next_id())
}

fn now_default() -> Value {
    Value::Real(Utc::now().timestamp_millis() as f64 / 1000.0)
}

/// Convert `value` into the type of `slot` and store it.
fn assign<T: FromValue>(slot: &mut T, value: &Value) -> Result<()> {
    *slot = T::from_value(value)?;
    Ok(())
}

fn unknown_field(model: &str, attr: &str) -> Error {
    Error::invalid_input(format!("{} has no field `{}`", model, attr))
}

/// Build metadata for every model, failing on the first invalid declaration.
pub fn register_all() -> Result<()> {
    registry::register::<User>()?;
    registry::register::<Blog>()?;
    registry::register::<Comment>()?;
    Ok(())
}

/// Create the tables of every model that don't exist yet.
pub fn init_schema(conn: &Connection) -> Result<()> {
    User::create_table(conn)?;
    Blog::create_table(conn)?;
    Comment::create_table(conn)?;
    Ok(())
}
