//! Awesome-ORM: a small object-relational mapping layer over SQLite.
//!
//! Model types implement [`Model`] by declaring their fields. The first time
//! a model is used its declaration is scanned, the primary key is inferred,
//! and `select`/`insert`/`update`/`delete` templates are synthesized and
//! cached. Record operations run those templates through r2d2-pooled
//! rusqlite connections.
//!
//! # Modules
//!
//! - `value` - Dynamically typed cell values
//! - `record` - Result rows
//! - `field` - Field descriptors
//! - `meta` - Model metadata and SQL template synthesis
//! - `registry` - Per-type metadata cache
//! - `pool` - Connection pool management
//! - `executor` - Statement execution with SQL logging
//! - `model` - The `Model` trait and record operations
//!
//! # Example
//!
//! ```no_run
//! use awesome_orm::pool::{create_pool, get_conn, PoolConfig};
//! use awesome_orm::{Field, Model, Record, Value};
//! use awesome_common::Result;
//!
//! struct Tag {
//!     id: Option<i64>,
//!     name: String,
//! }
//!
//! impl Model for Tag {
//!     const NAME: &'static str = "tags";
//!
//!     fn fields() -> Vec<(&'static str, Field)> {
//!         vec![
//!             ("id", Field::integer().primary_key()),
//!             ("name", Field::string()),
//!         ]
//!     }
//!
//!     fn get(&self, attr: &str) -> Value {
//!         match attr {
//!             "id" => self.id.into(),
//!             "name" => self.name.clone().into(),
//!             _ => Value::Null,
//!         }
//!     }
//!
//!     fn set(&mut self, attr: &str, value: Value) -> Result<()> {
//!         if attr == "id" {
//!             self.id = awesome_orm::FromValue::from_value(&value)?;
//!         }
//!         Ok(())
//!     }
//!
//!     fn from_record(record: &Record) -> Result<Self> {
//!         Ok(Tag { id: record.value("id")?, name: record.value("name")? })
//!     }
//! }
//!
//! let pool = create_pool(&PoolConfig::default()).unwrap();
//! let conn = get_conn(&pool).unwrap();
//! Tag::create_table(&conn).unwrap();
//! Tag { id: Some(1), name: "rust".into() }.save(&conn).unwrap();
//! let tag = Tag::find(&conn, 1_i64).unwrap();
//! ```

pub mod executor;
pub mod field;
pub mod meta;
pub mod model;
pub mod pool;
pub mod record;
pub mod registry;
pub mod value;

pub use field::{Field, FieldDefault, FieldKind};
pub use meta::ModelMeta;
pub use model::{FindOptions, Limit, Model};
pub use record::Record;
pub use value::{FromValue, Value};

pub use rusqlite::Connection;
