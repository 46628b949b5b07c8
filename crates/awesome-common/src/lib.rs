//! Awesome-Common: Shared error types and utilities.
//!
//! This crate provides common functionality used across awesome:
//!
//! - **Error Handling**: Common error type and result alias
//! - **Ids**: Time-ordered string ids for model primary keys
//!
//! # Examples
//!
//! ```
//! use awesome_common::{next_id, Error, Result};
//!
//! let id = next_id();
//! assert_eq!(id.len(), 50);
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("blog"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::next_id;
