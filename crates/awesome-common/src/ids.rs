//! Primary key generation.
//!
//! Ids are fixed-width strings that sort by creation time: a zero-padded
//! millisecond timestamp, the hex digits of a random UUID, and a `000`
//! suffix.

use chrono::Utc;
use uuid::Uuid;

/// Generate a new 50-character id.
#[must_use]
pub fn next_id() -> String {
    let millis = Utc::now().timestamp_millis();
    format!("{:015}{}000", millis, Uuid::new_v4().simple())
}
