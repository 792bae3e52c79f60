pub mod post;
pub mod user;

pub use post::Post;
pub use user::{FieldError, User, UserResponse, UsernamePasswordInput};

use chrono::{DateTime, Utc};

/// Timestamps cross the API as stringified epoch milliseconds
pub(crate) fn epoch_millis(ts: &DateTime<Utc>) -> String {
    ts.timestamp_millis().to_string()
}
