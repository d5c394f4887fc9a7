pub mod comment;
pub mod post;
pub mod tag;
pub mod user;

pub use comment::Comment;
pub use post::Post;
pub use tag::Tag;
pub use user::User;

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp the way every table stores it: RFC 3339, UTC, whole
/// seconds, `Z` suffix. Lexical order of these strings is chronological.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
