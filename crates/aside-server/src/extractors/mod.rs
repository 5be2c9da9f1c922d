//! Request extractors for the user routes.

mod path;
mod payload;

pub use path::UserIdPath;
pub use payload::UserBody;
