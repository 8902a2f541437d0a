//! MongoDB loader for fixture-seed.
//!
//! Records are stored as documents in their original shape, so a field may
//! hold a string in one document and an embedded document in the next.

pub mod args;
pub mod error;
pub mod insert;
pub mod loader;

pub use args::{MongoDBConnectionArgs, DEFAULT_MONGODB_CONNECTION_STRING, DEFAULT_MONGODB_DATABASE};
pub use error::MongoDBLoaderError;
pub use loader::MongoDBLoader;
