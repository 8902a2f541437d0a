//! Error types for the MongoDB loader.

use mongodb_types::BsonConversionError;
use thiserror::Error;

/// Errors that can occur while loading into MongoDB.
#[derive(Error, Debug)]
pub enum MongoDBLoaderError {
    /// MongoDB connection or query error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// Record could not be represented as BSON.
    #[error("Conversion error: {0}")]
    Conversion(#[from] BsonConversionError),
}
