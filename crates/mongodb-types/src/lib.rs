//! MongoDB/BSON type conversions for fixture-seed records.
//!
//! Documents are stored in the shape of the source record: nested objects
//! become embedded documents and arrays stay arrays.
//!
//! # Modules
//!
//! - [`forward`] - Record → BSON document conversion
//! - [`reverse`] - BSON document → Record conversion
//!
//! # Example
//!
//! ```ignore
//! use mongodb_types::{document_to_record, record_to_document};
//! use seed_core::Record;
//!
//! let record = Record::new().with("id", 1).with("name", "one");
//! let doc = record_to_document(&record)?;
//! assert_eq!(document_to_record(&doc), record);
//! ```

pub mod forward;
pub mod reverse;

pub use forward::{record_to_document, value_to_bson, BsonConversionError};
pub use reverse::{bson_to_value, document_to_record};
