//! MongoDB loader.

use crate::error::MongoDBLoaderError;
use crate::insert::{count_documents, drop_collection, find_all, insert_document, insert_documents};
use bson::Document;
use mongodb::{Client, Collection, Database};
use seed_core::{Destination, Record};
use seed_load::RecordSink;
use tracing::{debug, info};

/// Loads records into collections of a MongoDB database.
pub struct MongoDBLoader {
    client: Client,
    database: Database,
}

impl MongoDBLoader {
    /// Connect and verify the connection.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - MongoDB connection string (e.g., "mongodb://localhost:27017")
    /// * `database_name` - Database used for unqualified destinations
    ///
    /// # Example
    ///
    /// ```ignore
    /// let loader = MongoDBLoader::new("mongodb://localhost:27017", "testdb").await?;
    /// ```
    pub async fn new(connection_string: &str, database_name: &str) -> Result<Self, MongoDBLoaderError> {
        let client = Client::with_uri_str(connection_string).await?;
        let database = client.database(database_name);

        // Test connection
        database.list_collection_names().await?;

        Ok(Self { client, database })
    }

    /// Create a loader from an existing client.
    pub fn with_client(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self { client, database }
    }

    /// Resolve a destination to a collection.
    ///
    /// A schema-qualified destination (`db.collection`) selects another
    /// database on the same client.
    pub fn collection(&self, destination: &Destination) -> Collection<Document> {
        match destination.schema() {
            Some(database) => self.client.database(database).collection(destination.name()),
            None => self.database.collection(destination.name()),
        }
    }

    /// Drop the collection if it exists.
    pub async fn drop_collection(&self, destination: &Destination) -> Result<(), MongoDBLoaderError> {
        info!("Dropping collection: {}", destination);
        drop_collection(&self.collection(destination)).await
    }

    /// Number of documents in the collection.
    pub async fn document_count(&self, destination: &Destination) -> Result<u64, MongoDBLoaderError> {
        count_documents(&self.collection(destination)).await
    }

    /// Read every document back as a record.
    pub async fn find_all(&self, destination: &Destination) -> Result<Vec<Record>, MongoDBLoaderError> {
        find_all(&self.collection(destination)).await
    }
}

#[async_trait::async_trait]
impl RecordSink for MongoDBLoader {
    async fn insert_one(&self, destination: &Destination, record: &Record) -> anyhow::Result<u64> {
        let inserted = insert_document(&self.collection(destination), record).await?;
        debug!("Inserted 1 document into {}", destination);
        Ok(inserted)
    }

    async fn insert_many(&self, destination: &Destination, records: &[Record]) -> anyhow::Result<u64> {
        let inserted = insert_documents(&self.collection(destination), records).await?;
        debug!("Inserted {} documents into {}", inserted, destination);
        Ok(inserted)
    }
}
