//! INSERT logic for MongoDB.

use crate::error::MongoDBLoaderError;
use bson::{doc, Document};
use mongodb::Collection;
use mongodb_types::{document_to_record, record_to_document};
use seed_core::Record;

/// Insert one record as one document.
pub async fn insert_document(
    collection: &Collection<Document>,
    record: &Record,
) -> Result<u64, MongoDBLoaderError> {
    let doc = record_to_document(record)?;
    collection.insert_one(doc).await?;
    Ok(1)
}

/// Insert records with a single `insert_many`.
pub async fn insert_documents(
    collection: &Collection<Document>,
    records: &[Record],
) -> Result<u64, MongoDBLoaderError> {
    if records.is_empty() {
        return Ok(0);
    }

    let documents = records_to_documents(records)?;
    let result = collection.insert_many(documents).await?;

    Ok(result.inserted_ids.len() as u64)
}

/// Convert every record before any I/O so a bad record fails the whole batch.
pub(crate) fn records_to_documents(records: &[Record]) -> Result<Vec<Document>, MongoDBLoaderError> {
    records
        .iter()
        .map(|record| record_to_document(record).map_err(MongoDBLoaderError::from))
        .collect()
}

/// Drop a collection if it exists.
pub async fn drop_collection(collection: &Collection<Document>) -> Result<(), MongoDBLoaderError> {
    collection.drop().await?;
    Ok(())
}

/// Get the document count for a collection.
pub async fn count_documents(collection: &Collection<Document>) -> Result<u64, MongoDBLoaderError> {
    let count = collection.count_documents(doc! {}).await?;
    Ok(count)
}

/// Read every document back in natural order, without the store-assigned `_id`.
pub async fn find_all(collection: &Collection<Document>) -> Result<Vec<Record>, MongoDBLoaderError> {
    let mut cursor = collection
        .find(doc! {})
        .projection(doc! { "_id": 0 })
        .await?;

    let mut records = Vec::new();
    while cursor.advance().await? {
        let doc = cursor.deserialize_current()?;
        records.push(document_to_record(&doc));
    }
    Ok(records)
}
