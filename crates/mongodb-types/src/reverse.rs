//! Reverse conversion: BSON document → Record.
//!
//! Used to read documents back for verification. The mapping is total:
//! BSON types without a counterpart in the value model are rendered as text.

use bson::{Bson, Document};
use seed_core::{Record, Value};

/// Convert a BSON document into a record, keeping field order.
pub fn document_to_record(doc: &Document) -> Record {
    doc.iter()
        .map(|(field, value)| (field.clone(), bson_to_value(value)))
        .collect()
}

/// Convert one BSON value.
pub fn bson_to_value(value: &Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(*b),
        Bson::Int32(i) => Value::Int(i64::from(*i)),
        Bson::Int64(i) => Value::Int(*i),
        Bson::Double(f) => Value::Float64(*f),
        Bson::String(s) | Bson::Symbol(s) => Value::Text(s.clone()),
        Bson::DateTime(dt) => Value::ZonedDateTime(dt.to_chrono()),
        Bson::Array(elements) => Value::Array(elements.iter().map(bson_to_value).collect()),
        Bson::Document(doc) => Value::Object(document_to_record(doc)),
        Bson::ObjectId(oid) => Value::Text(oid.to_hex()),
        Bson::Decimal128(d) => Value::Text(d.to_string()),
        other => Value::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::record_to_document;
    use bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
    use chrono::{TimeZone, Utc};
    use seed_core::ValueKind;

    #[test]
    fn test_scalars() {
        let record = document_to_record(&doc! {
            "i32": 42,
            "i64": 9_876_543_210_i64,
            "f": 0.5,
            "s": "text",
            "b": false,
            "n": Bson::Null,
        });
        assert_eq!(
            record,
            Record::new()
                .with("i32", 42)
                .with("i64", 9_876_543_210_i64)
                .with("f", 0.5_f64)
                .with("s", "text")
                .with("b", false)
                .with("n", Value::Null)
        );
    }

    #[test]
    fn test_object_id_as_hex() {
        let oid = ObjectId::new();
        let value = bson_to_value(&Bson::ObjectId(oid));
        assert_eq!(value, Value::Text(oid.to_hex()));
    }

    #[test]
    fn test_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let value = bson_to_value(&Bson::DateTime(BsonDateTime::from_chrono(dt)));
        assert_eq!(value, Value::ZonedDateTime(dt));
    }

    #[test]
    fn test_drift_set_round_trip() {
        for record in fixture_generator::build_drift_fixture_set() {
            let doc = record_to_document(&record).unwrap();
            assert_eq!(document_to_record(&doc), record);
        }
    }

    #[test]
    fn test_nested_kinds_preserved() {
        let record = document_to_record(&doc! {
            "name": { "key": "seven", "aliases": ["siete", "sept"] },
        });
        let name = record.get("name").unwrap();
        assert_eq!(name.kind(), ValueKind::Object);
        let aliases = name.as_object().unwrap().get("aliases").unwrap();
        assert_eq!(aliases.kind(), ValueKind::Array);
    }
}
