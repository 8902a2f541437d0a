//! The drift fixture set: same key, drifting shapes.

use seed_core::{Record, Value};

/// The field whose kind varies from record to record.
pub const DRIFT_FIELD: &str = "name";

/// Build records sharing an integer `id` (1..=7) with a drifting `name`.
///
/// `name` is, in order: a string, absent, a number, a list of strings, a
/// mixed list, an object of scalars and an object holding a list. Record 6
/// also carries `sub_id` as a string where the others use an integer.
pub fn build_drift_fixture_set() -> Vec<Record> {
    vec![
        Record::new()
            .with("id", 1)
            .with(DRIFT_FIELD, "one")
            .with("sub_id", 1),
        Record::new().with("id", 2).with("sub_id", 2),
        Record::new()
            .with("id", 3)
            .with(DRIFT_FIELD, 3)
            .with("sub_id", 3),
        Record::new()
            .with("id", 4)
            .with(
                DRIFT_FIELD,
                vec![Value::from("four"), Value::from("cuatro")],
            )
            .with("sub_id", 4),
        Record::new()
            .with("id", 5)
            .with(
                DRIFT_FIELD,
                vec![Value::from("five"), Value::from(5), Value::from(true)],
            )
            .with("sub_id", 5),
        Record::new()
            .with("id", 6)
            .with(DRIFT_FIELD, Record::new().with("key", "six"))
            .with("sub_id", "6"),
        Record::new()
            .with("id", 7)
            .with(
                DRIFT_FIELD,
                Record::new()
                    .with("key", "seven")
                    .with("aliases", vec![Value::from("siete"), Value::from("sept")]),
            )
            .with("sub_id", 7),
    ]
}
