//! BSON to table conversion.

use mongodb::bson::{Bson, Document};
use uniguide_core::{Table, Value};

/// Turn fetched documents into a table. Columns are the union of document
/// keys in first-seen order.
pub fn documents_to_table(documents: Vec<Document>) -> Table {
    Table::from_records(documents.into_iter().map(|document| {
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_value(value)))
            .collect()
    }))
}

/// Map a BSON value onto the closest cell type. Arrays and embedded
/// documents stay structured; they flatten when rendered.
pub fn bson_to_value(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::Int(i64::from(i)),
        Bson::Int64(i) => Value::Int(i),
        Bson::Double(x) => Value::Float(x),
        Bson::String(s) => Value::Text(s),
        Bson::Array(items) => Value::List(items.into_iter().map(bson_to_value).collect()),
        Bson::Document(document) => Value::Map(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_value(value)))
                .collect(),
        ),
        Bson::ObjectId(oid) => Value::Text(oid.to_hex()),
        Bson::DateTime(dt) => Value::Text(
            dt.try_to_rfc3339_string()
                .unwrap_or_else(|_| dt.to_string()),
        ),
        other => Value::Text(other.to_string()),
    }
}
