//! Mapping between cache entries and their stored documents.
//!
//! Layout of the `_watched-cache` collection:
//!
//! | field | content |
//! |-------|---------|
//! | `_id` | cache key |
//! | `c`   | payload |
//! | `ttl` | Int64 milliseconds, Double `+Infinity` for [`Ttl::Infinite`], absent when unset |
//! | `_w`  | write stamp, set on every write |
//! | `_d`  | expiry stamp, set only for [`Ttl::Infinite`]; the TTL index watches this field |

use std::time::Duration;

use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, DateTime as BsonDateTime, Document, doc};

use watched_core::{CacheEntry, CacheError, Ttl};

pub const COLLECTION_NAME: &str = "_watched-cache";
pub const PAYLOAD_FIELD: &str = "c";
pub const TTL_FIELD: &str = "ttl";
pub const EXPIRY_FIELD: &str = "_d";
pub const WRITTEN_FIELD: &str = "_w";

pub fn id_filter(key: &str) -> Document {
    doc! { "_id": key }
}

pub fn encode_ttl(ttl: Ttl) -> Bson {
    match ttl {
        Ttl::Finite(d) => Bson::Int64(i64::try_from(d.as_millis()).unwrap_or(i64::MAX)),
        Ttl::Infinite => Bson::Double(f64::INFINITY),
    }
}

/// Decode a stored ttl. Writers may have stored milliseconds as any numeric type.
pub fn decode_ttl(value: Option<&Bson>) -> Result<Option<Ttl>, CacheError> {
    let ttl = match value {
        None | Some(Bson::Null) | Some(Bson::Undefined) => return Ok(None),
        Some(Bson::Double(f)) if *f == f64::INFINITY => Ttl::Infinite,
        // Negative and NaN saturate to zero, which is always expired.
        Some(Bson::Double(f)) => Ttl::Finite(Duration::from_millis(*f as u64)),
        Some(Bson::Int32(i)) => Ttl::Finite(Duration::from_millis((*i).max(0) as u64)),
        Some(Bson::Int64(i)) => Ttl::Finite(Duration::from_millis((*i).max(0) as u64)),
        Some(other) => {
            return Err(CacheError::Serialization(format!(
                "unexpected ttl value: {other}"
            )));
        }
    };
    Ok(Some(ttl))
}

/// Build the `$set`/`$unset` update for an upsert.
///
/// Only infinite entries carry `_d`, so the store's TTL index never removes
/// finite-ttl entries.
pub fn upsert_update(payload: Bson, ttl: Option<Ttl>, now: BsonDateTime) -> Document {
    let mut set = Document::new();
    let mut unset = Document::new();

    set.insert(PAYLOAD_FIELD, payload);
    set.insert(WRITTEN_FIELD, now);

    match ttl {
        Some(ttl) => {
            set.insert(TTL_FIELD, encode_ttl(ttl));
        }
        None => {
            unset.insert(TTL_FIELD, "");
        }
    }

    if ttl.is_some_and(|t| t.is_infinite()) {
        set.insert(EXPIRY_FIELD, now);
    } else {
        unset.insert(EXPIRY_FIELD, "");
    }

    let mut update = doc! { "$set": set };
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

/// Milliseconds in `d`, saturating at `u64::MAX`.
pub fn saturating_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Convert a JSON payload to BSON field by field.
///
/// Objects become plain documents, so `$`-prefixed keys are stored as-is
/// rather than read as extended JSON. Integers above `i64::MAX` are stored
/// as doubles.
pub fn encode_payload(value: &serde_json::Value) -> Bson {
    use serde_json::Value;

    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Bson::Int64(i),
            (None, Some(f)) => Bson::Double(f),
            (None, None) => Bson::Null,
        },
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(encode_payload).collect()),
        Value::Object(map) => {
            let mut doc = Document::new();
            for (k, v) in map {
                doc.insert(k.clone(), encode_payload(v));
            }
            Bson::Document(doc)
        }
    }
}

/// Convert a stored payload back to JSON, mirroring [`encode_payload`].
///
/// BSON types JSON has no equivalent for (dates, object ids) fall back to
/// relaxed extended JSON.
pub fn decode_payload(value: Bson) -> serde_json::Value {
    use serde_json::{Map, Number, Value};

    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        Bson::String(s) => Value::String(s),
        Bson::Array(items) => Value::Array(items.into_iter().map(decode_payload).collect()),
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(k, v)| (k, decode_payload(v)))
                .collect::<Map<_, _>>(),
        ),
        other => other.into_relaxed_extjson(),
    }
}

fn to_chrono(dt: BsonDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(dt.timestamp_millis())
}

/// Decode a stored document into a cache entry.
///
/// The write stamp falls back to `_d` for documents written before `_w` existed.
pub fn decode_entry(doc: Document) -> Result<CacheEntry, CacheError> {
    let key = match doc.get("_id") {
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => return Err(CacheError::Serialization("document has no _id".to_string())),
    };

    let ttl = decode_ttl(doc.get(TTL_FIELD))?;

    let written_at = doc
        .get_datetime(WRITTEN_FIELD)
        .or_else(|_| doc.get_datetime(EXPIRY_FIELD))
        .ok()
        .and_then(|dt| to_chrono(*dt));

    let payload = doc
        .get(PAYLOAD_FIELD)
        .cloned()
        .map(decode_payload)
        .unwrap_or(serde_json::Value::Null);

    Ok(CacheEntry {
        key,
        payload,
        ttl,
        written_at,
    })
}
