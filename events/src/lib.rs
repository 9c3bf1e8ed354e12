//! Shared envelope model and protobuf codec for the realtime board channel.
//!
//! This crate owns the wire representation of block events. Payloads stay
//! flexible (`serde_json::Value`) while the envelope encodes over protobuf
//! for compact binary transport. Event names are plain strings on the wire;
//! [`BlockEvent`] gives the four block mutation kinds a typed handle on the
//! client side.

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event name announcing a newly created block; payload is the full block.
pub const BLOCK_CREATED: &str = "block-created";
/// Event name announcing an updated block; payload is the full block.
pub const BLOCK_UPDATED: &str = "block-updated";
/// Event name announcing a deleted block; payload is `{ "blockId": … }`.
pub const BLOCK_DELETED: &str = "block-deleted";
/// Event name announcing a moved block; payload is `{ "blockId", "position" }`.
pub const BLOCK_MOVED: &str = "block-moved";

/// Room subscription request, keyed by board id.
pub const ROOM_JOIN: &str = "room:join";
/// Room unsubscribe request, keyed by board id.
pub const ROOM_LEAVE: &str = "room:leave";
/// Server acknowledgement that a room join took effect.
pub const ROOM_JOINED: &str = "room:joined";

/// The four block mutation events carried by the channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockEvent {
    Created,
    Updated,
    Deleted,
    Moved,
}

impl BlockEvent {
    /// Wire name for this event kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => BLOCK_CREATED,
            Self::Updated => BLOCK_UPDATED,
            Self::Deleted => BLOCK_DELETED,
            Self::Moved => BLOCK_MOVED,
        }
    }

    /// Parse a wire event name into a block event kind.
    ///
    /// Returns `None` for room ops and anything else that is not one of the
    /// four block mutation events.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            BLOCK_CREATED => Some(Self::Created),
            BLOCK_UPDATED => Some(Self::Updated),
            BLOCK_DELETED => Some(Self::Deleted),
            BLOCK_MOVED => Some(Self::Moved),
            _ => None,
        }
    }
}

/// Error returned by [`decode_envelope`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as a protobuf `WireEnvelope`.
    #[error("failed to decode protobuf envelope: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The envelope carries no event name and cannot be dispatched.
    #[error("envelope is missing an event name")]
    MissingEvent,
}

/// A single message on the realtime channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Unique identifier for this envelope (UUID string).
    pub id: String,
    /// Milliseconds since the Unix epoch when the envelope was created.
    /// Clients send 0 and let the server stamp it.
    pub ts: i64,
    /// Board room this envelope is scoped to, if any (UUID string).
    pub board_id: Option<String>,
    /// Sender identifier (user ID or system label).
    pub from: Option<String>,
    /// Event name, e.g. `"block-created"` or `"room:join"`.
    pub event: String,
    /// Arbitrary JSON payload.
    pub data: Value,
}

/// Encode an envelope into protobuf bytes.
#[must_use]
pub fn encode_envelope(envelope: &Envelope) -> Vec<u8> {
    let wire = WireEnvelope {
        id: envelope.id.clone(),
        ts: envelope.ts,
        board_id: envelope.board_id.clone(),
        from: envelope.from.clone(),
        event: envelope.event.clone(),
        data: Some(json_to_proto(&envelope.data)),
    };

    let mut out = Vec::with_capacity(wire.encoded_len());
    // Encoding into a growable Vec cannot fail; prost only errors on a
    // fixed-size buffer that is too small.
    wire.encode(&mut out).unwrap_or_default();
    out
}

/// Decode protobuf bytes into an envelope.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed bytes and
/// [`CodecError::MissingEvent`] when the event name is empty.
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope, CodecError> {
    let wire = WireEnvelope::decode(bytes)?;
    if wire.event.is_empty() {
        return Err(CodecError::MissingEvent);
    }
    Ok(Envelope {
        id: wire.id,
        ts: wire.ts,
        board_id: wire.board_id,
        from: wire.from,
        event: wire.event,
        data: wire
            .data
            .map_or(Value::Object(Map::new()), |v| proto_to_json(&v)),
    })
}

fn json_to_proto(value: &Value) -> prost_types::Value {
    let kind = match value {
        Value::Null => {
            prost_types::value::Kind::NullValue(prost_types::NullValue::NullValue as i32)
        }
        Value::Bool(v) => prost_types::value::Kind::BoolValue(*v),
        Value::Number(v) => prost_types::value::Kind::NumberValue(v.as_f64().unwrap_or(0.0)),
        Value::String(v) => prost_types::value::Kind::StringValue(v.clone()),
        Value::Array(v) => prost_types::value::Kind::ListValue(prost_types::ListValue {
            values: v.iter().map(json_to_proto).collect(),
        }),
        Value::Object(v) => prost_types::value::Kind::StructValue(prost_types::Struct {
            fields: v.iter().map(|(k, v)| (k.clone(), json_to_proto(v))).collect(),
        }),
    };

    prost_types::Value { kind: Some(kind) }
}

fn proto_to_json(value: &prost_types::Value) -> Value {
    let Some(kind) = &value.kind else {
        return Value::Null;
    };

    match kind {
        prost_types::value::Kind::NullValue(_) => Value::Null,
        prost_types::value::Kind::NumberValue(v) => {
            serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number)
        }
        prost_types::value::Kind::StringValue(v) => Value::String(v.clone()),
        prost_types::value::Kind::BoolValue(v) => Value::Bool(*v),
        prost_types::value::Kind::StructValue(v) => Value::Object(
            v.fields
                .iter()
                .map(|(k, v)| (k.clone(), proto_to_json(v)))
                .collect(),
        ),
        prost_types::value::Kind::ListValue(v) => {
            Value::Array(v.values.iter().map(proto_to_json).collect())
        }
    }
}

#[derive(Clone, PartialEq, Message)]
struct WireEnvelope {
    #[prost(string, tag = "1")]
    id: String,
    #[prost(int64, tag = "2")]
    ts: i64,
    #[prost(string, optional, tag = "3")]
    board_id: Option<String>,
    #[prost(string, optional, tag = "4")]
    from: Option<String>,
    #[prost(string, tag = "5")]
    event: String,
    #[prost(message, optional, tag = "6")]
    data: Option<prost_types::Value>,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
