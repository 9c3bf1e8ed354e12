//! Response-envelope normalization for block payloads.
//!
//! DESIGN
//! ======
//! The backing service wraps block results inconsistently: sometimes the bare
//! record, sometimes `{"data": …}`, sometimes `{"block": …}`. Normalization
//! is an ordered list of extraction strategies; the first candidate that
//! parses into a block with a usable id wins. No candidate parsing means the
//! operation failed, even when the transport reported success; that guard is
//! what keeps invalid records out of the block store.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde_json::Value;

use crate::net::types::{Block, Position};

/// Envelope keys tried, in order, after the bare payload itself.
const WRAPPER_KEYS: [&str; 2] = ["data", "block"];

/// Extract one canonical block from a heterogeneous response payload.
///
/// Strategies, in order: the payload itself, then `payload.data`, then
/// `payload.block`. Each candidate must deserialize into a [`Block`] carrying
/// a non-empty id; everything else yields `None`.
#[must_use]
pub fn normalize_block_response(payload: &Value) -> Option<Block> {
    candidates(payload).find_map(parse_block_record)
}

fn candidates(payload: &Value) -> impl Iterator<Item = &Value> {
    std::iter::once(payload).chain(WRAPPER_KEYS.iter().filter_map(|key| payload.get(key)))
}

/// Parse a single candidate value into a validated block record.
///
/// Returns `None` for non-objects, unknown kinds, and records whose id is
/// missing or blank.
#[must_use]
pub fn parse_block_record(value: &Value) -> Option<Block> {
    let block: Block = serde_json::from_value(value.clone()).ok()?;
    block.has_valid_id().then_some(block)
}

/// Parse an initial board load into the set of renderable blocks.
///
/// A payload that is not an array collapses to the empty set; malformed rows
/// are dropped individually so one bad record cannot empty the board.
#[must_use]
pub fn parse_block_list(values: &[Value]) -> Vec<Block> {
    values.iter().filter_map(parse_block_record).collect()
}

/// Read a `{"x": …, "y": …}` position object, defaulting missing or
/// non-numeric coordinates to 0 per the partial-update contract.
#[must_use]
pub fn parse_position(value: &Value) -> Position {
    Position {
        x: value.get("x").and_then(Value::as_f64).unwrap_or(0.0),
        y: value.get("y").and_then(Value::as_f64).unwrap_or(0.0),
    }
}

/// First string value found under any of the given keys.
#[must_use]
pub fn pick_str<'a>(data: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| data.get(key).and_then(Value::as_str))
}

/// First string value found under any of the given keys, in a readable
/// error payload. Used to surface validation messages verbatim.
#[must_use]
pub fn error_message(data: &Value) -> Option<&str> {
    pick_str(data, &["message", "error"])
}
