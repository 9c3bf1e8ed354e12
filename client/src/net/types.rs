//! Shared wire-protocol DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the backing service's Mongo-flavored payloads (`_id`,
//! `boardId`, populated creator documents) so serde does the field mapping in
//! one place and the rest of the client works with canonical records. Field
//! aliases keep deserialization tolerant of both `_id` and `id` spellings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

pub use events::Envelope;

/// Content kind of a block. Immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Raw text content.
    Text,
    /// Image URL content.
    Image,
    /// Link URL content.
    Link,
}

impl BlockKind {
    /// Lowercase wire/UI name for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Link => "link",
        }
    }
}

/// A 2D position on the board canvas in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Width used for rendering when a block carries no explicit size.
pub const FALLBACK_WIDTH: f64 = 200.0;
/// Height used for rendering when a block carries no explicit size.
pub const FALLBACK_HEIGHT: f64 = 150.0;

/// A positioned content block as represented in the wire protocol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Server-assigned stable identifier. An empty id makes the record
    /// unusable; callers validate before inserting into the store.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Content kind; fixed at creation time.
    #[serde(rename = "type", alias = "kind")]
    pub kind: BlockKind,
    /// String payload interpreted per kind (text, image URL, link URL).
    #[serde(default)]
    pub content: String,
    /// Canvas position; a partial payload without one means (0,0).
    #[serde(default)]
    pub position: Position,
    /// Explicit width, if the server stored one.
    #[serde(default)]
    pub width: Option<f64>,
    /// Explicit height, if the server stored one.
    #[serde(default)]
    pub height: Option<f64>,
    /// Board this block belongs to (UUID string), if known.
    #[serde(rename = "boardId", default)]
    pub board_id: Option<String>,
    /// Creator reference; informational only, never consulted by
    /// reconciliation.
    #[serde(
        rename = "createdBy",
        default,
        deserialize_with = "deserialize_user_ref"
    )]
    pub created_by: Option<String>,
    /// Last-edit timestamp as an ISO 8601 string; informational only.
    #[serde(rename = "lastEdited", default)]
    pub last_edited: Option<String>,
}

impl Block {
    /// True when the record carries a usable identifier.
    #[must_use]
    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Rendering size with the fixed fallback applied for missing dimensions.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (
            self.width.unwrap_or(FALLBACK_WIDTH),
            self.height.unwrap_or(FALLBACK_HEIGHT),
        )
    }
}

/// An authenticated user as returned by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A board as returned by `GET /boards/{id}`.
///
/// `blocks` stays as raw JSON: individual records are validated one by one by
/// the envelope module so a single malformed row cannot poison the whole
/// board load.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Board {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_user_ref")]
    pub owner: Option<String>,
    #[serde(default)]
    pub collaborators: Vec<User>,
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
    #[serde(default)]
    pub blocks: Vec<serde_json::Value>,
}

/// Successful login/register payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// A pending board invitation for the current user.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Invitation {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Board name out of the populated `boardId` document.
    #[serde(rename = "boardId", default, deserialize_with = "deserialize_board_name")]
    pub board_name: Option<String>,
    /// Display name of whoever sent the invitation.
    #[serde(rename = "invitedBy", default, deserialize_with = "deserialize_user_ref")]
    pub invited_by: Option<String>,
    #[serde(default)]
    pub status: String,
    pub token: String,
}

/// Accept a creator/owner reference that arrives either as a bare id string
/// or as a populated user document.
fn deserialize_user_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(id) => Some(id),
        serde_json::Value::Object(doc) => doc
            .get("name")
            .or_else(|| doc.get("_id"))
            .or_else(|| doc.get("id"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        _ => None,
    })
}

/// Pull a board name out of a populated board document, or `None` for a bare
/// id reference (nothing human-readable to show).
fn deserialize_board_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .get("name")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned))
}
