//! REST API helpers for communicating with the backing service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side (SSR):
//! stubs returning failures, since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failure, non-2xx validation failure, and "2xx but the payload is
//! not recognizably a block" all collapse to `Err(message)`, one failure
//! signal, so the controller's rollback policy never needs to distinguish
//! them. Validation messages from the server surface verbatim; everything
//! else falls back to a generic per-operation message. Nothing here retries.
//!
//! Every call carries a bounded timeout: a server that never answers settles
//! through the same failure path as one that says no.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use crate::net::types::{Block, BlockKind, Position};
#[cfg(any(test, feature = "hydrate"))]
use crate::net::types::Board;
use crate::state::boards::BoardListItem;
use crate::sync::actions::{CREATE_FAILED, DELETE_FAILED, UPDATE_FAILED};

/// Timeout for ordinary mutations and fetches.
pub const MUTATION_TIMEOUT_MS: u32 = 10_000;
/// Longer timeout for binary uploads.
pub const UPLOAD_TIMEOUT_MS: u32 = 30_000;

/// Maximum accepted image upload size, checked before any network call.
pub const MAX_UPLOAD_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

/// MIME types accepted for image uploads.
const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Fields submitted when creating a block.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateBlockDraft {
    pub kind: BlockKind,
    pub content: String,
    pub position: Position,
    pub board_id: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Partial update submitted for an existing block. Absent fields are left
/// untouched by the server.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateBlockPatch {
    pub content: Option<String>,
    pub position: Option<Position>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl UpdateBlockPatch {
    /// Patch carrying only new content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Patch carrying only a new position.
    #[must_use]
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }
}

/// Coerce a coordinate or dimension to a transmissible number.
///
/// NaN and infinities (a divide-by-zero in gesture math, for instance) go out
/// as 0 rather than serializing to `null` and corrupting the stored record.
#[cfg(any(test, feature = "hydrate"))]
fn coerce_number(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(any(test, feature = "hydrate"))]
fn create_block_payload(draft: &CreateBlockDraft) -> Value {
    let mut payload = serde_json::json!({
        "type": draft.kind.as_str(),
        "content": draft.content,
        "position": {
            "x": coerce_number(draft.position.x),
            "y": coerce_number(draft.position.y),
        },
        "boardId": draft.board_id,
    });
    if let Some(width) = draft.width {
        payload["width"] = coerce_number(width).into();
    }
    if let Some(height) = draft.height {
        payload["height"] = coerce_number(height).into();
    }
    payload
}

#[cfg(any(test, feature = "hydrate"))]
fn update_block_payload(patch: &UpdateBlockPatch) -> Value {
    let mut payload = serde_json::Map::new();
    if let Some(content) = &patch.content {
        payload.insert("content".to_owned(), content.clone().into());
    }
    if let Some(position) = patch.position {
        payload.insert(
            "position".to_owned(),
            serde_json::json!({
                "x": coerce_number(position.x),
                "y": coerce_number(position.y),
            }),
        );
    }
    if let Some(width) = patch.width {
        payload.insert("width".to_owned(), coerce_number(width).into());
    }
    if let Some(height) = patch.height {
        payload.insert("height".to_owned(), coerce_number(height).into());
    }
    Value::Object(payload)
}

#[cfg(any(test, feature = "hydrate"))]
fn block_endpoint(id: &str) -> String {
    format!("/api/blocks/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn board_endpoint(id: &str) -> String {
    format!("/api/boards/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn user_invitations_endpoint(email: &str) -> String {
    format!("/api/invitations/user/{email}")
}

#[cfg(any(test, feature = "hydrate"))]
fn accept_invitation_endpoint(token: &str) -> String {
    format!("/api/invitations/accept/{token}")
}

/// Check an image file against the client-side upload preconditions.
///
/// # Errors
///
/// Returns the user-facing rejection message for oversized files or
/// unsupported MIME types.
pub fn validate_image_upload(mime: &str, size_bytes: f64) -> Result<(), String> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err("File size must be less than 5MB".to_owned());
    }
    if !ALLOWED_IMAGE_TYPES.contains(&mime) {
        return Err("Only JPEG, PNG, GIF, and WebP images are allowed".to_owned());
    }
    Ok(())
}

/// Pull the uploaded content URL out of the upload response body.
#[cfg(any(test, feature = "hydrate"))]
fn upload_url_from_response(body: &Value) -> Option<String> {
    body.get("data")
        .and_then(|data| data.get("url"))
        .or_else(|| body.get("url"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Summarize a fetched board for the dashboard grid.
#[cfg(any(test, feature = "hydrate"))]
fn board_list_item(board: &Board) -> BoardListItem {
    BoardListItem {
        id: board.id.clone(),
        name: board.name.clone(),
        is_public: board.is_public,
        collaborator_count: board.collaborators.len(),
    }
}

/// Race a request against its timeout; a timeout settles as a failure like
/// any other.
#[cfg(feature = "hydrate")]
async fn with_timeout<T>(
    timeout_ms: u32,
    message: &str,
    fut: impl std::future::Future<Output = Result<T, String>>,
) -> Result<T, String> {
    use futures::FutureExt;

    let fut = fut.fuse();
    let timeout = gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(
        timeout_ms,
    )))
    .fuse();
    futures::pin_mut!(fut, timeout);
    futures::select! {
        out = fut => out,
        () = timeout => Err(message.to_owned()),
    }
}

/// Attach the persisted bearer token, when one exists.
#[cfg(feature = "hydrate")]
fn authorized(request: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    match crate::util::auth::stored_token() {
        Some(token) => request.header("Authorization", &format!("Bearer {token}")),
        None => request,
    }
}

/// Read the server's error message from a non-2xx response, falling back to
/// the given per-operation message.
#[cfg(feature = "hydrate")]
async fn failure_message(response: gloo_net::http::Response, fallback: &str) -> String {
    match response.json::<Value>().await {
        Ok(body) => crate::net::envelope::error_message(&body)
            .map(str::to_owned)
            .unwrap_or_else(|| fallback.to_owned()),
        Err(_) => fallback.to_owned(),
    }
}

/// Create a block and normalize the response into one canonical record.
///
/// # Errors
///
/// Returns the user-facing failure message for transport errors, rejections,
/// timeouts, and responses no extraction strategy recognizes.
pub async fn create_block(draft: &CreateBlockDraft) -> Result<Block, String> {
    #[cfg(feature = "hydrate")]
    {
        with_timeout(MUTATION_TIMEOUT_MS, CREATE_FAILED, async {
            let payload = create_block_payload(draft);
            let resp = authorized(gloo_net::http::Request::post("/api/blocks"))
                .json(&payload)
                .map_err(|_| CREATE_FAILED.to_owned())?
                .send()
                .await
                .map_err(|_| CREATE_FAILED.to_owned())?;
            if !resp.ok() {
                return Err(failure_message(resp, CREATE_FAILED).await);
            }
            let body: Value = resp.json().await.map_err(|_| CREATE_FAILED.to_owned())?;
            crate::net::envelope::normalize_block_response(&body)
                .ok_or_else(|| CREATE_FAILED.to_owned())
        })
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = draft;
        Err(CREATE_FAILED.to_owned())
    }
}

/// Apply a partial update and normalize the response.
///
/// # Errors
///
/// Same failure surface as [`create_block`].
pub async fn update_block(id: &str, patch: &UpdateBlockPatch) -> Result<Block, String> {
    #[cfg(feature = "hydrate")]
    {
        with_timeout(MUTATION_TIMEOUT_MS, UPDATE_FAILED, async {
            let payload = update_block_payload(patch);
            let resp = authorized(gloo_net::http::Request::patch(&block_endpoint(id)))
                .json(&payload)
                .map_err(|_| UPDATE_FAILED.to_owned())?
                .send()
                .await
                .map_err(|_| UPDATE_FAILED.to_owned())?;
            if !resp.ok() {
                return Err(failure_message(resp, UPDATE_FAILED).await);
            }
            let body: Value = resp.json().await.map_err(|_| UPDATE_FAILED.to_owned())?;
            crate::net::envelope::normalize_block_response(&body)
                .ok_or_else(|| UPDATE_FAILED.to_owned())
        })
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, patch);
        Err(UPDATE_FAILED.to_owned())
    }
}

/// Delete a block. Success carries no payload worth keeping.
///
/// # Errors
///
/// Returns the user-facing failure message on transport error, rejection, or
/// timeout.
pub async fn delete_block(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        with_timeout(MUTATION_TIMEOUT_MS, DELETE_FAILED, async {
            let resp = authorized(gloo_net::http::Request::delete(&block_endpoint(id)))
                .send()
                .await
                .map_err(|_| DELETE_FAILED.to_owned())?;
            if !resp.ok() {
                return Err(failure_message(resp, DELETE_FAILED).await);
            }
            Ok(())
        })
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(DELETE_FAILED.to_owned())
    }
}

/// Upload an image and return the content URL for an image block.
///
/// Preconditions (size, MIME type) are checked before any network traffic.
///
/// # Errors
///
/// Returns the rejection or failure message.
#[cfg(feature = "hydrate")]
pub async fn upload_image(file: &web_sys::File) -> Result<String, String> {
    validate_image_upload(&file.type_(), file.size())?;

    with_timeout(UPLOAD_TIMEOUT_MS, "Failed to upload image", async {
        let form = web_sys::FormData::new().map_err(|_| "Failed to upload image".to_owned())?;
        form.append_with_blob("image", file)
            .map_err(|_| "Failed to upload image".to_owned())?;
        let resp = authorized(gloo_net::http::Request::post("/api/upload/image"))
            .body(form)
            .map_err(|_| "Failed to upload image".to_owned())?
            .send()
            .await
            .map_err(|_| "Failed to upload image".to_owned())?;
        if !resp.ok() {
            return Err(failure_message(resp, "Failed to upload image").await);
        }
        let body: Value = resp
            .json()
            .await
            .map_err(|_| "Failed to upload image".to_owned())?;
        upload_url_from_response(&body).ok_or_else(|| "Failed to upload image".to_owned())
    })
    .await
}

/// Fetch one board, including its raw block rows.
///
/// # Errors
///
/// Returns the load error to display in place of the canvas.
pub async fn fetch_board(id: &str) -> Result<crate::net::types::Board, String> {
    #[cfg(feature = "hydrate")]
    {
        with_timeout(MUTATION_TIMEOUT_MS, "Failed to load board", async {
            let resp = authorized(gloo_net::http::Request::get(&board_endpoint(id)))
                .send()
                .await
                .map_err(|_| "Failed to load board".to_owned())?;
            if !resp.ok() {
                return Err(failure_message(resp, "Failed to load board").await);
            }
            resp.json::<Board>()
                .await
                .map_err(|_| "Failed to load board".to_owned())
        })
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available on server".to_owned())
    }
}

/// Fetch the signed-in user's boards as dashboard summaries.
/// Returns an empty list on failure or on the server.
pub async fn fetch_boards() -> Vec<BoardListItem> {
    #[cfg(feature = "hydrate")]
    {
        let result: Result<Vec<BoardListItem>, String> =
            with_timeout(MUTATION_TIMEOUT_MS, "Failed to load boards", async {
                let resp = authorized(gloo_net::http::Request::get("/api/boards"))
                    .send()
                    .await
                    .map_err(|_| "Failed to load boards".to_owned())?;
                if !resp.ok() {
                    return Err("Failed to load boards".to_owned());
                }
                let boards: Vec<Board> = resp
                    .json()
                    .await
                    .map_err(|_| "Failed to load boards".to_owned())?;
                Ok(boards.iter().map(board_list_item).collect())
            })
            .await;
        result.unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Vec::new()
    }
}

/// Create a board and return its dashboard summary.
///
/// # Errors
///
/// Returns the user-facing failure message.
pub async fn create_board(name: &str, is_public: bool) -> Result<BoardListItem, String> {
    #[cfg(feature = "hydrate")]
    {
        with_timeout(MUTATION_TIMEOUT_MS, "Failed to create board", async {
            let payload = serde_json::json!({ "name": name, "isPublic": is_public });
            let resp = authorized(gloo_net::http::Request::post("/api/boards"))
                .json(&payload)
                .map_err(|_| "Failed to create board".to_owned())?
                .send()
                .await
                .map_err(|_| "Failed to create board".to_owned())?;
            if !resp.ok() {
                return Err(failure_message(resp, "Failed to create board").await);
            }
            let board: Board = resp
                .json()
                .await
                .map_err(|_| "Failed to create board".to_owned())?;
            Ok(board_list_item(&board))
        })
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, is_public);
        Err("not available on server".to_owned())
    }
}

/// Log in with email and password.
///
/// # Errors
///
/// Returns the server's validation message verbatim when it sends one.
pub async fn login(email: &str, password: &str) -> Result<crate::net::types::AuthResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        with_timeout(MUTATION_TIMEOUT_MS, "Login failed", async {
            let payload = serde_json::json!({ "email": email, "password": password });
            let resp = gloo_net::http::Request::post("/api/auth/login")
                .json(&payload)
                .map_err(|_| "Login failed".to_owned())?
                .send()
                .await
                .map_err(|_| "Login failed".to_owned())?;
            if !resp.ok() {
                return Err(failure_message(resp, "Login failed").await);
            }
            resp.json::<crate::net::types::AuthResponse>()
                .await
                .map_err(|_| "Login failed".to_owned())
        })
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available on server".to_owned())
    }
}

/// Register a new account.
///
/// # Errors
///
/// Returns the server's validation message verbatim when it sends one.
pub async fn register(
    name: &str,
    email: &str,
    password: &str,
) -> Result<crate::net::types::AuthResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        with_timeout(MUTATION_TIMEOUT_MS, "Registration failed", async {
            let payload =
                serde_json::json!({ "name": name, "email": email, "password": password });
            let resp = gloo_net::http::Request::post("/api/auth/register")
                .json(&payload)
                .map_err(|_| "Registration failed".to_owned())?
                .send()
                .await
                .map_err(|_| "Registration failed".to_owned())?;
            if !resp.ok() {
                return Err(failure_message(resp, "Registration failed").await);
            }
            resp.json::<crate::net::types::AuthResponse>()
                .await
                .map_err(|_| "Registration failed".to_owned())
        })
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, email, password);
        Err("not available on server".to_owned())
    }
}

/// Invite a collaborator to a board by email.
///
/// # Errors
///
/// Returns the user-facing failure message.
pub async fn send_invitation(board_id: &str, email: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        with_timeout(MUTATION_TIMEOUT_MS, "Failed to send invitation", async {
            let payload = serde_json::json!({ "boardId": board_id, "email": email });
            let resp = authorized(gloo_net::http::Request::post("/api/invitations/send"))
                .json(&payload)
                .map_err(|_| "Failed to send invitation".to_owned())?
                .send()
                .await
                .map_err(|_| "Failed to send invitation".to_owned())?;
            if !resp.ok() {
                return Err(failure_message(resp, "Failed to send invitation").await);
            }
            Ok(())
        })
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (board_id, email);
        Err("not available on server".to_owned())
    }
}

/// Fetch the invitations addressed to an email. Returns an empty list on
/// failure or on the server.
pub async fn fetch_user_invitations(email: &str) -> Vec<crate::net::types::Invitation> {
    #[cfg(feature = "hydrate")]
    {
        let result: Result<Vec<crate::net::types::Invitation>, String> =
            with_timeout(MUTATION_TIMEOUT_MS, "Failed to fetch invitations", async {
                let resp =
                    authorized(gloo_net::http::Request::get(&user_invitations_endpoint(email)))
                        .send()
                        .await
                        .map_err(|_| "Failed to fetch invitations".to_owned())?;
                if !resp.ok() {
                    return Err("Failed to fetch invitations".to_owned());
                }
                resp.json::<Vec<crate::net::types::Invitation>>()
                    .await
                    .map_err(|_| "Failed to fetch invitations".to_owned())
            })
            .await;
        result.unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Vec::new()
    }
}

/// Accept an invitation by token.
///
/// # Errors
///
/// Returns the user-facing failure message.
pub async fn accept_invitation(token: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        with_timeout(MUTATION_TIMEOUT_MS, "Failed to accept invitation", async {
            let resp = authorized(gloo_net::http::Request::post(&accept_invitation_endpoint(
                token,
            )))
            .send()
            .await
            .map_err(|_| "Failed to accept invitation".to_owned())?;
            if !resp.ok() {
                return Err(failure_message(resp, "Failed to accept invitation").await);
            }
            Ok(())
        })
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err("not available on server".to_owned())
    }
}
