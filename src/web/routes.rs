use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::AppState;
use super::render::{self, PageView};
use crate::error::{BrowseError, UNAVAILABLE_MESSAGE};
use crate::vfs::path::path_for_prefix;
use crate::vfs::{
    VisibleEntry, breadcrumbs, drill_down, drill_up, format_size, prefix_from_path,
    visible_children,
};

pub async fn index_handler() -> Redirect {
    Redirect::to(&path_for_prefix(""))
}

pub async fn health_handler() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct PrefixQuery {
    #[serde(default)]
    prefix: String,
}

/// Jump to a typed-in folder path
pub async fn go_handler(Query(query): Query<PrefixQuery>) -> Redirect {
    let prefix = folder_prefix(query.prefix.trim().trim_start_matches('/'));
    Redirect::to(&path_for_prefix(&prefix))
}

#[instrument(name = "s3web.browse", skip(state, uri), fields(path = %uri.path()))]
pub async fn browse_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let prefix = match decode_prefix(&prefix_from_path(uri.path())) {
        Ok(prefix) => prefix,
        Err(err) => return err.into_response(),
    };

    let listing = match list_visible(&state, &prefix).await {
        Ok(entries) => Ok(entries),
        Err(err) => {
            warn!(%err, %prefix, "listing failed");
            Err(err.public_message())
        }
    };

    let status = if listing.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let view = PageView {
        bucket: state.bucket(),
        prefix: &prefix,
        parent: parent_of(&prefix),
        crumbs: breadcrumbs(&prefix),
        listing,
    };

    (status, Html(render::page(&view))).into_response()
}

#[instrument(name = "s3web.upload", skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, BrowseError> {
    let mut prefix = String::new();
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BrowseError::InvalidUpload(e.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("prefix") => {
                prefix = field
                    .text()
                    .await
                    .map_err(|e| BrowseError::InvalidUpload(e.to_string()))?;
            }
            Some("file") => {
                let file_name = field.file_name().map(basename).unwrap_or_default();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| BrowseError::InvalidUpload(e.to_string()))?;
                file = Some((file_name, data));
            }
            _ => {}
        }
    }

    let (file_name, data) = match file {
        Some((name, data)) if !name.is_empty() => (name, data),
        _ => return Err(BrowseError::InvalidUpload("no file selected".to_string())),
    };

    let prefix = folder_prefix(&prefix);
    let key = format!("{prefix}{file_name}");
    let size = data.len() as u64;
    state.store().put_object(state.bucket(), &key, data).await?;

    info!(
        bucket = state.bucket(),
        %key,
        size = %humansize::format_size(size, humansize::BINARY),
        "uploaded object"
    );

    Ok(Redirect::to(&path_for_prefix(&prefix)))
}

#[instrument(name = "s3web.download", skip(state))]
pub async fn download_handler(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<Response, BrowseError> {
    if bucket != state.bucket() {
        return Err(BrowseError::UnknownBucket(bucket));
    }

    let body = match state.store().get_object(&bucket, &key).await {
        Ok(body) => body,
        Err(err) => {
            warn!(%err, %key, "download failed");
            return Ok((StatusCode::NOT_FOUND, UNAVAILABLE_MESSAGE).into_response());
        }
    };

    let disposition = format!(
        "attachment; filename=\"{}\"",
        basename(&key).replace(['"', '\\'], "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub prefix: String,
    /// `None` at root
    pub parent: Option<String>,
    pub entries: Vec<ListedEntry>,
}

#[derive(Debug, Serialize)]
pub struct ListedEntry {
    #[serde(flatten)]
    pub entry: VisibleEntry,
    pub size_display: String,
}

#[instrument(name = "s3web.api.list", skip(state))]
pub async fn api_list_handler(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> Result<Json<ListResponse>, BrowseError> {
    let entries = list_visible(&state, &query.prefix)
        .await?
        .into_iter()
        .map(|entry| ListedEntry {
            size_display: format_size(entry.size),
            entry,
        })
        .collect();

    Ok(Json(ListResponse {
        parent: parent_of(&query.prefix),
        prefix: query.prefix,
        entries,
    }))
}

/// Navigation event sent by the client. Carries the target key itself.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum NavigateAction {
    Down { key: String },
    Up,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    #[serde(default)]
    pub prefix: String,
    #[serde(flatten)]
    pub action: NavigateAction,
}

#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub prefix: String,
    pub path: String,
}

#[instrument(name = "s3web.api.navigate", skip_all)]
pub async fn api_navigate_handler(
    Json(request): Json<NavigateRequest>,
) -> Result<Json<NavigateResponse>, BrowseError> {
    let prefix = match request.action {
        NavigateAction::Down { key } => drill_down(&request.prefix, &key)?,
        NavigateAction::Up => drill_up(&request.prefix),
    };

    Ok(Json(NavigateResponse {
        path: path_for_prefix(&prefix),
        prefix,
    }))
}

async fn list_visible(state: &AppState, prefix: &str) -> Result<Vec<VisibleEntry>, BrowseError> {
    let entries = state.store().list_objects(state.bucket(), prefix).await?;
    Ok(visible_children(&entries, prefix, state.policy()))
}

fn parent_of(prefix: &str) -> Option<String> {
    if prefix.is_empty() {
        None
    } else {
        Some(drill_up(prefix))
    }
}

fn decode_prefix(raw: &str) -> Result<String, BrowseError> {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| BrowseError::InvalidNavigation {
            prefix: String::new(),
            target: raw.to_string(),
        })
}

/// A typed folder path always names a folder, so it ends in `/` unless it is root
fn folder_prefix(raw: &str) -> String {
    if raw.is_empty() || raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    }
}

/// Last path component of an uploaded file name or object key
fn basename(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim()
        .to_string()
}
