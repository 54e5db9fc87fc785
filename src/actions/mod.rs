//! View-independent fetch and submit flows.
//!
//! Pages own the signals; these functions own the rules: id validation,
//! which message to show for which failure, and where to go after a create.

use crate::api::{ApiError, PostsBackend};
use crate::app::routes::post_path;
use crate::models::{FieldErrors, Post, PostId, PostPayload};
use thiserror::Error;

const LOAD_POSTS_FAILED: &str = "Failed to load posts.";
const LOAD_POST_FAILED: &str = "Failed to load post.";
const CREATE_FAILED: &str = "Failed to create the post.";
const UPDATE_FAILED: &str = "Update failed.";
const DELETE_FAILED: &str = "Failed to delete.";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum LoadError {
    #[error("Invalid post id.")]
    InvalidId,
    #[error("Post not found.")]
    NotFound,
    #[error("{0}")]
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
#[error("{message}")]
pub(crate) struct SubmitError {
    pub message: String,
    pub fields: FieldErrors,
}

impl SubmitError {
    fn from_api(e: &ApiError, fallback: &str) -> Self {
        Self {
            message: e.user_message(fallback),
            fields: e.field_errors().cloned().unwrap_or_default(),
        }
    }
}

/// Route ids must be plain positive decimal integers.
pub(crate) fn parse_post_id(raw: &str) -> Option<PostId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<PostId>().ok().filter(|id| *id > 0)
}

pub(crate) async fn load_posts<B: PostsBackend>(backend: &B) -> Result<Vec<Post>, String> {
    backend
        .list_posts()
        .await
        .map_err(|e| e.user_message(LOAD_POSTS_FAILED))
}

/// Invalid ids are rejected before any request is made.
pub(crate) async fn load_post<B: PostsBackend>(backend: &B, raw_id: &str) -> Result<Post, LoadError> {
    let id = parse_post_id(raw_id).ok_or(LoadError::InvalidId)?;
    backend.get_post(id).await.map_err(|e| {
        if e.is_not_found() {
            LoadError::NotFound
        } else {
            LoadError::Failed(e.user_message(LOAD_POST_FAILED))
        }
    })
}

/// Creates the post and returns the detail path to navigate to.
pub(crate) async fn submit_create<B: PostsBackend>(
    backend: &B,
    payload: &PostPayload,
) -> Result<String, SubmitError> {
    match backend.create_post(payload).await {
        Ok(created) => {
            log::info!("created post {}", created.id);
            Ok(post_path(created.id))
        }
        Err(e) => Err(SubmitError::from_api(&e, CREATE_FAILED)),
    }
}

pub(crate) async fn submit_update<B: PostsBackend>(
    backend: &B,
    id: PostId,
    payload: &PostPayload,
) -> Result<Post, SubmitError> {
    backend.update_post(id, payload).await.map_err(|e| {
        let mut err = SubmitError::from_api(&e, UPDATE_FAILED);
        if e.is_not_found() {
            err.message = LoadError::NotFound.to_string();
        }
        err
    })
}

pub(crate) async fn delete_post<B: PostsBackend>(backend: &B, id: PostId) -> Result<(), String> {
    backend
        .delete_post(id)
        .await
        .map_err(|e| e.user_message(DELETE_FAILED))
}

#[cfg(test)]
pub(crate) mod fake;
