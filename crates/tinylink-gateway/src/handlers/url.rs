use crate::error::{AppError, Result};
use crate::model::{AliasResponse, SaveUrlRequest};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tinylink_core::{Alias, ShortenerError};
use tracing::{error, info};

pub async fn save_url_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AliasResponse>> {
    const OP: &str = "handlers.url.save";

    let request: SaveUrlRequest = serde_json::from_slice(&body).map_err(|err| {
        error!(op = OP, error = %err, "failed to decode request body");
        AppError::Decode
    })?;
    info!(op = OP, request = ?request, "request body decoded");

    let params = request.into_params().inspect_err(|err| {
        info!(op = OP, error = %err, "invalid request");
    })?;

    let saved = state.shortener().shorten(params).await.map_err(|err| match err {
        ShortenerError::AliasConflict(alias) => {
            info!(op = OP, alias = %alias, "url already exists");
            AppError::AliasExists
        }
        ShortenerError::InvalidUrl(reason) => {
            info!(op = OP, reason = %reason, "invalid url");
            AppError::InvalidUrl
        }
        ShortenerError::InvalidAlias(reason) => {
            info!(op = OP, reason = %reason, "invalid alias");
            AppError::InvalidAlias
        }
        other => {
            error!(op = OP, error = %other, "failed to add url");
            AppError::SaveFailed
        }
    })?;

    info!(
        op = OP,
        id = saved.id,
        alias = %saved.alias,
        short_url = %saved.alias.to_url(state.base_url()),
        "url added"
    );
    Ok(Json(AliasResponse::ok(&saved.alias)))
}

pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> std::result::Result<Response, (StatusCode, AppError)> {
    const OP: &str = "handlers.url.redirect";

    let alias = Alias::new(alias).map_err(|err| {
        info!(op = OP, error = %err, "alias is invalid");
        AppError::InvalidRequest.with_status()
    })?;

    let target = state.shortener().resolve(&alias).await.map_err(|err| match err {
        ShortenerError::NotFound(_) => {
            info!(op = OP, alias = %alias, "url not found");
            AppError::NotFound.with_status()
        }
        other => {
            error!(op = OP, alias = %alias, error = %other, "failed to get url");
            AppError::Internal.with_status()
        }
    })?;

    let location = HeaderValue::try_from(target.as_str()).map_err(|err| {
        error!(op = OP, alias = %alias, error = %err, "stored url is not a valid header value");
        AppError::Internal.with_status()
    })?;

    info!(op = OP, alias = %alias, url = %target, "got url");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

pub async fn delete_url_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AliasResponse>> {
    const OP: &str = "handlers.url.delete";

    let alias = Alias::new(alias).map_err(|err| {
        info!(op = OP, error = %err, "alias is invalid");
        AppError::InvalidRequest
    })?;

    state.shortener().delete(&alias).await.map_err(|err| match err {
        ShortenerError::NotFound(_) => {
            info!(op = OP, alias = %alias, "url not found");
            AppError::NotFound
        }
        other => {
            error!(op = OP, alias = %alias, error = %other, "failed to delete url");
            AppError::Internal
        }
    })?;

    info!(op = OP, alias = %alias, "url deleted");
    Ok(Json(AliasResponse::ok(&alias)))
}
