use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::Json;

use courier_conditional::MetadataStore;
use courier_core::{Audience, DomainError};

use crate::error::ApiError;
use crate::negotiate::Negotiated;
use crate::respond::RepresentationResponse;
use crate::routes::AppState;

use super::{context, PageQuery};

pub async fn list(
    State(state): State<AppState>,
    uri: Uri,
    negotiated: Negotiated,
    Query(query): Query<PageQuery>,
) -> Result<RepresentationResponse, ApiError> {
    let ctx = context(&uri, &negotiated);
    let factory = state
        .registry
        .lookup(&negotiated.media_types)
        .map_err(ApiError::not_acceptable)?;
    let page = state
        .stores
        .audiences
        .list(query.skip, query.take.unwrap_or(state.page_size));
    Ok(RepresentationResponse(factory.audiences(&ctx, &page)))
}

pub async fn show(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    uri: Uri,
    negotiated: Negotiated,
) -> Result<RepresentationResponse, ApiError> {
    let ctx = context(&uri, &negotiated);
    let factory = state
        .registry
        .lookup(&negotiated.media_types)
        .map_err(ApiError::not_acceptable)?;
    match state.stores.audiences.get(&uuid) {
        Ok(audience) => Ok(RepresentationResponse(factory.audience(&ctx, &audience))),
        Err(err) => Err(ApiError::domain(
            &state.registry,
            &ctx,
            &negotiated.media_types,
            err,
        )),
    }
}

pub async fn replace(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    uri: Uri,
    negotiated: Negotiated,
    Json(body): Json<Audience>,
) -> Result<RepresentationResponse, ApiError> {
    let ctx = context(&uri, &negotiated);
    let factory = state
        .registry
        .lookup(&negotiated.media_types)
        .map_err(ApiError::not_acceptable)?;
    if body.uuid != uuid {
        return Err(ApiError::domain(
            &state.registry,
            &ctx,
            &negotiated.media_types,
            DomainError::Validation("audience uuid in body must match the request path".into()),
        ));
    }
    state.stores.audiences.upsert(body.clone());
    Ok(RepresentationResponse(factory.audience(&ctx, &body)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    uri: Uri,
    negotiated: Negotiated,
) -> Result<StatusCode, ApiError> {
    match state.stores.audiences.remove(&uuid) {
        Ok(()) => {
            state.metadata.remove(&uri.to_string());
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => Err(ApiError::domain(
            &state.registry,
            &context(&uri, &negotiated),
            &negotiated.media_types,
            err,
        )),
    }
}
