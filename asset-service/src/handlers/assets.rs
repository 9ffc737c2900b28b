use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use service_core::error::AppError;
use service_core::utils::ValidatedJson;

use crate::dtos::{CreateAssetRequest, TransferAssetRequest};
use crate::middleware::AuthUser;
use crate::models::{Asset, CreateAsset};
use crate::services::ServiceError;
use crate::AppState;

/// Lists the caller's assets, oldest first.
pub async fn list_assets(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<Asset>>, AppError> {
    let assets = state.store.list_by_owner(&claims.sub)?;
    Ok(Json(assets))
}

/// Creates a tokenized asset owned by the caller.
pub async fn create_asset(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateAssetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = CreateAsset {
        name: payload.name,
        asset_type: payload.asset_type,
        description: payload.description,
        value: payload.value,
        metadata: payload.metadata,
    };
    let asset = state.store.create(&claims.sub, input)?;

    tracing::info!(
        asset_id = %asset.id,
        token_id = %asset.token_id,
        owner_id = %asset.owner_id,
        "Asset created"
    );
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Fetches one of the caller's assets by id.
pub async fn get_asset(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Asset>, AppError> {
    let id = parse_asset_id(&id)?;
    let asset = state.store.get_for_owner(id, &claims.sub)?;
    Ok(Json(asset))
}

/// Transfers one of the caller's assets to a recipient address.
pub async fn transfer_asset(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<TransferAssetRequest>,
) -> Result<Json<Asset>, AppError> {
    let id = parse_asset_id(&id)?;
    let new_owner_id = recipient_owner_id(&payload.recipient_address);
    let asset = state.store.transfer(id, &claims.sub, &new_owner_id)?;

    tracing::info!(
        asset_id = %asset.id,
        token_id = %asset.token_id,
        from = %claims.sub,
        to = %asset.owner_id,
        "Asset transferred"
    );
    Ok(Json(asset))
}

/// An id that does not parse cannot exist, which is the same
/// not-found a foreign asset produces.
fn parse_asset_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::AssetNotFound.into())
}

/// Derives the recipient's owner id from the last eight characters of
/// the address. Stands in until addresses resolve through a directory.
fn recipient_owner_id(address: &str) -> String {
    let split = address
        .char_indices()
        .rev()
        .nth(7)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("user_{}", &address[split..])
}
