//! `/api/wifi/*` handlers over the Network Directory.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use wf_01_network_directory::{
    ConnectRequest, ConnectedNetwork, NearbyNetwork, NearbyRequest, NetworkSummary,
    RegisterRequest,
};
use wf_02_waypoint_fanout::{StopNetworks, StopsRequest};

use crate::domain::error::{ApiError, ApiResult};
use crate::router::AppState;

/// Body returned after a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
    pub message: String,
}

/// `POST /api/wifi/scan`
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = body.map_err(ApiError::from_json_rejection)?;
    let id = state
        .bounded("register", state.directory.register(request))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: id.to_string(),
            message: "WiFi details saved".to_string(),
        }),
    ))
}

/// `POST /api/wifi/connect`
pub async fn connect(
    State(state): State<AppState>,
    body: Result<Json<ConnectRequest>, JsonRejection>,
) -> ApiResult<Json<ConnectedNetwork>> {
    let Json(request) = body.map_err(ApiError::from_json_rejection)?;
    let network = state
        .bounded("connect", state.directory.connect(request))
        .await?;
    Ok(Json(network))
}

/// `GET /api/wifi/nearby?latitude=..&longitude=..[&radius=..]`
pub async fn nearby(
    State(state): State<AppState>,
    query: Result<Query<NearbyRequest>, QueryRejection>,
) -> ApiResult<Json<Vec<NearbyNetwork>>> {
    let Query(request) = query.map_err(ApiError::from_query_rejection)?;
    let networks = state
        .bounded("nearby", state.directory.nearby_search(request))
        .await?;
    Ok(Json(networks))
}

/// `GET /api/wifi`
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<NetworkSummary>>> {
    let networks = state
        .bounded("list_all", state.directory.list_all())
        .await?;
    Ok(Json(networks))
}

/// `POST /api/wifi/nearby/stops`
pub async fn nearby_stops(
    State(state): State<AppState>,
    body: Result<Json<StopsRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<StopNetworks>>> {
    let Json(request) = body.map_err(ApiError::from_json_rejection)?;
    let limit = state.fanout.max_stops();
    if request.stops.len() > limit {
        return Err(ApiError::bad_request(format!(
            "at most {limit} stops per request, got {}",
            request.stops.len()
        )));
    }
    let lookups = state.fanout.networks_for_stops(request.stops);
    let stops = state
        .bounded("nearby_stops", async { Ok::<_, ApiError>(lookups.await) })
        .await?;
    Ok(Json(stops))
}
