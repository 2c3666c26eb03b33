//! `/api/gemini/*` handlers over the Waypoint Fan-out.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use wf_02_waypoint_fanout::{RouteNetworks, RouteQuery, SuggestedRoute};

use crate::domain::error::{ApiError, ApiResult};
use crate::router::AppState;

/// `GET /api/gemini/recommendstops?start_lat&start_lng&end_lat&end_lng[&stop_type&max_stops]`
pub async fn recommend_stops(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> ApiResult<Json<SuggestedRoute>> {
    let Query(query) = query.map_err(ApiError::from_query_rejection)?;
    // An empty stop type is filled in by the fan-out's own default.
    let request = query.into_request("", state.fanout.default_stops())?;
    let route = state
        .bounded("recommend_stops", state.fanout.find_waypoints(request))
        .await?;
    Ok(Json(route))
}

/// `GET /api/gemini/recommendstopswifi?start_lat&start_lng&end_lat&end_lng`
pub async fn recommend_stops_wifi(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> ApiResult<Json<RouteNetworks>> {
    let Query(query) = query.map_err(ApiError::from_query_rejection)?;
    let (start, end) = query.endpoints().map_err(ApiError::from)?;
    let route = state
        .bounded(
            "recommend_stops_wifi",
            state.fanout.recommend_stops_with_networks(start, end),
        )
        .await?;
    Ok(Json(route))
}
