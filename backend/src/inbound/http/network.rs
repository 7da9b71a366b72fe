//! Network analytics handlers.
//!
//! ```text
//! GET /api/analytics/stats
//! GET /api/network/graph
//! ```

use actix_web::{get, web};

use crate::domain::{Error, NetworkGraph, NetworkStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Headline network figures computed at request time.
#[utoipa::path(
    get,
    path = "/api/analytics/stats",
    responses(
        (status = 200, description = "Network statistics", body = NetworkStats),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["analytics"],
    operation_id = "getNetworkStats"
)]
#[get("/analytics/stats")]
pub async fn network_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<NetworkStats>> {
    let user_id = session.require_user_id()?;
    let stats = state.network.stats(&user_id).await?;
    Ok(web::Json(stats))
}

/// Nodes and links for a force-directed rendering of the network.
#[utoipa::path(
    get,
    path = "/api/network/graph",
    responses(
        (status = 200, description = "Graph data", body = NetworkGraph),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["analytics"],
    operation_id = "getNetworkGraph"
)]
#[get("/network/graph")]
pub async fn network_graph(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<NetworkGraph>> {
    let user_id = session.require_user_id()?;
    let graph = state.network.graph(&user_id).await?;
    Ok(web::Json(graph))
}
