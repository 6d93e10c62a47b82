use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{Error, ResponseError, web};
use std::net::{IpAddr, Ipv4Addr};

use crate::error::ApiError;
use crate::state::AppState;

/// Per-client request limit, keyed on the peer IP address.
pub async fn rate_limit(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let client = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let limited = req
        .app_data::<web::Data<AppState>>()
        .is_some_and(|state| state.limiter.check_key(&client).is_err());

    if limited {
        tracing::warn!(%client, path = req.path(), "rate limit exceeded");
        let response = ApiError::TooManyRequests.error_response();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}
