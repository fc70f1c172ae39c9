//! Request forwarding to an upstream pool.
//!
//! # Responsibilities
//! - Open one outbound connection per inbound request
//! - Copy method and headers verbatim (Host included, no rewrite)
//! - Stream bodies in both directions without buffering
//! - Relay status and headers unchanged, optionally appending x-build-id
//! - Answer 502 with a diagnostic body on upstream failure, exactly once
//!
//! # Design Decisions
//! - No retries: masking the induced fault would defeat the harness
//! - The build-id header is appended after the verbatim copy so an
//!   upstream header of the same name can never displace it

use axum::body::Body;
use axum::http::{HeaderValue, Request, Response, StatusCode, Uri};
use axum::response::IntoResponse;
use hyper_util::client::legacy::{connect::HttpConnector, Client};

use crate::observability::metrics;
use crate::routing::{Pool, RoutingDecision};

/// Response header naming the pool that actually answered.
pub const BUILD_ID_HEADER: &str = "x-build-id";
pub const BUILD_ID_POOL_A: &str = "build-a";
pub const BUILD_ID_POOL_B: &str = "build-b";

fn build_id_value(pool: Pool) -> HeaderValue {
    match pool {
        Pool::A => HeaderValue::from_static(BUILD_ID_POOL_A),
        Pool::B => HeaderValue::from_static(BUILD_ID_POOL_B),
    }
}

/// Forward one inbound request to `addr` per the routing decision and
/// relay the upstream response. Always produces a response: upstream
/// failures surface as a single 502 with the failure reason in the body.
pub async fn forward(
    client: &Client<HttpConnector, Body>,
    addr: &str,
    decision: &RoutingDecision,
    request: Request<Body>,
    inject_build_id: bool,
) -> Response<Body> {
    let uri: Uri = match format!("http://{}{}", addr, decision.path).parse() {
        Ok(uri) => uri,
        Err(err) => return gateway_error(decision.target, &err.to_string()),
    };

    let (parts, body) = request.into_parts();
    let mut outbound = Request::new(body);
    *outbound.method_mut() = parts.method;
    *outbound.uri_mut() = uri;
    // Inbound headers verbatim, Host included; the backend sees exactly
    // what the original downstream would have sent.
    *outbound.headers_mut() = parts.headers;

    match client.request(outbound).await {
        Ok(upstream) => {
            let (parts, body) = upstream.into_parts();
            let mut response = Response::from_parts(parts, Body::new(body));
            if inject_build_id {
                response
                    .headers_mut()
                    .append(BUILD_ID_HEADER, build_id_value(decision.target));
            }
            response
        }
        Err(err) => {
            tracing::error!(
                pool = decision.target.label(),
                path = %decision.path,
                error = %err,
                "upstream request failed"
            );
            gateway_error(decision.target, &err.to_string())
        }
    }
}

fn gateway_error(pool: Pool, reason: &str) -> Response<Body> {
    metrics::record_gateway_error(pool);
    (StatusCode::BAD_GATEWAY, format!("Proxy error: {}", reason)).into_response()
}
