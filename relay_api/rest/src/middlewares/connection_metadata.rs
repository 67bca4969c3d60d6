use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::USER_AGENT, HeaderMap, HeaderName},
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};
use relay_models::metadata::{ConnectionMetadata, UNKNOWN};

use crate::RestServerEdgeHeaders;

const CF_CONNECTING_IP: HeaderName = HeaderName::from_static("cf-connecting-ip");
const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

pub fn add<S: Clone + Send + Sync + 'static>(
    router: Router<S>,
    edge_headers: Arc<RestServerEdgeHeaders>,
) -> Router<S> {
    router.layer(from_fn_with_state(edge_headers, middleware))
}

async fn middleware(
    State(edge_headers): State<Arc<RestServerEdgeHeaders>>,
    mut request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let metadata = connection_metadata(request.headers(), peer, &edge_headers);
    request.extensions_mut().insert(metadata);
    next.run(request).await
}

fn connection_metadata(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    edge_headers: &RestServerEdgeHeaders,
) -> ConnectionMetadata {
    let value = |name: &HeaderName| header(headers, name).unwrap_or_else(|| UNKNOWN.into());

    let client_ip = header(headers, &CF_CONNECTING_IP)
        .or_else(|| {
            header(headers, &X_FORWARDED_FOR).and_then(|x| {
                x.split(',')
                    .map(str::trim)
                    .find(|x| !x.is_empty())
                    .map(Into::into)
            })
        })
        .or_else(|| peer.map(|x| x.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN.into());

    ConnectionMetadata {
        client_ip,
        user_agent: value(&USER_AGENT),
        country: value(&edge_headers.country),
        city: value(&edge_headers.city),
        region: value(&edge_headers.region),
        timezone: value(&edge_headers.timezone),
        asn: value(&edge_headers.asn),
        colo: value(&edge_headers.colo),
    }
}

fn header(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|x| x.to_str().ok())
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(Into::into)
}
