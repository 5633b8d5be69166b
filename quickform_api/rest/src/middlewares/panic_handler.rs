use std::panic::AssertUnwindSafe;

use anyhow::anyhow;
use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures::FutureExt;

use crate::routes::internal_server_error;

/// Turn a panicking handler into a 500 response instead of a dropped
/// connection.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    AssertUnwindSafe(next.run(request))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| internal_server_error(anyhow!("handler for {method} {uri} panicked")))
}
