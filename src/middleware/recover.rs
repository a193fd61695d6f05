//! Panic recovery middleware
//!
//! The outermost stage of the pipeline. A panic anywhere downstream is caught
//! here, logged with its message and a captured backtrace, and converted into
//! a generic 500 response. The response carries `Connection: close` so the
//! client reconnects rather than reusing a connection whose state may be
//! suspect. The worker task itself keeps running.

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;

pub async fn recover_panic(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            tracing::error!(
                panic = %panic_message(panic.as_ref()),
                backtrace = %Backtrace::force_capture(),
                "Recovered from panic while handling request"
            );

            let status = StatusCode::INTERNAL_SERVER_ERROR;
            let mut response =
                (status, status.canonical_reason().unwrap_or("Internal Server Error"))
                    .into_response();
            response
                .headers_mut()
                .insert(header::CONNECTION, HeaderValue::from_static("close"));
            response
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
