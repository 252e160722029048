//! Endpoint middleware
//!
//! Every endpoint runs inside the same two wrappers, outermost first:
//!
//! ```text
//! Timing -> Logging -> endpoint
//! ```
//!
//! Both only observe. The request goes in untouched and the endpoint's
//! response or error comes back out untouched.

use futures::future::BoxFuture;
use std::fmt::{Debug, Display};
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service, ServiceBuilder};
use tracing::info;

/// An endpoint wrapped in the standard middleware chain.
pub type Pipeline<S> = Timing<Logging<S>>;

/// Wrap `endpoint` in timing and logging, timing outermost.
pub fn pipeline<S>(operation: &'static str, endpoint: S) -> Pipeline<S> {
    ServiceBuilder::new()
        .layer(TimingLayer::new(operation))
        .layer(LoggingLayer::new(operation))
        .service(endpoint)
}

#[derive(Debug, Clone, Copy)]
pub struct TimingLayer {
    operation: &'static str,
}

impl TimingLayer {
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

impl<S> Layer<S> for TimingLayer {
    type Service = Timing<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Timing {
            inner,
            operation: self.operation,
        }
    }
}

/// Logs the wall-clock time of each call once it is over.
#[derive(Debug, Clone)]
pub struct Timing<S> {
    inner: S,
    operation: &'static str,
}

impl<S, Req> Service<Req> for Timing<S>
where
    S: Service<Req>,
    S::Future: Send + 'static,
    S::Response: 'static,
    S::Error: 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<S::Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        let stopwatch = Stopwatch {
            operation: self.operation,
            start: Instant::now(),
        };
        let fut = self.inner.call(req);
        Box::pin(async move {
            let _stopwatch = stopwatch;
            fut.await
        })
    }
}

/// Emits the elapsed time when dropped, so abandoned calls are timed too.
struct Stopwatch {
    operation: &'static str,
    start: Instant,
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        info!(
            operation = self.operation,
            elapsed = ?self.start.elapsed(),
            "time"
        );
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoggingLayer {
    operation: &'static str,
}

impl LoggingLayer {
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            operation: self.operation,
        }
    }
}

/// Logs each request before the call and its outcome after it.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    operation: &'static str,
}

impl<S, Req> Service<Req> for Logging<S>
where
    S: Service<Req>,
    S::Future: Send + 'static,
    S::Response: Debug + 'static,
    S::Error: Display + 'static,
    Req: Debug,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<S::Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        let operation = self.operation;
        info!(operation, request = ?req, "request arrived");
        let fut = self.inner.call(req);
        let mut closing = ClosingRecord {
            operation,
            written: false,
        };
        Box::pin(async move {
            let result = fut.await;
            match &result {
                Ok(response) => info!(operation, response = ?response, "response returned"),
                Err(error) => info!(operation, %error, "response returned"),
            }
            closing.written = true;
            result
        })
    }
}

/// Closes the "request arrived" record of a call that was dropped or
/// panicked before producing a result.
struct ClosingRecord {
    operation: &'static str,
    written: bool,
}

impl Drop for ClosingRecord {
    fn drop(&mut self) {
        if !self.written {
            info!(
                operation = self.operation,
                outcome = "abandoned",
                "response returned"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use tower::{service_fn, ServiceExt};

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not logged in:\n{haystack}"))
    }

    #[tokio::test]
    async fn test_passes_response_through() {
        let (logs, _guard) = capture_logs();
        let svc = pipeline(
            "double",
            service_fn(|n: u32| async move { Ok::<_, String>(n * 2) }),
        );

        assert_eq!(svc.oneshot(21).await, Ok(42));

        let out = logs.contents();
        let arrived = position(&out, "request arrived");
        let returned = position(&out, "response returned");
        let time = position(&out, "time operation=");
        assert!(arrived < returned && returned < time);
        assert!(out.contains("request=21"));
        assert!(out.contains("response=42"));
        assert!(out.contains("operation=\"double\""));
    }

    #[tokio::test]
    async fn test_passes_error_through_and_still_times() {
        let (logs, _guard) = capture_logs();
        let svc = pipeline(
            "fail",
            service_fn(|_: ()| async { Err::<u32, _>("tank exploded".to_string()) }),
        );

        assert_eq!(svc.oneshot(()).await, Err("tank exploded".to_string()));

        let out = logs.contents();
        assert!(out.contains("error=tank exploded"));
        position(&out, "time operation=");
    }

    #[tokio::test]
    async fn test_abandoned_call_is_closed_and_timed() {
        let (logs, _guard) = capture_logs();
        let mut svc = pipeline(
            "stuck",
            service_fn(|_: ()| std::future::pending::<Result<(), String>>()),
        );

        let fut = svc.ready().await.unwrap().call(());
        drop(fut);

        let out = logs.contents();
        let arrived = position(&out, "request arrived");
        let returned = position(&out, "response returned");
        assert!(arrived < returned);
        assert!(out.contains("outcome=\"abandoned\""));
        assert_eq!(out.matches("response returned").count(), 1);
        position(&out, "time operation=");
    }

    #[tokio::test]
    async fn test_panicking_call_is_closed() {
        let (logs, _guard) = capture_logs();
        let svc = pipeline(
            "explode",
            service_fn(|_: ()| async {
                if true {
                    panic!("tank ruptured");
                }
                Ok::<(), String>(())
            }),
        );

        let call = tokio::spawn(svc.oneshot(()));
        assert!(call.await.unwrap_err().is_panic());

        let out = logs.contents();
        position(&out, "request arrived");
        assert!(out.contains("outcome=\"abandoned\""));
        position(&out, "time operation=");
    }

    #[tokio::test]
    async fn test_completed_call_is_closed_once() {
        let (logs, _guard) = capture_logs();
        let svc = pipeline("noop", service_fn(|_: ()| async { Ok::<_, String>(()) }));

        assert_eq!(svc.oneshot(()).await, Ok(()));

        let out = logs.contents();
        assert_eq!(out.matches("response returned").count(), 1);
        assert!(!out.contains("abandoned"));
    }

    #[tokio::test]
    async fn test_wrappers_do_not_touch_request() {
        let (_logs, _guard) = capture_logs();
        let svc = pipeline(
            "echo",
            service_fn(|s: String| async move { Ok::<_, String>(s) }),
        );
        assert_eq!(
            svc.oneshot("  Falcon ".to_string()).await,
            Ok("  Falcon ".to_string())
        );
    }
}
