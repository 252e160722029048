//! Health check

use crate::lifecycle::LifecycleState;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// 200 while serving, 503 once the process is halting.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = match *state.lifecycle.borrow() {
        LifecycleState::Starting | LifecycleState::Running => (StatusCode::OK, "ok"),
        LifecycleState::Halting | LifecycleState::Terminated => {
            (StatusCode::SERVICE_UNAVAILABLE, "halting")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryUfoStore;
    use posto_core::{Endpoints, UfoService};
    use std::sync::Arc;
    use tokio::sync::watch;

    fn state(lifecycle: watch::Receiver<LifecycleState>) -> AppState {
        let service = UfoService::new(Arc::new(MemoryUfoStore::new()));
        AppState {
            endpoints: Endpoints::new(Arc::new(service)),
            lifecycle,
        }
    }

    #[tokio::test]
    async fn test_reports_halting() {
        let (tx, rx) = watch::channel(LifecycleState::Running);

        let (code, Json(body)) = health(State(state(rx.clone()))).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, "ok");

        tx.send_replace(LifecycleState::Halting);
        let (code, Json(body)) = health(State(state(rx))).await;
        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "halting");
    }
}
