//! Endpoints: one `tower::Service` per service operation, each already
//! wrapped in the middleware pipeline.

use crate::error::PostoError;
use crate::middleware::{pipeline, Pipeline};
use crate::service::UfoService;
use futures::future::BoxFuture;
use posto_types::Ufo;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUfoRequest {
    pub model: String,
    pub licence: String,
    pub plate: String,
    pub tank: i64,
    pub fuel: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchUfoRequest {
    pub id: Uuid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListUfosRequest;

#[derive(Clone)]
pub struct CreateUfoEndpoint {
    service: Arc<UfoService>,
}

impl Service<CreateUfoRequest> for CreateUfoEndpoint {
    type Response = Ufo;
    type Error = PostoError;
    type Future = BoxFuture<'static, Result<Ufo, PostoError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: CreateUfoRequest) -> Self::Future {
        let service = self.service.clone();
        Box::pin(async move {
            service
                .create(&req.model, &req.licence, &req.plate, req.tank, &req.fuel)
                .await
        })
    }
}

#[derive(Clone)]
pub struct FetchUfoEndpoint {
    service: Arc<UfoService>,
}

impl Service<FetchUfoRequest> for FetchUfoEndpoint {
    type Response = Option<Ufo>;
    type Error = PostoError;
    type Future = BoxFuture<'static, Result<Option<Ufo>, PostoError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: FetchUfoRequest) -> Self::Future {
        let service = self.service.clone();
        Box::pin(async move { service.fetch_by_id(req.id).await })
    }
}

#[derive(Clone)]
pub struct ListUfosEndpoint {
    service: Arc<UfoService>,
}

impl Service<ListUfosRequest> for ListUfosEndpoint {
    type Response = Vec<Ufo>;
    type Error = PostoError;
    type Future = BoxFuture<'static, Result<Vec<Ufo>, PostoError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: ListUfosRequest) -> Self::Future {
        let service = self.service.clone();
        Box::pin(async move { service.list().await })
    }
}

/// The three operations, ready to be cloned into request handlers.
#[derive(Clone)]
pub struct Endpoints {
    pub create: Pipeline<CreateUfoEndpoint>,
    pub fetch: Pipeline<FetchUfoEndpoint>,
    pub list: Pipeline<ListUfosEndpoint>,
}

impl Endpoints {
    pub fn new(service: Arc<UfoService>) -> Self {
        Self {
            create: pipeline(
                "create_ufo",
                CreateUfoEndpoint {
                    service: service.clone(),
                },
            ),
            fetch: pipeline(
                "fetch_ufo",
                FetchUfoEndpoint {
                    service: service.clone(),
                },
            ),
            list: pipeline("list_ufos", ListUfosEndpoint { service }),
        }
    }
}
