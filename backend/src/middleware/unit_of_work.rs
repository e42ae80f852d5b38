//! Per-request change-tracking scope for the territory store.
//!
//! Wrapping the app in [`UnitOfWork`] runs each request inside
//! [`tracking_scope`], so a read followed by an update of the same row within
//! one request resolves to a single tracked instance.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::outbound::persistence::tracking_scope;

/// Middleware opening a fresh identity map for every request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use territory_backend::UnitOfWork;
///
/// let app = App::new().wrap(UnitOfWork);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct UnitOfWork;

impl<S, B> Transform<S, ServiceRequest> for UnitOfWork
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = UnitOfWorkMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(UnitOfWorkMiddleware { service }))
    }
}

/// Service wrapper produced by [`UnitOfWork`].
pub struct UnitOfWorkMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for UnitOfWorkMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        Box::pin(tracking_scope(fut))
    }
}
