//! Handler error logging
//!
//! Only registered outside production. Errors are logged and then passed
//! through untouched, so the client sees exactly what it would without
//! this middleware.

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::error;

use super::RequestId;

#[derive(Clone, Default)]
pub struct ErrorLogger;

impl<S, B> Transform<S, ServiceRequest> for ErrorLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let method = req.method().clone();
        let path = req.path().to_string();
        let request_id = RequestId::describe(&req);

        Box::pin(async move {
            let result = srv.call(req).await;

            match &result {
                Ok(response) => {
                    if let Some(err) = response.response().error() {
                        error!(
                            request_id = %request_id,
                            "Handler error on {} {} ({}): {}",
                            method,
                            path,
                            response.status(),
                            err
                        );
                    }
                }
                Err(err) => {
                    error!(
                        request_id = %request_id,
                        "Handler error on {} {} (unhandled): {}",
                        method,
                        path,
                        err
                    );
                }
            }

            result
        })
    }
}
