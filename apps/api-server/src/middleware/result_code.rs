//! Status propagation - the HTTP status of an envelope response is
//! whatever its result code says.
//!
//! Handlers return [`Envelope`]s with the default 200 status and a
//! [`ResultCode`] tag in the response extensions. [`ResultCodeStatus`] is
//! the single interception point that turns the tag into the real status,
//! so no handler ever sets a status by hand.

use actix_web::{
    Error, HttpRequest, HttpResponse, Responder,
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::StatusCode,
};
use postboard_shared::ApiResponse;
use postboard_shared::response::status_of;
use serde::Serialize;
use std::future::{Future, Ready, ready};
use std::pin::Pin;

/// Result code carried by an envelope response.
#[derive(Debug, Clone)]
pub struct ResultCode(pub String);

impl ResultCode {
    /// HTTP status named by the leading segment, if it is a valid status.
    pub fn status(&self) -> Option<StatusCode> {
        status_of(&self.0).and_then(|code| StatusCode::from_u16(code).ok())
    }
}

/// Handler return type for envelope responses.
#[derive(Debug)]
pub struct Envelope<T>(pub ApiResponse<T>);

impl<T> From<ApiResponse<T>> for Envelope<T> {
    fn from(body: ApiResponse<T>) -> Self {
        Self(body)
    }
}

impl<T: Serialize> Responder for Envelope<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let tag = ResultCode(self.0.result_code.clone());
        let mut res = HttpResponse::Ok().json(&self.0);
        res.extensions_mut().insert(tag);
        res
    }
}

/// Middleware rewriting the status of every tagged response.
/// Untagged responses keep the status their handler gave them.
pub struct ResultCodeStatus;

impl<S, B> Transform<S, ServiceRequest> for ResultCodeStatus
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ResultCodeStatusService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ResultCodeStatusService { service }))
    }
}

pub struct ResultCodeStatusService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ResultCodeStatusService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            let tag = res.response().extensions().get::<ResultCode>().cloned();
            if let Some(tag) = tag {
                match tag.status() {
                    Some(status) => *res.response_mut().status_mut() = status,
                    None => tracing::warn!(
                        result_code = %tag.0,
                        "Result code has no valid status; keeping {}",
                        res.status()
                    ),
                }
            }

            Ok(res)
        })
    }
}
