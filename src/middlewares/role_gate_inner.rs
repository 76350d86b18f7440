//! RoleGate 검사 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::{AccessRequirement, Principal};

/// 실제 역할 검사를 수행하는 서비스
pub struct RoleGateService<S> {
    pub service: Rc<S>,
    pub requirement: AccessRequirement,
}

impl<S, B> Service<ServiceRequest> for RoleGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let requirement = self.requirement.clone();

        Box::pin(async move {
            let principal = Principal::from_headers(req.headers());

            if let Err(err) = requirement.check(principal.as_ref()) {
                log::warn!(
                    "🚫 접근 거부: {} {} ({})",
                    req.method(),
                    req.path(),
                    err
                );
                let response = err.error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            if let Some(principal) = principal {
                log::debug!("주체 확인: {} {:?}", principal.user_id, principal.roles);
                req.extensions_mut().insert(principal);
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
