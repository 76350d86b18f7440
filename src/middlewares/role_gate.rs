//! 역할 기반 접근 제어 미들웨어
//!
//! 상위 게이트웨이가 전달한 주체 헤더를 읽어 스코프/리소스 단위로 역할을 검사합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::AccessRequirement;
use crate::middlewares::role_gate_inner::RoleGateService;

/// 관리 API 변경 작업에 필요한 역할
pub const ADMIN_ROLES: [&str; 2] = ["admin", "super_admin"];

/// 역할 게이트 미들웨어
pub struct RoleGate {
    requirement: AccessRequirement,
}

impl RoleGate {
    pub fn new(requirement: AccessRequirement) -> Self {
        Self { requirement }
    }

    /// 레지스트리 변경 작업용 (`admin` 또는 `super_admin`)
    pub fn admin() -> Self {
        let roles: Vec<String> = ADMIN_ROLES.iter().map(|role| role.to_string()).collect();
        Self::new(AccessRequirement::for_route(true, &roles))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RoleGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGateService {
            service: Rc::new(service),
            requirement: self.requirement.clone(),
        }))
    }
}
