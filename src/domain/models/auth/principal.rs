use std::future::{ready, Ready};

use actix_web::http::header::HeaderMap;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;
use crate::utils::string_utils::split_list;

/// 주체 ID 헤더 (상위 인증/세션 게이트웨이가 설정)
pub const PRINCIPAL_ID_HEADER: &str = "X-Principal-Id";
/// 쉼표로 구분된 역할 목록 헤더
pub const PRINCIPAL_ROLES_HEADER: &str = "X-Principal-Roles";

/// 현재 요청의 주체
///
/// 역할의 출처는 외부 인증/세션 협력자이며, 이 서비스는 역할 문자열을
/// 라우트/메뉴의 역할 요구사항과 비교하는 용도로만 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// 주체 고유 ID
    pub user_id: String,

    /// 역할 목록
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(user_id: &str, roles: &[&str]) -> Self {
        Self {
            user_id: user_id.to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
        }
    }

    /// 요청 헤더에서 주체를 읽습니다. ID 헤더가 없거나 비어있으면 익명(None)입니다.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let user_id = headers
            .get(PRINCIPAL_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())?;

        let roles = headers
            .get(PRINCIPAL_ROLES_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(split_list)
            .unwrap_or_default();

        Some(Self {
            user_id: user_id.to_string(),
            roles,
        })
    }

    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// 여러 역할 중 하나라도 보유하고 있는지 확인
    pub fn has_any_role(&self, roles: &[String]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }
}

/// ActixWeb FromRequest trait 구현 (주체 필수)
///
/// [`RoleGate`](crate::middlewares::RoleGate)가 request extension에 저장한 주체를 우선
/// 사용하고, 없으면 헤더에서 읽습니다.
impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let principal = req
            .extensions()
            .get::<Principal>()
            .cloned()
            .or_else(|| Principal::from_headers(req.headers()));

        match principal {
            Some(principal) => ready(Ok(principal)),
            None => ready(Err(AppError::AuthenticationError(
                "주체 정보가 없는 요청입니다".to_string(),
            )
            .into())),
        }
    }
}

/// 선택적 주체 추출자
#[derive(Debug, Clone, Default)]
pub struct OptionalPrincipal(pub Option<Principal>);

impl OptionalPrincipal {
    pub fn roles(&self) -> &[String] {
        self.0.as_ref().map(|p| p.roles.as_slice()).unwrap_or(&[])
    }
}

impl FromRequest for OptionalPrincipal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(OptionalPrincipal(Principal::from_headers(req.headers()))))
    }
}
