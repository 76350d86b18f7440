use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::principal::Principal;

/// 인증 모드를 정의하는 열거형
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 주체가 반드시 필요함
    Required,
    /// 주체가 선택사항임 (익명 허용)
    Optional,
}

/// 요구되는 역할 정보
#[derive(Debug, Clone, PartialEq)]
pub enum RequiredRole {
    /// 특정 단일 역할이 필요
    Single(String),
    /// 여러 역할 중 하나라도 있으면 허용 (OR 조건)
    Any(Vec<String>),
}

impl RequiredRole {
    /// 사용자 역할이 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        match self {
            RequiredRole::Single(required_role) => user_roles.contains(required_role),
            RequiredRole::Any(required_roles) => {
                required_roles.iter().any(|role| user_roles.contains(role))
            }
        }
    }
}

/// 라우트/스코프 접근 요구사항
///
/// 미들웨어([`crate::middlewares::RoleGate`])와 동적 라우트 렌더러가 같은 규칙으로
/// 주체를 검사하도록 공유합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessRequirement {
    pub mode: AuthMode,
    pub role: Option<RequiredRole>,
}

impl AccessRequirement {
    /// 누구나 접근 가능
    pub fn open() -> Self {
        Self {
            mode: AuthMode::Optional,
            role: None,
        }
    }

    /// 모듈 라우트 선언에서 요구사항을 만듭니다.
    ///
    /// - `roles`가 비어있지 않음 → 주체 필수 + 역할 중 하나
    /// - `protected`만 설정 → 주체 필수
    /// - 그 외 → 보호 없음
    pub fn for_route(protected: bool, roles: &[String]) -> Self {
        let role = match roles {
            [] => None,
            [single] => Some(RequiredRole::Single(single.clone())),
            many => Some(RequiredRole::Any(many.to_vec())),
        };

        if role.is_some() || protected {
            Self {
                mode: AuthMode::Required,
                role,
            }
        } else {
            Self::open()
        }
    }

    /// 주체가 요구사항을 만족하는지 검사합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 필수 모드인데 주체가 없음
    /// * `AppError::AuthorizationError` - 역할 요구사항 불충족
    pub fn check(&self, principal: Option<&Principal>) -> AppResult<()> {
        if self.mode == AuthMode::Optional {
            return Ok(());
        }

        let principal = principal.ok_or_else(|| {
            AppError::AuthenticationError("이 경로에는 인증된 주체가 필요합니다".to_string())
        })?;

        match &self.role {
            Some(required) if !required.is_satisfied(&principal.roles) => {
                Err(AppError::AuthorizationError(format!(
                    "접근 권한이 부족합니다: {:?}",
                    required
                )))
            }
            _ => Ok(()),
        }
    }
}
