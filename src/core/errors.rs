//! # Application Error Handling System
//!
//! 모듈 허브 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! 레지스트리 내부 실패(모듈 초기화/해제 실패)와 HTTP 계층의 실패(인증, 권한,
//! 존재하지 않는 모듈)를 하나의 `AppError` 열거형으로 표현합니다.
//!
//! ## 설계 원칙
//!
//! ### 1. 레지스트리는 에러를 던지지 않는다
//! - 라이프사이클 훅(`initialize`, `destroy`)은 `AppResult<()>`를 반환합니다.
//! - 레지스트리는 이 결과를 로그로 남긴 뒤 `bool`로만 호출자에게 알립니다.
//!
//! ### 2. 자동 HTTP 응답 변환
//! - `actix_web::ResponseError` 구현으로 핸들러에서 `?`만 사용하면 됩니다.
//! - 모든 에러 응답은 `{"error": "..."}` 형식을 따릅니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 잘못된 요청 본문, 잘못된 카테고리 |
//! | `NotFound` | 404 Not Found | 등록되지 않은 모듈, 접근 불가 모듈 |
//! | `ConflictError` | 409 Conflict | 모듈 로드/언로드 실패 |
//! | `AuthenticationError` | 401 Unauthorized | 주체(principal) 정보 없음 |
//! | `AuthorizationError` | 403 Forbidden | 역할 불일치 |
//! | `InitializationError` | 500 Internal Server Error | 모듈 `initialize`/`destroy` 실패 |
//! | `ConfigError` | 500 Internal Server Error | 잘못된 환경 설정 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 구현하여
/// HTTP 응답으로 자동 변환됩니다.
///
/// ## 에러 카테고리
///
/// ### 1. 요청 계층 에러
/// - `ValidationError`: 입력값 검증 실패
/// - `NotFound`: 요청된 모듈이 존재하지 않거나 노출되지 않음
/// - `ConflictError`: 레지스트리 상태 전이 실패
///
/// ### 2. 보안 계층 에러
/// - `AuthenticationError`: 주체 정보가 없음
/// - `AuthorizationError`: 역할 요구사항 불충족
///
/// ### 3. 모듈/시스템 계층 에러
/// - `InitializationError`: 모듈 라이프사이클 훅 실패
/// - `ConfigError`: 환경 설정 파싱 실패
/// - `InternalError`: 예상하지 못한 시스템 오류
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    ///
    /// # 예제
    /// ```rust,ignore
    /// let descriptor = registry.get_module(&id)
    ///     .ok_or_else(|| AppError::NotFound(format!("Module {} not found", id)))?;
    /// ```
    #[error("Not found: {0}")]
    NotFound(String),

    /// 상태 전이 충돌 에러 (409 Conflict)
    ///
    /// 관리 API에서 `load_module`/`unload_module`이 `false`를 반환했을 때 사용됩니다.
    /// 실제 원인은 레지스트리 로그에 남습니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 모듈 라이프사이클 훅 실패 (500 Internal Server Error)
    ///
    /// # 예제
    /// ```rust,ignore
    /// #[async_trait]
    /// impl ModuleLifecycle for PayrollLifecycle {
    ///     async fn initialize(&self, config: &ModuleConfig) -> AppResult<()> {
    ///         if !config.contains_key("batch_window") {
    ///             return Err(AppError::InitializationError(
    ///                 "batch_window is required".to_string()
    ///             ));
    ///         }
    ///         Ok(())
    ///     }
    /// }
    /// ```
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// 설정 에러 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// # 응답 형식
    ///
    /// ```json
    /// {
    ///   "error": "Not found: Module payroll not found"
    /// }
    /// ```
    ///
    /// # 상태 코드 매핑
    ///
    /// - `ValidationError` → 400 Bad Request
    /// - `NotFound` → 404 Not Found
    /// - `ConflictError` → 409 Conflict
    /// - `AuthenticationError` → 401 Unauthorized
    /// - `AuthorizationError` → 403 Forbidden
    /// - 나머지 모든 에러 → 500 Internal Server Error
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
///
/// ```rust,ignore
/// use crate::core::errors::AppResult;
///
/// async fn initialize(&self, config: &ModuleConfig) -> AppResult<()> {
///     // 구현...
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Unknown category".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Module payroll not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("Module ach failed to load".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_security_error_responses() {
        let unauthenticated = AppError::AuthenticationError("No principal".to_string());
        let forbidden = AppError::AuthorizationError("Role admin required".to_string());

        assert_eq!(unauthenticated.error_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_module_failures_are_internal() {
        let init = AppError::InitializationError("connector offline".to_string());
        let config = AppError::ConfigError("PORT is not a number".to_string());

        assert_eq!(init.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
