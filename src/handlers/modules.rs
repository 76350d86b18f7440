//! # Module Registry Admin Handlers
//!
//! 레지스트리를 조회하고 조작하는 관리 API 핸들러입니다.
//!
//! | 메서드 | 경로 | 설명 | 권한 |
//! |--------|------|------|------|
//! | `GET` | `/api/v1/modules` | 등록된 모든 모듈 (`?category=`) | - |
//! | `GET` | `/api/v1/modules/accessible` | 접근 권한이 있는 모듈 | - |
//! | `GET` | `/api/v1/modules/status` | 레지스트리 상태 스냅샷 | - |
//! | `GET` | `/api/v1/modules/routes` | 집계된 라우트 | - |
//! | `GET` | `/api/v1/modules/menu` | 집계된 메뉴 | - |
//! | `GET` | `/api/v1/modules/{id}` | 단일 모듈 요약 | - |
//! | `POST` | `/api/v1/modules/{id}/load` | 모듈 로드 (선택적 설정 본문) | admin, super_admin |
//! | `POST` | `/api/v1/modules/{id}/unload` | 모듈 해제 | admin, super_admin |
//! | `PUT` | `/api/v1/modules/{id}/access` | 접근 권한 설정 | admin, super_admin |
//!
//! 레지스트리의 `bool` 결과는 `409 Conflict`로 변환되며, 실제 원인은 레지스트리 로그에 남습니다.

use actix_web::{get, post, put, web, HttpResponse};
use log::info;

use crate::core::descriptor::ModuleCategory;
use crate::core::errors::AppError;
use crate::core::registry::ModuleRegistry;
use crate::domain::dto::modules::{
    LoadModuleRequest, ModuleListQuery, ModuleStateResponse, ModuleSummary, SetAccessRequest,
};
use crate::domain::models::auth::Principal;
use crate::middlewares::RoleGate;
use crate::utils::string_utils::validate_required_string;

/// 등록된 id 를 검증합니다.
fn require_module(registry: &ModuleRegistry, raw_id: &str) -> Result<String, AppError> {
    let id = validate_required_string(raw_id, "module id")?;
    if registry.get_module(&id).is_none() {
        return Err(AppError::NotFound(format!("Module {} not found", id)));
    }
    Ok(id)
}

#[get("")]
pub async fn list_modules(
    registry: web::Data<ModuleRegistry>,
    query: web::Query<ModuleListQuery>,
) -> Result<HttpResponse, AppError> {
    let modules = match query.category.as_deref() {
        Some(raw) => registry.get_modules_by_category(raw.parse::<ModuleCategory>()?),
        None => registry.get_all_modules(),
    };

    let summaries: Vec<ModuleSummary> = modules
        .iter()
        .map(|descriptor| ModuleSummary::from_registry(&registry, descriptor))
        .collect();
    Ok(HttpResponse::Ok().json(summaries))
}

#[get("/accessible")]
pub async fn list_accessible_modules(registry: web::Data<ModuleRegistry>) -> HttpResponse {
    let summaries: Vec<ModuleSummary> = registry
        .get_accessible_modules()
        .iter()
        .map(|descriptor| ModuleSummary::from_registry(&registry, descriptor))
        .collect();
    HttpResponse::Ok().json(summaries)
}

#[get("/status")]
pub async fn registry_status(registry: web::Data<ModuleRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.status())
}

#[get("/routes")]
pub async fn list_routes(registry: web::Data<ModuleRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.get_all_routes())
}

/// 역할 필터 없이 집계된 전체 메뉴 (관리 도구용)
#[get("/menu")]
pub async fn list_menu(registry: web::Data<ModuleRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.get_all_menu_items())
}

#[get("/{id}")]
pub async fn get_module(
    registry: web::Data<ModuleRegistry>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = require_module(&registry, &id)?;
    let descriptor = registry
        .get_module(&id)
        .ok_or_else(|| AppError::NotFound(format!("Module {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ModuleSummary::from_registry(&registry, &descriptor)))
}

/// 모듈을 로드합니다. 본문의 `config`가 없으면 디스크립터 기본 설정을 사용합니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/modules/ach/load \
///   -H "X-Principal-Id: ops-1" -H "X-Principal-Roles: admin" \
///   -H "Content-Type: application/json" \
///   -d '{"config": {"odfi_routing_number": "021000021"}}'
/// ```
#[post("/{id}/load", wrap = "RoleGate::admin()")]
pub async fn load_module(
    registry: web::Data<ModuleRegistry>,
    id: web::Path<String>,
    payload: Option<web::Json<LoadModuleRequest>>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let id = require_module(&registry, &id)?;
    let config = payload.and_then(|body| body.into_inner().config);

    info!("📥 모듈 로드 요청: {} (요청자: {})", id, principal.user_id);

    if !registry.load_module(&id, config).await {
        return Err(AppError::ConflictError(format!(
            "Module {} could not be loaded (loaded=false)",
            id
        )));
    }
    Ok(HttpResponse::Ok().json(ModuleStateResponse::of(&registry, &id)))
}

#[post("/{id}/unload", wrap = "RoleGate::admin()")]
pub async fn unload_module(
    registry: web::Data<ModuleRegistry>,
    id: web::Path<String>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let id = require_module(&registry, &id)?;
    info!("📤 모듈 해제 요청: {} (요청자: {})", id, principal.user_id);

    if !registry.unload_module(&id).await {
        return Err(AppError::ConflictError(format!(
            "Module {} could not be unloaded (unloaded=false)",
            id
        )));
    }
    Ok(HttpResponse::Ok().json(ModuleStateResponse::of(&registry, &id)))
}

#[put("/{id}/access", wrap = "RoleGate::admin()")]
pub async fn set_module_access(
    registry: web::Data<ModuleRegistry>,
    id: web::Path<String>,
    payload: web::Json<SetAccessRequest>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let id = require_module(&registry, &id)?;
    registry.set_module_access(&id, payload.granted);
    info!(
        "🔐 모듈 접근 권한 변경: {} = {} (요청자: {})",
        id, payload.granted, principal.user_id
    );

    Ok(HttpResponse::Ok().json(ModuleStateResponse::of(&registry, &id)))
}
