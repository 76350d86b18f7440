//! API 라우트 설정 모듈
//!
//! 관리 API, 카탈로그, 네비게이션, 헬스체크와 접두사별 동적 모듈 라우트를 등록합니다.
//!
//! # Route Groups
//!
//! | 스코프 | 내용 | 접근 제어 |
//! |--------|------|-----------|
//! | `/health` | 서비스 및 레지스트리 상태 | - |
//! | `/api/v1/modules` | 레지스트리 관리 API | 변경 작업은 `RoleGate::admin()` |
//! | `/api/v1/catalog` | 모듈 카탈로그 | 레지스트리 접근 권한 |
//! | `/api/v1/navigation` | 역할로 걸러진 메뉴 | 메뉴 항목 `required_roles` |
//! | `ROUTE_PREFIXES` 각각 | 동적 모듈 라우트 | 라우트 `protected` / `roles` |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let renderers: Vec<web::Data<DynamicRouteRenderer>> = /* main.rs 참고 */;
//! let app = App::new().configure(|cfg| configure_all_routes(cfg, &renderers));
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::config::Environment;
use crate::core::registry::ModuleRegistry;
use crate::domain::dto::catalog::CATALOG_PATH;
use crate::handlers;
use crate::renderer::DynamicRouteRenderer;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
/// * `renderers` - 접두사별 동적 라우트 렌더러 (등록 순서대로 스코프 생성)
pub fn configure_all_routes(
    cfg: &mut web::ServiceConfig,
    renderers: &[web::Data<DynamicRouteRenderer>],
) {
    // Health check endpoint
    cfg.service(health_check);

    configure_module_routes(cfg);
    configure_catalog_routes(cfg);
    configure_navigation_routes(cfg);
    configure_dynamic_routes(cfg, renderers);
}

/// 레지스트리 관리 라우트를 설정합니다
///
/// 고정 경로(`/accessible`, `/status`, `/routes`, `/menu`)는 `/{id}`보다 먼저 등록합니다.
///
/// ```bash
/// # 조회 - 인증 불필요
/// curl http://localhost:8080/api/v1/modules?category=payroll
///
/// # 변경 - admin 또는 super_admin 역할 필요
/// curl -X PUT http://localhost:8080/api/v1/modules/payroll/access \
///   -H "X-Principal-Id: ops-1" -H "X-Principal-Roles: admin" \
///   -H "Content-Type: application/json" -d '{"granted": true}'
/// ```
fn configure_module_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/modules")
            .service(handlers::modules::list_modules)
            .service(handlers::modules::list_accessible_modules)
            .service(handlers::modules::registry_status)
            .service(handlers::modules::list_routes)
            .service(handlers::modules::list_menu)
            .service(handlers::modules::get_module)
            .service(handlers::modules::load_module)
            .service(handlers::modules::unload_module)
            .service(handlers::modules::set_module_access),
    );
}

fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(CATALOG_PATH)
            .service(handlers::catalog::list_catalog)
            .service(handlers::catalog::select_module),
    );
}

fn configure_navigation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/navigation").service(handlers::navigation::navigation));
}

/// 접두사마다 스코프를 만들고, 스코프 전체를 동적 렌더러에 위임합니다.
fn configure_dynamic_routes(
    cfg: &mut web::ServiceConfig,
    renderers: &[web::Data<DynamicRouteRenderer>],
) {
    for renderer in renderers {
        cfg.service(
            web::scope(renderer.prefix())
                .app_data(renderer.clone())
                .default_service(web::to(handlers::dynamic::render_dynamic_route)),
        );
    }
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 레지스트리가 아직 준비되지 않았어도 200을 반환하며, `registry.ready`로 구분합니다.
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "admin_module_hub",
///   "version": "0.1.0",
///   "environment": "production",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "registry": { "ready": true, "initialized": true, "loading": 0, "loaded": 6, "registered": 7, "revision": 31 }
/// }
/// ```
#[get("/health")]
async fn health_check(registry: web::Data<ModuleRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": Environment::current().as_str(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "registry": registry.status(),
    }))
}
