//! # Module Catalog Handlers
//!
//! 접근 권한이 있는 모듈을 카드 그리드로 보여주고, 하나를 선택하면 해당 모듈의
//! 루트 컴포넌트를 렌더링합니다. 선택 상태는 저장하지 않습니다.

use actix_web::{get, web, HttpResponse};
use log::debug;

use crate::core::component::RenderContext;
use crate::core::errors::AppError;
use crate::core::registry::ModuleRegistry;
use crate::domain::dto::catalog::{CatalogDetail, CatalogEntry, CatalogLink, CATALOG_PATH};
use crate::domain::models::auth::OptionalPrincipal;

/// `GET /api/v1/catalog`
#[get("")]
pub async fn list_catalog(registry: web::Data<ModuleRegistry>) -> HttpResponse {
    let entries: Vec<CatalogEntry> = registry
        .get_accessible_modules()
        .iter()
        .map(|descriptor| CatalogEntry::from_descriptor(descriptor, registry.is_module_loaded(&descriptor.id)))
        .collect();

    HttpResponse::Ok().json(entries)
}

/// `GET /api/v1/catalog/{id}`
///
/// 등록되지 않았거나 접근 권한이 없는 모듈은 404 입니다.
/// 루트 컴포넌트가 없으면 `component: null`인 상세 화면을 반환합니다.
#[get("/{id}")]
pub async fn select_module(
    registry: web::Data<ModuleRegistry>,
    id: web::Path<String>,
    principal: OptionalPrincipal,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let descriptor = registry
        .get_module(&id)
        .filter(|descriptor| registry.has_module_access(&descriptor.id))
        .ok_or_else(|| AppError::NotFound(format!("Module {} not found in catalog", id)))?;

    let component = match descriptor.get_component() {
        Some(lazy) => {
            debug!("카탈로그 컴포넌트 마운트: {} ({})", id, lazy.name());
            let ctx = RenderContext {
                module_id: descriptor.id.clone(),
                route_path: format!("{}/{}", CATALOG_PATH, descriptor.id),
                principal: principal.0,
                ..RenderContext::default()
            };
            let component = lazy.resolve().await?;
            Some(component.render(&ctx).await?)
        }
        None => None,
    };

    Ok(HttpResponse::Ok().json(CatalogDetail {
        module: CatalogEntry::from_descriptor(&descriptor, registry.is_module_loaded(&descriptor.id)),
        component,
        back: CatalogLink::default(),
    }))
}
