//! # Dynamic Module Route Handler
//!
//! 각 경로 접두사 스코프의 `default_service`로 등록되어, 요청 경로를 레지스트리가
//! 노출한 모듈 라우트로 해석하고 해당 컴포넌트를 렌더링합니다.
//!
//! ## 처리 순서
//!
//! ```text
//! 1. 준비 게이트 닫힘          → 503 {"status":"loading"} + Retry-After
//! 2. 매칭되는 라우트 없음       → 404 (빈 본문)
//! 3. 라우트 역할 검사 실패      → 401 / 403
//! 4. 컴포넌트 해석 + 렌더링     → 200 {"module_id", "route", "params", "tail", "view"}
//! ```

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use log::debug;
use serde_json::json;

use crate::core::component::RenderContext;
use crate::core::errors::AppError;
use crate::domain::models::auth::{AccessRequirement, OptionalPrincipal};
use crate::renderer::DynamicRouteRenderer;

/// 준비 전 응답의 재시도 대기 시간 (초)
const RETRY_AFTER_SECS: &str = "1";

pub async fn render_dynamic_route(
    req: HttpRequest,
    renderer: web::Data<DynamicRouteRenderer>,
    principal: OptionalPrincipal,
) -> Result<HttpResponse, AppError> {
    if !renderer.is_ready() {
        return Ok(HttpResponse::ServiceUnavailable()
            .insert_header((header::RETRY_AFTER, RETRY_AFTER_SECS))
            .json(json!({ "status": "loading" })));
    }

    let relative = req.path().strip_prefix(renderer.prefix()).unwrap_or_default();
    let Some(matched) = renderer.resolve(relative) else {
        debug!("일치하는 모듈 라우트 없음: {}", req.path());
        return Ok(HttpResponse::NotFound().finish());
    };

    AccessRequirement::for_route(matched.route.protected, &matched.route.roles)
        .check(principal.0.as_ref())?;

    let component = matched.route.component.resolve().await?;
    let ctx = RenderContext {
        module_id: matched.module_id,
        route_path: matched.route.path,
        params: matched.params,
        tail: matched.tail,
        principal: principal.0,
    };
    let view = component.render(&ctx).await?;

    Ok(HttpResponse::Ok().json(json!({
        "module_id": ctx.module_id,
        "route": ctx.route_path,
        "params": ctx.params,
        "tail": ctx.tail,
        "view": view,
    })))
}
