//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 역할 게이트 (RoleGate)
//! - `X-Principal-Id` / `X-Principal-Roles` 헤더에서 주체 추출
//! - 필수/선택 모드와 역할 요구사항 검사
//! - 통과한 주체를 request extension에 저장
//!
//! 동적 모듈 라우트는 라우트마다 요구 역할이 다르므로 미들웨어가 아닌 렌더러가
//! 같은 [`AccessRequirement`](crate::domain::models::auth::AccessRequirement)로 직접 검사합니다.
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::RoleGate;
//!
//! App::new().service(
//!     web::scope("/api/v1/modules")
//!         .route("", web::get().to(list_modules))
//!         .service(
//!             web::resource("/{id}/load")
//!                 .wrap(RoleGate::admin())
//!                 .route(web::post().to(load_module)),
//!         ),
//! );
//! ```

mod role_gate_inner;
pub mod role_gate;

pub use role_gate::{RoleGate, ADMIN_ROLES};
