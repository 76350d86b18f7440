//! 관리자 모듈 허브
//!
//! 독립적으로 작성된 기능 모듈(온보딩, ConnectIQ CRM, 급여 배치, ACH, 케이스 관리 등)을
//! 하나의 관리자 애플리케이션으로 조합하는 백엔드 서비스입니다. 각 모듈은 디스크립터로
//! 자신을 선언하고, 모듈 레지스트리가 로드 상태와 접근 권한에 따라 라우트와 메뉴를
//! 집계해 렌더러에게 제공합니다.
//!
//! # Features
//!
//! - **모듈 레지스트리**: 등록, 비동기 로드/해제, 접근 권한, 라우트/메뉴 집계
//! - **동시 로드 공유**: 같은 모듈의 동시 로드는 하나의 `initialize`를 함께 기다림
//! - **준비 신호**: 상태 변경을 구독하는 렌더러, 제한 시간 후 강제 개방
//! - **동적 라우트**: 경로 접두사별 라우트 테이블과 역할 기반 라우트 보호
//! - **카탈로그 / 네비게이션**: 상태 배지, 역할로 걸러진 메뉴 트리
//! - **관리 API**: 런타임 로드/해제와 권한 변경
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/v1/*, /admin/*, /superadmin/*, /portal/*
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 관리 API, 카탈로그, 네비게이션, 동적 렌더링
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Renderers    │ ← 준비 게이트, 접두사별 라우트 테이블
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ModuleRegistry  │ ← 디스크립터, 로드 상태, 접근 권한
//! └─────────────────┘
//!          ▲
//!          │
//! ┌─────────────────┐
//! │    Bootstrap    │ ← 내장 모듈 명시적 등록 + 계획 실행
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use admin_module_hub::bootstrap::{run_bootstrap, BootstrapPlan};
//! use admin_module_hub::core::registry::ModuleRegistry;
//! use admin_module_hub::modules::builtin_modules;
//!
//! let registry = Arc::new(ModuleRegistry::new());
//! let report = run_bootstrap(&registry, builtin_modules(), &BootstrapPlan::from_env()).await;
//!
//! for route in registry.get_all_routes() {
//!     println!("{} → {}", route.module_id, route.route.path);
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod core;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod modules;
pub mod renderer;
pub mod routes;
pub mod utils;
