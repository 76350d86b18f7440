//! # Core Framework Module
//!
//! 모듈 허브의 핵심 기능을 제공하는 모듈입니다.
//! 기능 모듈 선언(디스크립터), 레지스트리, 지연 컴포넌트, 통합 에러 타입을 포함합니다.
//!
//! ## 모듈 구성
//!
//! ### [`descriptor`] - 기능 모듈 선언
//! - **ModuleDescriptor**: 메타데이터 + 라우트 + 메뉴 + 라이프사이클 훅
//! - **ModuleLifecycle**: `initialize` / `destroy` 비동기 훅
//!
//! ### [`registry`] - 모듈 레지스트리
//! - **ModuleRegistry**: 등록/로드/접근 권한/집계의 단일 진실 공급원
//! - **RegistryStatus**: 상태 변경 발행 (publish/subscribe)
//!
//! ### [`registration`] - 등록 헬퍼
//! - **register_module**: 등록 후 디스크립터를 그대로 반환
//!
//! ### [`component`] - 지연 컴포넌트
//! - **LazyComponent**: "준비되었으면 동기 반환, 아니면 대기" 핸들
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입, Actix-Web `ResponseError` 구현
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::registry::ModuleRegistry;
//! use crate::bootstrap::{run_bootstrap, BootstrapPlan};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     // 1. 레지스트리 생성 (전역 싱글톤이 아닌 명시적 컨텍스트)
//!     let registry = Arc::new(ModuleRegistry::new());
//!
//!     // 2. 내장 모듈 등록, 로드, 접근 권한 부여
//!     run_bootstrap(&registry, modules::builtin_modules(), &BootstrapPlan::from_env()).await;
//!
//!     // 3. 웹 서버 시작
//!     HttpServer::new(move || {
//!         App::new().app_data(web::Data::from(Arc::clone(&registry)))
//!     })
//!     .bind("0.0.0.0:8080")?
//!     .run()
//!     .await
//! }
//! ```

pub mod component;
pub mod descriptor;
pub mod errors;
pub mod registration;
pub mod registry;

pub use errors::*;
pub use registration::register_module;
pub use registry::{ModuleRegistry, ModuleRoute, RegistryStatus};
