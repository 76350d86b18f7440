//! # HTTP Request Handlers Module
//!
//! 레지스트리를 HTTP 표면으로 노출하는 핸들러 함수들입니다.
//! 모든 핸들러는 `web::Data<ModuleRegistry>`로 레지스트리를 주입받습니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (관리 콘솔, 포털, 운영 도구)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                             ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Renderers - 접두사별 라우트 테이블, 준비 게이트   ← Composition Layer
//! ├─────────────────────────────────────────────┤
//!   ModuleRegistry - 등록/로드/접근 권한/집계        ← Core
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`modules`**: 레지스트리 관리 API (`/api/v1/modules`)
//! - **`catalog`**: 모듈 카탈로그 (`/api/v1/catalog`)
//! - **`navigation`**: 역할로 걸러진 메뉴 (`/api/v1/navigation`)
//! - **`dynamic`**: 접두사 스코프의 동적 모듈 라우트 (`/admin/*`, `/portal/*` ...)
//!
//! ## 에러 처리
//!
//! 핸들러는 `Result<HttpResponse, AppError>`를 반환하고 `?`로 에러를 전파합니다.
//! `AppError`의 `ResponseError` 구현이 상태 코드와 `{"error": "..."}` 본문을 만듭니다.

pub mod catalog;
pub mod dynamic;
pub mod modules;
pub mod navigation;
