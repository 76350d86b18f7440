//! # Domain Layer Module
//!
//! 레지스트리 바깥에서 사용하는 도메인 타입을 모아둔 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── models   - 주체(principal), 접근 요구사항
//! └── dto      - 관리 API / 카탈로그 응답 객체
//!      │
//!      ▼
//! Core (ModuleRegistry, ModuleDescriptor)
//! ```

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
