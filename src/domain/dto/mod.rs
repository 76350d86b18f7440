//! # Data Transfer Objects
//!
//! HTTP API 계약을 정의하는 요청/응답 객체입니다.
//! 레지스트리의 디스크립터를 그대로 노출하지 않고, 화면과 관리 도구가
//! 필요로 하는 형태로 변환합니다.
//!
//! - [`modules`] - 레지스트리 관리 API (`/api/v1/modules`)
//! - [`catalog`] - 모듈 카탈로그 (`/api/v1/catalog`)

pub mod catalog;
pub mod modules;

pub use catalog::*;
pub use modules::*;
