//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 목록 분리, 경로 접두사 정규화
//! - [`display_terminal`] - 부트스트랩 터미널 출력 포맷팅 함수들

pub mod display_terminal;
pub mod string_utils;
