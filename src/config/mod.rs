//! # Configuration Module
//!
//! 모듈 허브의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리
//!
//! `PROFILE`에 따라 `.env.dev` / `.env.prod` 파일을 로드하고 (`main.rs`),
//! `ENVIRONMENT`로 실행 환경을 구분합니다.
//!
//! ### 2. 안전한 기본값
//!
//! 모든 설정은 기본값을 가지며, 파싱 실패 시 기본값으로 돌아갑니다.
//! 파싱 로직은 `parse_*` 순수 함수로 분리되어 있습니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export WORKERS="4"
//!
//! # 요청 제한
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//!
//! # 레지스트리 / 동적 라우트
//! export READINESS_TIMEOUT_MS="5000"
//! export ROUTE_PREFIXES="/admin,/superadmin,/portal"
//!
//! # 부트스트랩 (미설정 시 모든 내장 모듈)
//! export BOOTSTRAP_MODULES="onboarding,connect_iq,payroll,ach,case_management,reporting,tenant_admin"
//! export GRANTED_MODULES="onboarding,connect_iq,payroll,ach,case_management"
//!
//! # CORS
//! export CORS_ALLOWED_ORIGINS="https://admin.example.com"
//! ```

pub mod app_config;

pub use app_config::*;
