//! # Renderers
//!
//! 레지스트리 상태를 HTTP 표면으로 옮기는 소비자들입니다.
//!
//! - [`readiness`] - 레지스트리 준비 신호를 기다리는 게이트 (제한 시간 후 강제 개방)
//! - [`route_table`] - 접두사별 동적 라우트 매칭

pub mod readiness;
pub mod route_table;

pub use readiness::ReadinessGate;
pub use route_table::{mount_path, DynamicRouteRenderer, MountedRoute, RouteMatch};
