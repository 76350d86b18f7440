//! # Domain Models
//!
//! 외부 협력자와 맞닿는 모델입니다. 현재 주체의 역할은 상위 인증/세션 게이트웨이가
//! 제공하며, 이 서비스는 역할 문자열을 비교하는 용도로만 사용합니다.

pub mod auth;
