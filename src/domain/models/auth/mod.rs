//! 주체(principal)와 접근 요구사항 모델

pub mod access_requirement;
pub mod principal;

pub use access_requirement::{AccessRequirement, AuthMode, RequiredRole};
pub use principal::{OptionalPrincipal, Principal};
