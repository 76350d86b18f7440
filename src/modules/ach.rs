//! ACH 지급 파일 모듈
//!
//! 급여 배치에서 NACHA 파일을 생성하는 모듈로, `payroll`에 대한 의존성을 선언합니다.
//! 초기화 시 송금 은행(ODFI) ABA 라우팅 번호의 체크섬을 검증합니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use serde_json::json;

use crate::core::descriptor::{
    MenuItem, ModuleCategory, ModuleConfig, ModuleDescriptor, ModuleLifecycle, RouteDefinition,
};
use crate::core::errors::{AppError, AppResult};
use crate::modules::payroll;
use crate::modules::views::ModuleView;

pub const MODULE_ID: &str = "ach";

/// ABA 라우팅 번호 검증
///
/// 9자리 숫자이며 `3(d1+d4+d7) + 7(d2+d5+d8) + (d3+d6+d9)`가 10의 배수여야 합니다.
pub fn is_valid_routing_number(routing: &str) -> bool {
    if routing.len() != 9 {
        return false;
    }

    let digits: Option<Vec<u32>> = routing.chars().map(|c| c.to_digit(10)).collect();
    let Some(d) = digits else {
        return false;
    };

    let checksum = 3 * (d[0] + d[3] + d[6]) + 7 * (d[1] + d[4] + d[7]) + (d[2] + d[5] + d[8]);
    checksum % 10 == 0
}

struct AchLifecycle;

#[async_trait]
impl ModuleLifecycle for AchLifecycle {
    async fn initialize(&self, config: &ModuleConfig) -> AppResult<()> {
        let routing = config
            .get("odfi_routing_number")
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                AppError::InitializationError("odfi_routing_number 설정이 필요합니다".to_string())
            })?;

        if !is_valid_routing_number(routing) {
            return Err(AppError::InitializationError(format!(
                "유효하지 않은 ABA 라우팅 번호입니다: {}",
                routing
            )));
        }

        info!("🏦 ACH ODFI 라우팅 번호 확인: {}", routing);
        Ok(())
    }
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::builder(MODULE_ID, "ACH Payments")
        .description("NACHA file generation and settlement tracking for payroll batches")
        .icon("landmark")
        .category(ModuleCategory::Finance)
        .depends_on(payroll::MODULE_ID)
        .route(
            RouteDefinition::new(
                "/admin/ach",
                ModuleView::new("ach.home", "ACH Payments")
                    .section("Pending files")
                    .section("Returns")
                    .lazy(),
            )
            .roles(["admin", "payroll_admin"]),
        )
        .menu_item(
            MenuItem::new("ach", "ACH Payments")
                .icon("landmark")
                .path("/admin/ach")
                .required_roles(["admin", "payroll_admin"]),
        )
        .config("odfi_routing_number", json!("021000021"))
        .lifecycle(Arc::new(AchLifecycle))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_checksum() {
        assert!(is_valid_routing_number("021000021"));
        assert!(is_valid_routing_number("011000015"));
        assert!(!is_valid_routing_number("021000022"));
        assert!(!is_valid_routing_number("02100002"));
        assert!(!is_valid_routing_number("02100002A"));
    }

    #[actix_web::test]
    async fn test_initialize_rejects_bad_routing_number() {
        let lifecycle = AchLifecycle;
        let mut config = ModuleConfig::new();
        assert!(lifecycle.initialize(&config).await.is_err());

        config.insert("odfi_routing_number".to_string(), json!("123456789"));
        assert!(lifecycle.initialize(&config).await.is_err());

        config.insert("odfi_routing_number".to_string(), json!("021000021"));
        assert!(lifecycle.initialize(&config).await.is_ok());
    }

    #[test]
    fn test_declares_payroll_dependency() {
        assert_eq!(descriptor().metadata.dependencies, vec!["payroll".to_string()]);
    }
}
