//! 급여 배치 모듈

use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use serde_json::json;

use crate::core::component::{ModuleComponent, RenderContext};
use crate::core::descriptor::{
    MenuItem, ModuleCategory, ModuleConfig, ModuleDescriptor, ModuleLifecycle, RouteDefinition,
};
use crate::core::errors::{AppError, AppResult};
use crate::modules::views::{lazy_component, ModuleView};

pub const MODULE_ID: &str = "payroll";

const PAY_SCHEDULES: [&str; 4] = ["weekly", "biweekly", "semimonthly", "monthly"];

struct PayrollLifecycle;

#[async_trait]
impl ModuleLifecycle for PayrollLifecycle {
    async fn initialize(&self, config: &ModuleConfig) -> AppResult<()> {
        let schedule = config
            .get("pay_schedule")
            .and_then(|value| value.as_str())
            .unwrap_or("biweekly");

        if !PAY_SCHEDULES.contains(&schedule) {
            return Err(AppError::InitializationError(format!(
                "지원하지 않는 급여 주기입니다: {}",
                schedule
            )));
        }

        info!("💰 급여 주기: {}", schedule);
        Ok(())
    }

    async fn destroy(&self) -> AppResult<()> {
        info!("💰 급여 배치 스케줄러 중지");
        Ok(())
    }
}

/// 단일 급여 배치 화면
struct BatchView;

#[async_trait]
impl ModuleComponent for BatchView {
    fn name(&self) -> &str {
        "payroll.batch"
    }

    async fn render(&self, ctx: &RenderContext) -> AppResult<serde_json::Value> {
        let batch_id = ctx
            .params
            .get("batch_id")
            .ok_or_else(|| AppError::ValidationError("batch_id 가 필요합니다".to_string()))?;

        Ok(json!({
            "title": format!("Batch {}", batch_id),
            "batch_id": batch_id,
            "actions": ["Review", "Approve", "Export ACH"],
        }))
    }
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::builder(MODULE_ID, "Payroll")
        .description("Pay runs, batch approval and earnings statements")
        .icon("banknote")
        .category(ModuleCategory::Payroll)
        .setup_required()
        .route(
            RouteDefinition::new(
                "/admin/payroll",
                ModuleView::new("payroll.home", "Payroll")
                    .section("Upcoming pay runs")
                    .section("Batches")
                    .lazy(),
            )
            .roles(["admin", "payroll_admin"]),
        )
        .route(
            RouteDefinition::new(
                "/admin/payroll/batches/:batch_id",
                lazy_component("payroll.batch", Arc::new(BatchView)),
            )
            .exact()
            .roles(["admin", "payroll_admin"]),
        )
        .menu_item(
            MenuItem::new("payroll", "Payroll")
                .icon("banknote")
                .path("/admin/payroll")
                .required_roles(["admin", "payroll_admin"])
                .permissions(["payroll.read"]),
        )
        .config("pay_schedule", json!("biweekly"))
        .lifecycle(Arc::new(PayrollLifecycle))
        .component(ModuleView::new("payroll.overview", "Payroll").lazy())
        .build()
}
