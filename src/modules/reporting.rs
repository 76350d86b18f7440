//! 분석 리포트 모듈 (상위 요금제 전용)

use crate::core::descriptor::{
    MenuItem, ModuleCategory, ModuleDescriptor, ModuleStatus, RouteDefinition,
};
use crate::modules::views::ModuleView;

pub const MODULE_ID: &str = "reporting";

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::builder(MODULE_ID, "Advanced Reporting")
        .description("Workforce analytics, custom report builder and scheduled exports")
        .version("0.9.0")
        .icon("bar-chart")
        .category(ModuleCategory::Analytics)
        .premium()
        .status(ModuleStatus::Locked)
        .route(RouteDefinition::new(
            "/admin/reports",
            ModuleView::new("reporting.home", "Reports").section("Saved reports").lazy(),
        ))
        .menu_item(
            MenuItem::new("reporting", "Reports")
                .icon("bar-chart")
                .path("/admin/reports")
                .permissions(["reports.read"]),
        )
        .build()
}
