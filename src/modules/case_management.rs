//! 인사 케이스 관리 모듈

use crate::core::descriptor::{MenuItem, ModuleCategory, ModuleDescriptor, RouteDefinition};
use crate::modules::views::ModuleView;

pub const MODULE_ID: &str = "case_management";

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::builder(MODULE_ID, "Case Management")
        .description("Employee relations cases, investigations and resolution tracking")
        .icon("briefcase")
        .category(ModuleCategory::Compliance)
        .route(
            RouteDefinition::new(
                "/admin/cases",
                ModuleView::new("case_management.home", "Cases")
                    .section("Open cases")
                    .section("Assigned to me")
                    .lazy(),
            )
            .protected(),
        )
        .menu_item(
            MenuItem::new("case_management", "Cases")
                .icon("briefcase")
                .path("/admin/cases"),
        )
        .component(ModuleView::new("case_management.overview", "Case Management").lazy())
        .build()
}
