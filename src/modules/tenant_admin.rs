//! 테넌트 관리 모듈 (플랫폼 운영자 전용)

use crate::core::descriptor::{MenuItem, ModuleCategory, ModuleDescriptor, RouteDefinition};
use crate::modules::views::ModuleView;

pub const MODULE_ID: &str = "tenant_admin";

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::builder(MODULE_ID, "Tenant Administration")
        .description("Provision tenants, manage plans and module entitlements")
        .icon("building")
        .category(ModuleCategory::Operations)
        .status_color("purple")
        .route(
            RouteDefinition::new(
                "/superadmin/tenants",
                ModuleView::new("tenant_admin.home", "Tenants")
                    .section("Tenants")
                    .section("Entitlements")
                    .lazy(),
            )
            .roles(["super_admin"]),
        )
        .menu_item(
            MenuItem::new("tenant_admin", "Tenants")
                .icon("building")
                .path("/superadmin/tenants")
                .required_roles(["super_admin"]),
        )
        .build()
}
