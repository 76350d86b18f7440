//! 직원 온보딩 모듈
//!
//! 관리 화면(`/admin/onboarding`)과 초대 코드로 들어오는 포털 화면
//! (`/portal/onboarding/:code`)을 제공합니다.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::core::component::{ModuleComponent, RenderContext};
use crate::core::descriptor::{MenuItem, ModuleCategory, ModuleDescriptor, RouteDefinition};
use crate::core::errors::{AppError, AppResult};
use crate::modules::views::{lazy_component, ModuleView};

pub const MODULE_ID: &str = "onboarding";

const INVITE_CODE_LEN: usize = 8;

/// 초대 코드 화면
struct InviteView;

#[async_trait]
impl ModuleComponent for InviteView {
    fn name(&self) -> &str {
        "onboarding.invite"
    }

    async fn render(&self, ctx: &RenderContext) -> AppResult<serde_json::Value> {
        let code = ctx.params.get("code").map(String::as_str).unwrap_or_default();
        validate_invite_code(code)?;

        Ok(json!({
            "title": "Welcome aboard",
            "invite_code": code.to_uppercase(),
            "steps": ["Personal details", "Tax forms", "Direct deposit", "Policy acknowledgement"],
        }))
    }
}

/// 초대 코드는 8자리 영숫자입니다.
pub fn validate_invite_code(code: &str) -> AppResult<()> {
    if code.len() != INVITE_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::ValidationError(format!(
            "초대 코드는 {}자리 영숫자여야 합니다",
            INVITE_CODE_LEN
        )));
    }
    Ok(())
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::builder(MODULE_ID, "Employee Onboarding")
        .description("New-hire checklists, document collection and invite-based self service")
        .icon("user-plus")
        .category(ModuleCategory::Hr)
        .route(
            RouteDefinition::new(
                "/admin/onboarding",
                ModuleView::new("onboarding.home", "Onboarding")
                    .section("Pending hires")
                    .section("Checklists")
                    .lazy(),
            )
            .roles(["admin", "hr_manager"]),
        )
        .route(
            RouteDefinition::new(
                "/portal/onboarding/:code",
                lazy_component("onboarding.invite", Arc::new(InviteView)),
            )
            .exact(),
        )
        .menu_item(
            MenuItem::new("onboarding", "Onboarding")
                .icon("user-plus")
                .path("/admin/onboarding")
                .required_roles(["admin", "hr_manager"])
                .child(MenuItem::new("onboarding.checklists", "Checklists").path("/admin/onboarding/checklists")),
        )
        .component(ModuleView::new("onboarding.overview", "Employee Onboarding").lazy())
        .build()
}
