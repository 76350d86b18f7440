//! ConnectIQ CRM 모듈

use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use serde_json::json;

use crate::core::descriptor::{
    MenuItem, ModuleCategory, ModuleConfig, ModuleDescriptor, ModuleLifecycle, RouteDefinition,
};
use crate::core::errors::{AppError, AppResult};
use crate::modules::views::ModuleView;

pub const MODULE_ID: &str = "connect_iq";

const MIN_SYNC_INTERVAL_SECS: u64 = 30;

struct ConnectIqLifecycle;

#[async_trait]
impl ModuleLifecycle for ConnectIqLifecycle {
    async fn initialize(&self, config: &ModuleConfig) -> AppResult<()> {
        let interval = config
            .get("sync_interval_secs")
            .and_then(|value| value.as_u64())
            .ok_or_else(|| {
                AppError::InitializationError("sync_interval_secs 설정이 필요합니다".to_string())
            })?;

        if interval < MIN_SYNC_INTERVAL_SECS {
            return Err(AppError::InitializationError(format!(
                "sync_interval_secs 는 {}초 이상이어야 합니다: {}",
                MIN_SYNC_INTERVAL_SECS, interval
            )));
        }

        info!("🔗 ConnectIQ 동기화 주기: {}초", interval);
        Ok(())
    }
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::builder(MODULE_ID, "ConnectIQ CRM")
        .description("Pipeline, contacts and deal tracking for client relationships")
        .icon("handshake")
        .category(ModuleCategory::Crm)
        .beta()
        .route(RouteDefinition::new(
            "/admin/crm",
            ModuleView::new("connect_iq.home", "ConnectIQ")
                .section("Pipeline")
                .section("Contacts")
                .lazy(),
        ))
        .route(
            RouteDefinition::new(
                "/admin/crm/deals",
                ModuleView::new("connect_iq.deals", "Deals").section("Open deals").lazy(),
            )
            .roles(["admin", "sales"]),
        )
        .menu_item(
            MenuItem::new("connect_iq", "ConnectIQ")
                .icon("handshake")
                .path("/admin/crm")
                .child(
                    MenuItem::new("connect_iq.deals", "Deals")
                        .path("/admin/crm/deals")
                        .required_roles(["admin", "sales"]),
                ),
        )
        .config("sync_interval_secs", json!(300))
        .lifecycle(Arc::new(ConnectIqLifecycle))
        .component(ModuleView::new("connect_iq.overview", "ConnectIQ CRM").lazy())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(value: serde_json::Value) -> ModuleConfig {
        let mut config = ModuleConfig::new();
        config.insert("sync_interval_secs".to_string(), value);
        config
    }

    #[actix_web::test]
    async fn test_sync_interval_validation() {
        let lifecycle = ConnectIqLifecycle;

        assert!(lifecycle.initialize(&config(json!(300))).await.is_ok());
        assert!(lifecycle.initialize(&config(json!(5))).await.is_err());
        assert!(lifecycle.initialize(&config(json!("often"))).await.is_err());
        assert!(lifecycle.initialize(&ModuleConfig::new()).await.is_err());
    }

    #[test]
    fn test_default_configuration_is_valid() {
        let descriptor = descriptor();
        assert_eq!(descriptor.configuration.get("sync_interval_secs"), Some(&json!(300)));
        assert_eq!(descriptor.routes.len(), 2);
    }
}
