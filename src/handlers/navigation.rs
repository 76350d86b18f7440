//! 네비게이션 메뉴 핸들러

use actix_web::{get, web, HttpResponse};

use crate::core::descriptor::MenuItem;
use crate::core::registry::ModuleRegistry;
use crate::domain::models::auth::OptionalPrincipal;

/// `GET /api/v1/navigation`
///
/// 로드되고 접근 권한이 있는 모듈의 메뉴를 현재 주체의 역할로 걸러서 반환합니다.
/// 익명 요청은 `required_roles`가 없는 항목만 봅니다.
#[get("")]
pub async fn navigation(
    registry: web::Data<ModuleRegistry>,
    principal: OptionalPrincipal,
) -> HttpResponse {
    let roles = principal.roles();
    let menu: Vec<MenuItem> = registry
        .get_all_menu_items()
        .iter()
        .filter_map(|item| item.visible_for(roles))
        .collect();

    HttpResponse::Ok().json(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::ModuleDescriptor;
    use crate::domain::models::auth::principal::{PRINCIPAL_ID_HEADER, PRINCIPAL_ROLES_HEADER};
    use actix_web::{test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_navigation_is_filtered_by_roles() {
        let registry = Arc::new(ModuleRegistry::new());
        registry.register(Arc::new(
            ModuleDescriptor::builder("payroll", "Payroll")
                .menu_item(
                    MenuItem::new("payroll", "Payroll")
                        .child(MenuItem::new("batches", "Batches"))
                        .child(MenuItem::new("ach", "ACH").required_roles(["payroll_admin"])),
                )
                .menu_item(MenuItem::new("tenants", "Tenants").required_roles(["super_admin"]))
                .build(),
        ));
        registry.set_module_access("payroll", true);
        assert!(registry.load_module("payroll", None).await);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(Arc::clone(&registry)))
                .service(web::scope("/api/v1/navigation").service(navigation)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/navigation").to_request();
        let anonymous: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(anonymous.as_array().map(|a| a.len()), Some(1));
        assert_eq!(anonymous[0]["children"].as_array().map(|a| a.len()), Some(1));

        let req = test::TestRequest::get()
            .uri("/api/v1/navigation")
            .insert_header((PRINCIPAL_ID_HEADER, "u-5"))
            .insert_header((PRINCIPAL_ROLES_HEADER, "payroll_admin,super_admin"))
            .to_request();
        let admin: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(admin.as_array().map(|a| a.len()), Some(2));
        assert_eq!(admin[0]["children"][1]["id"], "ach");
    }

    #[actix_web::test]
    async fn test_unloaded_module_contributes_no_menu() {
        let registry = Arc::new(ModuleRegistry::new());
        registry.register(Arc::new(
            ModuleDescriptor::builder("cases", "Cases")
                .menu_item(MenuItem::new("cases", "Cases"))
                .build(),
        ));
        registry.set_module_access("cases", true);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(Arc::clone(&registry)))
                .service(web::scope("/api/v1/navigation").service(navigation)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/navigation").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!([]));
    }
}
