//! 레지스트리 관리 API 요청/응답 DTO

use serde::{Deserialize, Serialize};

use crate::core::descriptor::{ModuleConfig, ModuleDescriptor, ModuleMetadata};
use crate::core::registry::ModuleRegistry;
use crate::utils::string_utils::deserialize_optional_string;

/// 관리 목록에 표시되는 모듈 요약
#[derive(Debug, Clone, Serialize)]
pub struct ModuleSummary {
    pub id: String,
    pub metadata: ModuleMetadata,
    pub loaded: bool,
    pub access: bool,
    pub route_count: usize,
    pub has_menu: bool,
    pub has_component: bool,
    /// 선언되었지만 아직 로드되지 않은 의존 모듈
    pub missing_dependencies: Vec<String>,
}

impl ModuleSummary {
    pub fn from_registry(registry: &ModuleRegistry, descriptor: &ModuleDescriptor) -> Self {
        Self {
            id: descriptor.id.clone(),
            metadata: descriptor.metadata.clone(),
            loaded: registry.is_module_loaded(&descriptor.id),
            access: registry.has_module_access(&descriptor.id),
            route_count: descriptor.routes.len(),
            has_menu: !descriptor.menu.is_empty(),
            has_component: descriptor.get_component().is_some(),
            missing_dependencies: registry.missing_dependencies(&descriptor.id),
        }
    }
}

/// `GET /api/v1/modules?category=payroll`
#[derive(Debug, Default, Deserialize)]
pub struct ModuleListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
}

/// `POST /api/v1/modules/{id}/load` 본문 (선택)
#[derive(Debug, Default, Deserialize)]
pub struct LoadModuleRequest {
    /// 없으면 디스크립터의 기본 설정을 사용합니다.
    pub config: Option<ModuleConfig>,
}

/// `PUT /api/v1/modules/{id}/access` 본문
#[derive(Debug, Deserialize)]
pub struct SetAccessRequest {
    pub granted: bool,
}

/// 상태 전이 결과
#[derive(Debug, Serialize)]
pub struct ModuleStateResponse {
    pub id: String,
    pub loaded: bool,
    pub access: bool,
}

impl ModuleStateResponse {
    pub fn of(registry: &ModuleRegistry, id: &str) -> Self {
        Self {
            id: id.to_string(),
            loaded: registry.is_module_loaded(id),
            access: registry.has_module_access(id),
        }
    }
}
