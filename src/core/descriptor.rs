//! # Module Descriptor - 기능 모듈 선언
//!
//! 각 기능 모듈(온보딩, ConnectIQ CRM, 급여 배치, ACH 등)은 하나의
//! [`ModuleDescriptor`]로 자신을 선언합니다. 디스크립터는 등록 이후 변경되지 않으며
//! `Arc<ModuleDescriptor>`로 레지스트리와 렌더러 사이에서 공유됩니다.
//!
//! ## 구성 요소
//!
//! ```text
//! ModuleDescriptor
//!  ├─ id               고유 키 (프로세스 수명 동안 안정적)
//!  ├─ metadata         이름, 버전, 카테고리, 상태, 의존성 ...
//!  ├─ routes           [RouteDefinition] (선언 순서 유지)
//!  ├─ menu             [MenuItem] 트리 (부모가 자식을 소유)
//!  ├─ configuration    initialize에 전달되는 key/value
//!  ├─ lifecycle        initialize / destroy 훅 (선택)
//!  └─ component        카탈로그에서 마운트되는 루트 컴포넌트 (선택)
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let descriptor = ModuleDescriptor::builder("payroll", "Payroll")
//!     .category(ModuleCategory::Payroll)
//!     .depends_on("onboarding")
//!     .route(RouteDefinition::new("/admin/payroll", component).roles(["admin"]))
//!     .menu_item(MenuItem::new("payroll", "Payroll").path("/admin/payroll"))
//!     .build();
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::component::LazyComponent;
use crate::core::errors::{AppError, AppResult};

/// 모듈 초기화에 전달되는 자유 형식 설정
pub type ModuleConfig = serde_json::Map<String, serde_json::Value>;

/// 모듈 카테고리 (고정된 집합)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleCategory {
    Core,
    Hr,
    Payroll,
    Finance,
    Crm,
    Compliance,
    Analytics,
    Operations,
}

impl ModuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleCategory::Core => "core",
            ModuleCategory::Hr => "hr",
            ModuleCategory::Payroll => "payroll",
            ModuleCategory::Finance => "finance",
            ModuleCategory::Crm => "crm",
            ModuleCategory::Compliance => "compliance",
            ModuleCategory::Analytics => "analytics",
            ModuleCategory::Operations => "operations",
        }
    }
}

impl FromStr for ModuleCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "core" => Ok(ModuleCategory::Core),
            "hr" => Ok(ModuleCategory::Hr),
            "payroll" => Ok(ModuleCategory::Payroll),
            "finance" => Ok(ModuleCategory::Finance),
            "crm" => Ok(ModuleCategory::Crm),
            "compliance" => Ok(ModuleCategory::Compliance),
            "analytics" => Ok(ModuleCategory::Analytics),
            "operations" => Ok(ModuleCategory::Operations),
            other => Err(AppError::ValidationError(format!(
                "알 수 없는 모듈 카테고리입니다: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 모듈 라이프사이클 상태
///
/// 카탈로그 렌더러는 이 값에서 배지 색상과 액션 버튼 레이블을 파생합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    #[default]
    Active,
    Locked,
    NotInstalled,
}

impl ModuleStatus {
    /// 카탈로그 액션 버튼 레이블
    pub fn action_label(&self) -> &'static str {
        match self {
            ModuleStatus::Active => "Configure",
            ModuleStatus::Locked => "Upgrade Required",
            ModuleStatus::NotInstalled => "Install",
        }
    }

    /// `status_color`가 지정되지 않았을 때 사용하는 기본 배지 색상
    pub fn default_color(&self) -> &'static str {
        match self {
            ModuleStatus::Active => "green",
            ModuleStatus::Locked => "amber",
            ModuleStatus::NotInstalled => "gray",
        }
    }
}

/// 모듈 메타데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub name: String,
    pub description: String,
    pub version: String,
    pub icon: String,
    pub category: ModuleCategory,
    pub is_premium: bool,
    pub is_beta: bool,
    pub is_coming_soon: bool,
    pub setup_required: bool,
    pub status: ModuleStatus,
    pub status_color: Option<String>,
    /// 선언만 되고 강제되지 않는 의존 모듈 ID 목록
    pub dependencies: Vec<String>,
}

impl ModuleMetadata {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            version: "1.0.0".to_string(),
            icon: "package".to_string(),
            category: ModuleCategory::Core,
            is_premium: false,
            is_beta: false,
            is_coming_soon: false,
            setup_required: false,
            status: ModuleStatus::Active,
            status_color: None,
            dependencies: Vec::new(),
        }
    }

    /// 배지 색상 (명시값 우선, 없으면 상태 기본값)
    pub fn badge_color(&self) -> &str {
        self.status_color
            .as_deref()
            .unwrap_or_else(|| self.status.default_color())
    }
}

/// 모듈이 선언하는 라우트
///
/// `roles`가 비어있지 않으면 현재 주체가 그 중 하나를 보유해야 렌더링됩니다.
/// `protected`는 역할 없이 인증된 주체만 요구합니다.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDefinition {
    pub path: String,
    #[serde(skip)]
    pub component: LazyComponent,
    pub exact: bool,
    pub protected: bool,
    pub roles: Vec<String>,
}

impl RouteDefinition {
    pub fn new(path: impl Into<String>, component: LazyComponent) -> Self {
        Self {
            path: path.into(),
            component,
            exact: false,
            protected: false,
            roles: Vec::new(),
        }
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }
}

/// 네비게이션 메뉴 노드 (재귀 구조)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            path: None,
            children: Vec::new(),
            required_roles: Vec::new(),
            permissions: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn child(mut self, child: MenuItem) -> Self {
        self.children.push(child);
        self
    }

    pub fn required_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    /// 주체의 역할로 볼 수 있는 메뉴만 남깁니다.
    ///
    /// `required_roles`가 비어있으면 누구나 볼 수 있으며, 자식도 재귀적으로 걸러집니다.
    pub fn visible_for(&self, roles: &[String]) -> Option<MenuItem> {
        let allowed = self.required_roles.is_empty()
            || self.required_roles.iter().any(|role| roles.contains(role));
        if !allowed {
            return None;
        }

        let mut item = self.clone();
        item.children = self
            .children
            .iter()
            .filter_map(|child| child.visible_for(roles))
            .collect();
        Some(item)
    }
}

/// 모듈 라이프사이클 훅
///
/// 두 메서드 모두 기본 구현은 아무것도 하지 않고 성공합니다.
/// 실패는 레지스트리에서 로그로 남고 `bool`로만 호출자에게 전달됩니다.
#[async_trait]
pub trait ModuleLifecycle: Send + Sync {
    /// 모듈을 초기화합니다. `load_module` 중에 정확히 한 번 await 됩니다.
    async fn initialize(&self, _config: &ModuleConfig) -> AppResult<()> {
        Ok(())
    }

    /// 모듈을 해제합니다. 실패하면 모듈은 로드된 상태로 남습니다.
    async fn destroy(&self) -> AppResult<()> {
        Ok(())
    }
}

/// 기능 모듈 디스크립터
#[derive(Clone)]
pub struct ModuleDescriptor {
    pub id: String,
    pub metadata: ModuleMetadata,
    pub routes: Vec<RouteDefinition>,
    pub menu: Vec<MenuItem>,
    pub configuration: ModuleConfig,
    pub lifecycle: Option<Arc<dyn ModuleLifecycle>>,
    pub component: Option<LazyComponent>,
}

impl ModuleDescriptor {
    pub fn builder(id: &str, name: &str) -> ModuleDescriptorBuilder {
        ModuleDescriptorBuilder {
            descriptor: ModuleDescriptor {
                id: id.to_string(),
                metadata: ModuleMetadata::named(name),
                routes: Vec::new(),
                menu: Vec::new(),
                configuration: ModuleConfig::new(),
                lifecycle: None,
                component: None,
            },
        }
    }

    /// 카탈로그 상세 화면에 마운트되는 루트 컴포넌트
    pub fn get_component(&self) -> Option<&LazyComponent> {
        self.component.as_ref()
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("id", &self.id)
            .field("metadata", &self.metadata)
            .field("routes", &self.routes)
            .field("menu", &self.menu)
            .field("configuration", &self.configuration)
            .field("lifecycle", &self.lifecycle.is_some())
            .field("component", &self.component)
            .finish()
    }
}

/// [`ModuleDescriptor`] 빌더
pub struct ModuleDescriptorBuilder {
    descriptor: ModuleDescriptor,
}

impl ModuleDescriptorBuilder {
    pub fn description(mut self, description: &str) -> Self {
        self.descriptor.metadata.description = description.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.descriptor.metadata.version = version.to_string();
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.descriptor.metadata.icon = icon.to_string();
        self
    }

    pub fn category(mut self, category: ModuleCategory) -> Self {
        self.descriptor.metadata.category = category;
        self
    }

    pub fn premium(mut self) -> Self {
        self.descriptor.metadata.is_premium = true;
        self
    }

    pub fn beta(mut self) -> Self {
        self.descriptor.metadata.is_beta = true;
        self
    }

    pub fn coming_soon(mut self) -> Self {
        self.descriptor.metadata.is_coming_soon = true;
        self
    }

    pub fn setup_required(mut self) -> Self {
        self.descriptor.metadata.setup_required = true;
        self
    }

    pub fn status(mut self, status: ModuleStatus) -> Self {
        self.descriptor.metadata.status = status;
        self
    }

    pub fn status_color(mut self, color: &str) -> Self {
        self.descriptor.metadata.status_color = Some(color.to_string());
        self
    }

    pub fn depends_on(mut self, module_id: &str) -> Self {
        self.descriptor.metadata.dependencies.push(module_id.to_string());
        self
    }

    pub fn route(mut self, route: RouteDefinition) -> Self {
        self.descriptor.routes.push(route);
        self
    }

    pub fn menu_item(mut self, item: MenuItem) -> Self {
        self.descriptor.menu.push(item);
        self
    }

    pub fn config(mut self, key: &str, value: serde_json::Value) -> Self {
        self.descriptor.configuration.insert(key.to_string(), value);
        self
    }

    pub fn lifecycle(mut self, lifecycle: Arc<dyn ModuleLifecycle>) -> Self {
        self.descriptor.lifecycle = Some(lifecycle);
        self
    }

    pub fn component(mut self, component: LazyComponent) -> Self {
        self.descriptor.component = Some(component);
        self
    }

    pub fn build(self) -> ModuleDescriptor {
        self.descriptor
    }
}
