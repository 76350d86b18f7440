//! 모듈 카탈로그 응답 DTO

use serde::Serialize;

use crate::core::descriptor::{ModuleCategory, ModuleDescriptor, ModuleStatus};

/// 카탈로그 목록 경로 ("카탈로그로 돌아가기" 링크에 사용)
pub const CATALOG_PATH: &str = "/api/v1/catalog";

/// 카탈로그 그리드의 한 칸
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub version: String,
    pub category: ModuleCategory,
    pub status: ModuleStatus,
    pub badge_color: String,
    pub action_label: String,
    pub badges: Vec<&'static str>,
    pub loaded: bool,
}

impl CatalogEntry {
    /// 디스크립터 메타데이터에서 시각적 상태를 파생합니다.
    pub fn from_descriptor(descriptor: &ModuleDescriptor, loaded: bool) -> Self {
        let metadata = &descriptor.metadata;

        let mut badges = Vec::new();
        if metadata.is_premium {
            badges.push("premium");
        }
        if metadata.is_beta {
            badges.push("beta");
        }
        if metadata.is_coming_soon {
            badges.push("coming_soon");
        }
        if metadata.setup_required {
            badges.push("setup_required");
        }

        Self {
            id: descriptor.id.clone(),
            name: metadata.name.clone(),
            description: metadata.description.clone(),
            icon: metadata.icon.clone(),
            version: metadata.version.clone(),
            category: metadata.category,
            status: metadata.status,
            badge_color: metadata.badge_color().to_string(),
            action_label: metadata.status.action_label().to_string(),
            badges,
            loaded,
        }
    }
}

/// "카탈로그로 돌아가기" 링크
#[derive(Debug, Clone, Serialize)]
pub struct CatalogLink {
    pub href: &'static str,
    pub label: &'static str,
}

impl Default for CatalogLink {
    fn default() -> Self {
        Self {
            href: CATALOG_PATH,
            label: "Back to catalog",
        }
    }
}

/// 선택된 모듈 상세 화면
#[derive(Debug, Clone, Serialize)]
pub struct CatalogDetail {
    pub module: CatalogEntry,
    /// 루트 컴포넌트 렌더 결과 (컴포넌트가 없으면 null)
    pub component: Option<serde_json::Value>,
    pub back: CatalogLink,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_derives_visuals_from_status() {
        let locked = ModuleDescriptor::builder("reports", "Reporting")
            .status(ModuleStatus::Locked)
            .premium()
            .beta()
            .build();

        let entry = CatalogEntry::from_descriptor(&locked, false);

        assert_eq!(entry.action_label, "Upgrade Required");
        assert_eq!(entry.badge_color, "amber");
        assert_eq!(entry.badges, vec!["premium", "beta"]);
    }

    #[test]
    fn test_not_installed_entry() {
        let descriptor = ModuleDescriptor::builder("benefits", "Benefits")
            .status(ModuleStatus::NotInstalled)
            .coming_soon()
            .build();

        let entry = CatalogEntry::from_descriptor(&descriptor, false);

        assert_eq!(entry.action_label, "Install");
        assert_eq!(entry.badges, vec!["coming_soon"]);
    }
}
