//! # Registry Bootstrap
//!
//! 프로세스 시작 시 한 번 실행되어 레지스트리를 채웁니다.
//!
//! ## 처리 순서
//!
//! ```text
//! 1. 명시적 목록의 디스크립터 등록           register_module
//! 2. 계획 항목 순서대로                       (순차 실행, 재정렬 없음)
//!    ├─ 선언된 의존성이 아직 로드되지 않았으면 경고만 출력
//!    ├─ load_module(id, config).await
//!    └─ grant_access 이면 set_module_access(id, true)
//! 3. mark_initialized()                      → 렌더러 준비 게이트 개방
//! ```
//!
//! 한 모듈의 실패는 다른 모듈의 부트스트랩을 막지 않습니다.

use log::{info, warn};
use serde::Serialize;

use crate::config::BootstrapConfig;
use crate::core::descriptor::{ModuleConfig, ModuleDescriptor};
use crate::core::registration::register_module;
use crate::core::registry::ModuleRegistry;
use crate::modules::BUILTIN_MODULE_IDS;
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 부트스트랩 계획의 한 항목
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapEntry {
    pub id: String,
    /// `false`면 로드하지 않고 접근 권한만 다룹니다 (카탈로그 전용).
    pub load: bool,
    pub grant_access: bool,
    /// `None`이면 디스크립터 기본 설정
    pub config: Option<ModuleConfig>,
}

impl BootstrapEntry {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            load: true,
            grant_access: false,
            config: None,
        }
    }

    pub fn granted(mut self) -> Self {
        self.grant_access = true;
        self
    }

    pub fn with_config(mut self, config: ModuleConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// 순서가 있는 부트스트랩 계획
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapPlan {
    pub entries: Vec<BootstrapEntry>,
}

impl BootstrapPlan {
    pub fn new(entries: Vec<BootstrapEntry>) -> Self {
        Self { entries }
    }

    /// 로드 목록과 권한 목록에서 계획을 만듭니다.
    ///
    /// 권한 목록에만 있는 id 는 로드 없이 접근 권한만 부여됩니다.
    pub fn from_ids(load_ids: &[String], granted_ids: &[String]) -> Self {
        let mut entries: Vec<BootstrapEntry> = load_ids
            .iter()
            .map(|id| BootstrapEntry {
                grant_access: granted_ids.contains(id),
                ..BootstrapEntry::new(id)
            })
            .collect();

        for id in granted_ids.iter().filter(|id| !load_ids.contains(id)) {
            entries.push(BootstrapEntry {
                load: false,
                ..BootstrapEntry::new(id).granted()
            });
        }

        Self { entries }
    }

    /// 환경 변수에서 계획을 만듭니다.
    ///
    /// * `BOOTSTRAP_MODULES` 미설정 → 모든 내장 모듈
    /// * `GRANTED_MODULES` 미설정 → 로드 대상 전체
    /// * `MODULE_CONFIG_<ID>` → 해당 모듈 초기화 설정
    pub fn from_env() -> Self {
        let load_ids = BootstrapConfig::module_ids()
            .unwrap_or_else(|| BUILTIN_MODULE_IDS.iter().map(|id| id.to_string()).collect());
        let granted_ids = BootstrapConfig::granted_ids().unwrap_or_else(|| load_ids.clone());

        let mut plan = Self::from_ids(&load_ids, &granted_ids);
        for entry in plan.entries.iter_mut().filter(|entry| entry.load) {
            entry.config = BootstrapConfig::module_config(&entry.id);
        }
        plan
    }
}

/// 부트스트랩 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BootstrapReport {
    pub loaded: Vec<String>,
    pub failed: Vec<String>,
    pub granted: Vec<String>,
}

/// 모듈을 등록하고 계획대로 로드/권한 부여한 뒤 레지스트리를 초기화 완료로 표시합니다.
pub async fn run_bootstrap(
    registry: &ModuleRegistry,
    modules: Vec<ModuleDescriptor>,
    plan: &BootstrapPlan,
) -> BootstrapReport {
    print_boxed_title("🔄 BOOTSTRAPPING MODULE REGISTRY");

    // 1단계: 명시적 목록 등록
    let module_count = modules.len();
    print_step_start(1, "Registering feature modules");
    for descriptor in modules {
        let registered = register_module(registry, descriptor);
        print_sub_task(&registered.id, "✓ Registered");
    }
    print_step_complete(1, "Feature modules registered", module_count);

    // 2단계: 계획 순서대로 로드 및 권한 부여
    let mut report = BootstrapReport::default();
    print_step_start(2, "Loading modules and granting access");

    for entry in &plan.entries {
        if registry.get_module(&entry.id).is_none() {
            warn!("⚠️ 부트스트랩 계획에 등록되지 않은 모듈이 있습니다: {}", entry.id);
            print_sub_task(&entry.id, "✗ Unknown module");
            if entry.load {
                report.failed.push(entry.id.clone());
            }
            continue;
        }

        if entry.load {
            let missing = registry.missing_dependencies(&entry.id);
            if !missing.is_empty() {
                warn!(
                    "⚠️ 모듈 {}의 의존 모듈이 아직 로드되지 않았습니다: {:?}",
                    entry.id, missing
                );
            }

            if registry.load_module(&entry.id, entry.config.clone()).await {
                print_sub_task(&entry.id, "✓ Loaded");
                report.loaded.push(entry.id.clone());
            } else {
                print_sub_task(&entry.id, "✗ Failed");
                report.failed.push(entry.id.clone());
            }
        }

        if entry.grant_access {
            registry.set_module_access(&entry.id, true);
            report.granted.push(entry.id.clone());
        }
    }
    print_step_complete(2, "Module plan applied", plan.entries.len());

    registry.mark_initialized();
    info!(
        "🚀 부트스트랩 완료: {} loaded, {} failed, {} granted",
        report.loaded.len(),
        report.failed.len(),
        report.granted.len()
    );
    print_final_summary(report.loaded.len(), report.failed.len(), report.granted.len());

    report
}
