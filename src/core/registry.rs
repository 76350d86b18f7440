//! # Module Registry - 기능 모듈 레지스트리
//!
//! 이 모듈은 모듈 허브의 핵심으로, 독립적으로 작성된 기능 모듈 디스크립터와
//! 이를 소비하는 라우트 렌더러/네비게이션 렌더러 사이를 중재합니다.
//!
//! ## 레지스트리 상태
//!
//! | 상태 | 의미 | 변경 시점 |
//! |------|------|-----------|
//! | `modules` | id → 디스크립터 | `register` (마지막 등록이 우선) |
//! | `loaded` | 초기화 완료된 id (완료 순서) | `load_module` 성공, `unload_module` 성공 |
//! | `loading` | id → 진행 중인 공유 로드 future | `load_module` 시작/종료 |
//! | `access` | id → 접근 권한 | `set_module_access` |
//! | `initialized` | 부트스트랩 완료 플래그 | `mark_initialized` (한 번만) |
//!
//! ## 가시성 규칙
//!
//! ```text
//! get_all_routes / get_all_menu_items 에 포함  ⇔  id ∈ loaded  AND  access[id] == true
//! get_accessible_modules 에 포함                ⇔  access[id] == true   (로드 상태 무관)
//! ```
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 부트스트랩 (명시적 등록)
//!    ├─ register_module(&registry, descriptor)  → modules 에 저장
//!    ├─ load_module(id).await                    → initialize 실행 후 loaded 에 추가
//!    ├─ set_module_access(id, true)              → 접근 허용
//!    └─ mark_initialized()                       → is_ready() 가능
//!
//! 2. 상태 변경 알림 (publish/subscribe)
//!    ├─ 모든 변경은 revision 을 증가시키고 RegistryStatus 를 발행
//!    └─ 렌더러는 subscribe() 로 준비 신호와 변경을 관찰
//! ```
//!
//! ## 동시 로드
//!
//! 같은 id 에 대해 동시에 `load_module`이 호출되면 두 번째 호출자는 진행 중인
//! 로드 future 를 함께 await 하고 실제 결과를 받습니다. `initialize`는 한 번만
//! 실행됩니다. `unload_module`도 같은 방식으로 `destroy`를 한 번만 실행합니다.
//!
//! 로드 중인 모듈의 해제 요청은 로드가 끝난 뒤, 해제 중인 모듈의 로드 요청은 해제가
//! 끝난 뒤 상태를 다시 확인합니다. 작업은 런타임에 spawn 되므로 호출자가 중간에
//! 취소되어도 `loading`/`unloading` 항목은 항상 정리됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let registry = Arc::new(ModuleRegistry::new());
//! register_module(&registry, payroll::descriptor());
//!
//! if registry.load_module("payroll", None).await {
//!     registry.set_module_access("payroll", true);
//! }
//! registry.mark_initialized();
//!
//! for route in registry.get_all_routes() {
//!     println!("{} → {}", route.module_id, route.route.path);
//! }
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use log::{debug, error, info, warn};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;

use crate::core::descriptor::{MenuItem, ModuleCategory, ModuleConfig, ModuleDescriptor, RouteDefinition};

/// 진행 중인 로드/해제 작업 (여러 호출자가 함께 await)
///
/// 작업 자체는 런타임에 spawn 되므로, 처음 요청한 호출자가 취소되어도 끝까지 실행됩니다.
type PendingOp = Shared<BoxFuture<'static, bool>>;

fn spawn_pending<F>(task: F) -> PendingOp
where
    F: Future<Output = bool> + Send + 'static,
{
    actix_web::rt::spawn(task)
        .map(|joined| joined.unwrap_or(false))
        .boxed()
        .shared()
}

/// 같은 id 의 다른 작업이 끝나길 기다린 뒤 상태를 다시 확인해야 하는 경우
enum LoadStep {
    Done(bool),
    Join(PendingOp),
    AwaitUnload(PendingOp),
}

enum UnloadStep {
    Done(bool),
    Join(PendingOp),
    AwaitLoad(PendingOp),
}

/// 레지스트리 상태 스냅샷
///
/// 상태가 바뀔 때마다 `revision`이 증가한 값이 구독자에게 발행됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStatus {
    /// `initialized && loading == 0`
    pub ready: bool,
    pub initialized: bool,
    pub loading: usize,
    pub loaded: usize,
    pub registered: usize,
    pub revision: u64,
}

/// 집계된 라우트 (소유 모듈 ID 포함)
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRoute {
    pub module_id: String,
    #[serde(flatten)]
    pub route: RouteDefinition,
}

#[derive(Default)]
struct RegistryState {
    modules: HashMap<String, Arc<ModuleDescriptor>>,
    /// 로드 완료 순서를 유지합니다.
    loaded: Vec<String>,
    loading: HashMap<String, PendingOp>,
    unloading: HashMap<String, PendingOp>,
    access: HashMap<String, bool>,
    initialized: bool,
    revision: u64,
}

impl RegistryState {
    fn is_loaded(&self, id: &str) -> bool {
        self.loaded.iter().any(|loaded| loaded == id)
    }

    fn has_access(&self, id: &str) -> bool {
        self.access.get(id).copied().unwrap_or(false)
    }

    /// 로드 순서대로, 접근 권한이 있는 로드된 디스크립터
    fn visible(&self) -> impl Iterator<Item = &Arc<ModuleDescriptor>> {
        self.loaded
            .iter()
            .filter(|id| self.has_access(id))
            .filter_map(|id| self.modules.get(id))
    }

    fn status(&self) -> RegistryStatus {
        RegistryStatus {
            ready: self.initialized && self.loading.is_empty(),
            initialized: self.initialized,
            loading: self.loading.len(),
            loaded: self.loaded.len(),
            registered: self.modules.len(),
            revision: self.revision,
        }
    }
}

struct RegistryShared {
    state: RwLock<RegistryState>,
    status_tx: watch::Sender<RegistryStatus>,
}

impl RegistryShared {
    /// revision 을 올리고 새 상태를 발행합니다. 쓰기 잠금을 보유한 채로 호출합니다.
    fn publish(&self, state: &mut RegistryState) {
        state.revision += 1;
        self.status_tx.send_replace(state.status());
    }
}

/// 기능 모듈 레지스트리
///
/// 프로세스 시작 시 한 번 생성되어 `Arc<ModuleRegistry>`(또는 `web::Data`)로
/// 모든 소비자에게 주입됩니다. 테스트에서는 독립된 인스턴스를 자유롭게 만들 수 있습니다.
pub struct ModuleRegistry {
    shared: Arc<RegistryShared>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        let (status_tx, _) = watch::channel(RegistryStatus::default());
        Self {
            shared: Arc::new(RegistryShared {
                state: RwLock::new(RegistryState::default()),
                status_tx,
            }),
        }
    }

    /// 디스크립터를 등록합니다. 같은 id 가 있으면 조용히 교체합니다 (마지막 등록 우선).
    ///
    /// 로드 상태와 접근 권한은 교체 후에도 유지되므로, 이미 로드된 모듈이라면
    /// 다음 집계부터 새 디스크립터의 라우트가 사용됩니다.
    pub fn register(&self, descriptor: Arc<ModuleDescriptor>) {
        let id = descriptor.id.clone();
        let mut state = self.shared.state.write();

        if state.modules.insert(id.clone(), descriptor).is_some() {
            warn!("⚠️ 모듈 디스크립터 교체됨: {}", id);
        } else {
            debug!("📦 모듈 등록: {}", id);
        }
        self.shared.publish(&mut state);
    }

    pub fn get_module(&self, id: &str) -> Option<Arc<ModuleDescriptor>> {
        self.shared.state.read().modules.get(id).cloned()
    }

    /// 등록된 모든 모듈 (id 순 정렬, 접근/로드 상태 무관)
    pub fn get_all_modules(&self) -> Vec<Arc<ModuleDescriptor>> {
        let state = self.shared.state.read();
        let mut modules: Vec<_> = state.modules.values().cloned().collect();
        modules.sort_by(|a, b| a.id.cmp(&b.id));
        modules
    }

    pub fn get_modules_by_category(&self, category: ModuleCategory) -> Vec<Arc<ModuleDescriptor>> {
        self.get_all_modules()
            .into_iter()
            .filter(|descriptor| descriptor.metadata.category == category)
            .collect()
    }

    /// 모듈을 로드합니다.
    ///
    /// ## 처리 과정
    ///
    /// 1. **미등록 id**: `false`, 경고 로그, 상태 변경 없음
    /// 2. **해제 중**: 해제가 끝나길 기다린 뒤 다시 판단
    /// 3. **이미 로드됨**: 즉시 `true`
    /// 4. **로드 중**: 진행 중인 로드를 함께 await 하고 그 결과를 반환
    /// 5. **그 외**: `initialize(config)` 실행. `config`가 `None`이면 디스크립터의
    ///    `configuration`을 사용합니다. 성공 시 `loaded`에 추가, 실패 시 로그 후 `false`
    ///
    /// 어떤 경우든 반환 시점에 해당 id 는 `loading`에 남아있지 않습니다.
    pub async fn load_module(&self, id: &str, config: Option<ModuleConfig>) -> bool {
        let mut config = config;

        loop {
            let step = {
                let mut state = self.shared.state.write();

                match state.modules.get(id).cloned() {
                    None => {
                        warn!("⚠️ 등록되지 않은 모듈 로드 요청: {}", id);
                        LoadStep::Done(false)
                    }
                    Some(_) if state.unloading.contains_key(id) => {
                        debug!("모듈 {} 해제가 진행 중입니다. 해제 후 다시 로드합니다", id);
                        LoadStep::AwaitUnload(state.unloading[id].clone())
                    }
                    Some(_) if state.is_loaded(id) => {
                        debug!("모듈이 이미 로드되어 있습니다: {}", id);
                        LoadStep::Done(true)
                    }
                    Some(_) if state.loading.contains_key(id) => {
                        debug!("모듈 {} 로드가 진행 중입니다. 기존 작업을 대기합니다", id);
                        LoadStep::Join(state.loading[id].clone())
                    }
                    Some(descriptor) => {
                        let config = config
                            .take()
                            .unwrap_or_else(|| descriptor.configuration.clone());
                        let pending =
                            spawn_pending(drive_load(Arc::clone(&self.shared), descriptor, config));
                        state.loading.insert(id.to_string(), pending.clone());
                        self.shared.publish(&mut state);
                        LoadStep::Join(pending)
                    }
                }
            };

            match step {
                LoadStep::Done(loaded) => return loaded,
                LoadStep::Join(pending) => return pending.await,
                LoadStep::AwaitUnload(pending) => {
                    pending.await;
                }
            }
        }
    }

    /// 로드된 모듈을 해제합니다.
    ///
    /// 동시에 들어온 해제 요청은 하나의 `destroy()`를 함께 기다립니다. 로드 중이면
    /// 로드가 끝난 뒤 다시 판단합니다. `destroy()`가 실패하면 부분 해제 상태를
    /// 안전하지 않다고 보고 모듈을 로드된 상태로 남긴 채 `false`를 반환합니다.
    pub async fn unload_module(&self, id: &str) -> bool {
        loop {
            let step = {
                let mut state = self.shared.state.write();

                if let Some(pending) = state.unloading.get(id) {
                    debug!("모듈 {} 해제가 진행 중입니다. 기존 작업을 대기합니다", id);
                    UnloadStep::Join(pending.clone())
                } else if let Some(pending) = state.loading.get(id) {
                    debug!("모듈 {} 로드가 진행 중입니다. 로드 후 해제합니다", id);
                    UnloadStep::AwaitLoad(pending.clone())
                } else {
                    match state.modules.get(id).cloned() {
                        Some(descriptor) if state.is_loaded(id) => {
                            let pending =
                                spawn_pending(drive_unload(Arc::clone(&self.shared), descriptor));
                            state.unloading.insert(id.to_string(), pending.clone());
                            self.shared.publish(&mut state);
                            UnloadStep::Join(pending)
                        }
                        _ => {
                            warn!("⚠️ 로드되지 않은 모듈 해제 요청: {}", id);
                            UnloadStep::Done(false)
                        }
                    }
                }
            };

            match step {
                UnloadStep::Done(unloaded) => return unloaded,
                UnloadStep::Join(pending) => return pending.await,
                UnloadStep::AwaitLoad(pending) => {
                    pending.await;
                }
            }
        }
    }

    pub fn is_module_loaded(&self, id: &str) -> bool {
        self.shared.state.read().is_loaded(id)
    }

    /// 접근 권한을 설정합니다. 로드 상태와 독립적이며 언제든 바꿀 수 있습니다.
    pub fn set_module_access(&self, id: &str, granted: bool) {
        let mut state = self.shared.state.write();
        state.access.insert(id.to_string(), granted);
        self.shared.publish(&mut state);
        debug!("🔐 모듈 접근 권한 변경: {} = {}", id, granted);
    }

    /// 한 번도 설정되지 않은 id 는 `false`
    pub fn has_module_access(&self, id: &str) -> bool {
        self.shared.state.read().has_access(id)
    }

    /// 로드 순서대로 집계된 라우트 (모듈 내부는 선언 순서)
    pub fn get_all_routes(&self) -> Vec<ModuleRoute> {
        let state = self.shared.state.read();
        state
            .visible()
            .flat_map(|descriptor| {
                descriptor.routes.iter().map(|route| ModuleRoute {
                    module_id: descriptor.id.clone(),
                    route: route.clone(),
                })
            })
            .collect()
    }

    /// 로드 순서대로 집계된 메뉴 트리. 메뉴가 없는 모듈은 기여하지 않습니다.
    pub fn get_all_menu_items(&self) -> Vec<MenuItem> {
        let state = self.shared.state.read();
        state
            .visible()
            .flat_map(|descriptor| descriptor.menu.iter().cloned())
            .collect()
    }

    /// 접근 권한이 있는 모든 모듈 (로드 여부 무관, 카탈로그 표시용)
    pub fn get_accessible_modules(&self) -> Vec<Arc<ModuleDescriptor>> {
        let accessible: Vec<_> = {
            let state = self.shared.state.read();
            state
                .access
                .iter()
                .filter(|(_, granted)| **granted)
                .map(|(id, _)| id.clone())
                .collect()
        };

        self.get_all_modules()
            .into_iter()
            .filter(|descriptor| accessible.contains(&descriptor.id))
            .collect()
    }

    /// 하나 이상의 모듈이 초기화 중인지 여부
    pub fn is_loading(&self) -> bool {
        !self.shared.state.read().loading.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        self.status().ready
    }

    /// 부트스트랩 완료 표시. 한 번 설정되면 해제되지 않습니다.
    pub fn mark_initialized(&self) {
        let mut state = self.shared.state.write();
        if state.initialized {
            return;
        }
        state.initialized = true;
        self.shared.publish(&mut state);
        info!("✅ 모듈 레지스트리 초기화 완료 ({}개 로드됨)", state.loaded.len());
    }

    pub fn status(&self) -> RegistryStatus {
        self.shared.state.read().status()
    }

    /// 상태 변경 구독. 수신자는 항상 최신 [`RegistryStatus`]를 봅니다.
    pub fn subscribe(&self) -> watch::Receiver<RegistryStatus> {
        self.shared.status_tx.subscribe()
    }

    /// 준비 완료까지 최대 `timeout` 동안 기다립니다. 제한 시간 안에 준비되면 `true`.
    pub async fn wait_until_ready(&self, timeout: Duration) -> bool {
        let mut rx = self.subscribe();
        matches!(
            tokio::time::timeout(timeout, rx.wait_for(|status| status.ready)).await,
            Ok(Ok(_))
        )
    }

    /// 선언된 의존성 중 아직 로드되지 않은 모듈 id 목록
    ///
    /// 의존성은 선언만 될 뿐 로드 순서나 로드 가능 여부에 영향을 주지 않습니다.
    pub fn missing_dependencies(&self, id: &str) -> Vec<String> {
        let state = self.shared.state.read();
        state
            .modules
            .get(id)
            .map(|descriptor| {
                descriptor
                    .metadata
                    .dependencies
                    .iter()
                    .filter(|dependency| !state.is_loaded(dependency))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 실제 `initialize` 호출을 수행하는 로드 작업
///
/// 결과와 무관하게 `loading`에서 id 를 제거한 뒤 완료됩니다.
async fn drive_load(
    shared: Arc<RegistryShared>,
    descriptor: Arc<ModuleDescriptor>,
    config: ModuleConfig,
) -> bool {
    let id = descriptor.id.as_str();
    info!("🔄 모듈 초기화 시작: {}", id);

    let outcome = match descriptor.lifecycle.as_ref() {
        Some(lifecycle) => lifecycle.initialize(&config).await,
        None => Ok(()),
    };

    let mut state = shared.state.write();
    state.loading.remove(id);

    let loaded = match outcome {
        Ok(()) => {
            if !state.is_loaded(id) {
                state.loaded.push(id.to_string());
            }
            info!("✅ 모듈 로드 완료: {}", id);
            true
        }
        Err(e) => {
            error!("❌ 모듈 {} 초기화 실패: {}", id, e);
            false
        }
    };

    shared.publish(&mut state);
    loaded
}

/// 실제 `destroy` 호출을 수행하는 해제 작업
///
/// 결과와 무관하게 `unloading`에서 id 를 제거한 뒤 완료됩니다.
async fn drive_unload(shared: Arc<RegistryShared>, descriptor: Arc<ModuleDescriptor>) -> bool {
    let id = descriptor.id.as_str();

    let outcome = match descriptor.lifecycle.as_ref() {
        Some(lifecycle) => lifecycle.destroy().await,
        None => Ok(()),
    };

    let mut state = shared.state.write();
    state.unloading.remove(id);

    let unloaded = match outcome {
        Ok(()) => {
            state.loaded.retain(|loaded| loaded != id);
            info!("🧹 모듈 해제 완료: {}", id);
            true
        }
        Err(e) => {
            error!("❌ 모듈 {} 해제 실패: {}", id, e);
            false
        }
    };

    shared.publish(&mut state);
    unloaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::LazyComponent;
    use crate::core::descriptor::{ModuleLifecycle, RouteDefinition};
    use crate::core::errors::{AppError, AppResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// 호출 횟수를 세고, 지정 시 실패하거나 신호를 기다리는 라이프사이클
    #[derive(Default)]
    struct CountingLifecycle {
        init_calls: AtomicUsize,
        destroy_calls: AtomicUsize,
        fail_init: AtomicBool,
        fail_destroy: AtomicBool,
        gate: Option<Arc<Notify>>,
        delay: Option<Duration>,
        destroy_delay: Option<Duration>,
    }

    #[async_trait]
    impl ModuleLifecycle for CountingLifecycle {
        async fn initialize(&self, _config: &ModuleConfig) -> AppResult<()> {
            self.init_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_init.load(Ordering::SeqCst) {
                return Err(AppError::InitializationError("connector offline".to_string()));
            }
            Ok(())
        }

        async fn destroy(&self) -> AppResult<()> {
            self.destroy_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.destroy_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_destroy.load(Ordering::SeqCst) {
                return Err(AppError::InternalError("teardown incomplete".to_string()));
            }
            Ok(())
        }
    }

    fn module(id: &str, paths: &[&str]) -> ModuleDescriptor {
        let mut builder = ModuleDescriptor::builder(id, id);
        for path in paths {
            builder = builder.route(RouteDefinition::new(*path, LazyComponent::empty(id)));
        }
        builder.menu_item(MenuItem::new(id, id)).build()
    }

    fn module_with(id: &str, paths: &[&str], lifecycle: Arc<CountingLifecycle>) -> Arc<ModuleDescriptor> {
        let mut descriptor = module(id, paths);
        descriptor.lifecycle = Some(lifecycle);
        Arc::new(descriptor)
    }

    fn route_paths(registry: &ModuleRegistry) -> Vec<String> {
        registry.get_all_routes().into_iter().map(|r| r.route.path).collect()
    }

    #[test]
    fn test_access_defaults_to_false() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(module("crm", &["/admin/crm"])));

        assert!(!registry.has_module_access("crm"));
        assert!(!registry.has_module_access("never-registered"));
    }

    #[test]
    fn test_get_module_returns_none_for_unknown_id() {
        let registry = ModuleRegistry::new();
        assert!(registry.get_module("ghost").is_none());
    }

    #[test]
    fn test_modules_by_category() {
        let registry = ModuleRegistry::new();
        let mut payroll = module("payroll", &[]);
        payroll.metadata.category = ModuleCategory::Payroll;
        registry.register(Arc::new(payroll));
        registry.register(Arc::new(module("crm", &[])));

        let ids: Vec<String> = registry
            .get_modules_by_category(ModuleCategory::Payroll)
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(ids, vec!["payroll".to_string()]);
        assert_eq!(registry.get_all_modules().len(), 2);
    }

    #[actix_web::test]
    async fn test_sequential_load_initializes_once() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle::default());
        registry.register(module_with("payroll", &["/admin/payroll"], Arc::clone(&lifecycle)));

        assert!(registry.load_module("payroll", None).await);
        assert!(registry.load_module("payroll", None).await);

        assert_eq!(lifecycle.init_calls.load(Ordering::SeqCst), 1);
        assert!(registry.is_module_loaded("payroll"));
    }

    #[actix_web::test]
    async fn test_load_without_lifecycle_succeeds() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(module("reports", &["/admin/reports"])));

        assert!(registry.load_module("reports", None).await);
        assert!(registry.is_module_loaded("reports"));
    }

    #[actix_web::test]
    async fn test_load_unknown_module_fails_without_state_change() {
        let registry = ModuleRegistry::new();
        let before = registry.status();

        assert!(!registry.load_module("ghost", None).await);

        assert!(!registry.is_module_loaded("ghost"));
        assert!(!registry.is_loading());
        assert_eq!(registry.status(), before);
    }

    #[actix_web::test]
    async fn test_routes_require_load_and_access() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(module("x", &["/admin/x"])));
        assert!(registry.get_all_routes().is_empty());

        assert!(registry.load_module("x", None).await);
        registry.set_module_access("x", false);
        assert!(!route_paths(&registry).contains(&"/admin/x".to_string()));

        registry.set_module_access("x", true);
        assert_eq!(route_paths(&registry), vec!["/admin/x".to_string()]);
    }

    #[actix_web::test]
    async fn test_granted_but_not_loaded_is_only_in_catalog() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(module("cases", &["/admin/cases"])));
        registry.set_module_access("cases", true);

        assert!(registry.get_all_routes().is_empty());
        assert!(registry.get_all_menu_items().is_empty());
        let accessible: Vec<String> =
            registry.get_accessible_modules().iter().map(|d| d.id.clone()).collect();
        assert_eq!(accessible, vec!["cases".to_string()]);
    }

    #[actix_web::test]
    async fn test_loaded_but_denied_is_only_in_admin_listing() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(module("ach", &["/admin/ach"])));
        assert!(registry.load_module("ach", None).await);

        assert!(registry.get_all_routes().is_empty());
        assert!(registry.get_all_menu_items().is_empty());
        assert!(registry.get_accessible_modules().is_empty());
        assert_eq!(registry.get_all_modules().len(), 1);
    }

    #[actix_web::test]
    async fn test_routes_follow_load_order_and_grow_monotonically() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(module("b", &["/admin/b/1", "/admin/b/2"])));
        registry.register(Arc::new(module("a", &["/admin/a"])));
        registry.set_module_access("a", true);
        registry.set_module_access("b", true);

        assert!(registry.load_module("b", None).await);
        let first = route_paths(&registry);
        assert!(registry.load_module("a", None).await);
        let second = route_paths(&registry);

        assert_eq!(first, vec!["/admin/b/1".to_string(), "/admin/b/2".to_string()]);
        assert_eq!(
            second,
            vec!["/admin/b/1".to_string(), "/admin/b/2".to_string(), "/admin/a".to_string()]
        );
    }

    #[actix_web::test]
    async fn test_failed_initialize_is_retried_on_next_load() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle::default());
        lifecycle.fail_init.store(true, Ordering::SeqCst);
        registry.register(module_with("ach", &["/admin/ach"], Arc::clone(&lifecycle)));

        assert!(!registry.load_module("ach", None).await);
        assert!(!registry.is_module_loaded("ach"));
        assert!(!registry.is_loading());

        lifecycle.fail_init.store(false, Ordering::SeqCst);
        assert!(registry.load_module("ach", None).await);
        assert_eq!(lifecycle.init_calls.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn test_reregister_last_write_wins() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(module("crm", &["/admin/crm/old"])));
        registry.register(Arc::new(module("crm", &["/admin/crm/new", "/admin/crm/deals"])));
        registry.set_module_access("crm", true);
        assert!(registry.load_module("crm", None).await);

        assert_eq!(
            route_paths(&registry),
            vec!["/admin/crm/new".to_string(), "/admin/crm/deals".to_string()]
        );
    }

    #[actix_web::test]
    async fn test_concurrent_loads_share_one_initialize() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle {
            delay: Some(Duration::from_millis(20)),
            ..CountingLifecycle::default()
        });
        registry.register(module_with("payroll", &[], Arc::clone(&lifecycle)));

        let (first, second) = futures_util::future::join(
            registry.load_module("payroll", None),
            registry.load_module("payroll", None),
        )
        .await;

        assert!(first && second);
        assert_eq!(lifecycle.init_calls.load(Ordering::SeqCst), 1);
        assert!(registry.is_module_loaded("payroll"));
    }

    #[actix_web::test]
    async fn test_concurrent_callers_observe_real_failure() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle {
            delay: Some(Duration::from_millis(20)),
            ..CountingLifecycle::default()
        });
        lifecycle.fail_init.store(true, Ordering::SeqCst);
        registry.register(module_with("ach", &[], Arc::clone(&lifecycle)));

        let (first, second) = futures_util::future::join(
            registry.load_module("ach", None),
            registry.load_module("ach", None),
        )
        .await;

        assert!(!first && !second);
        assert_eq!(lifecycle.init_calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_loading_state_is_visible_during_initialize() {
        let registry = ModuleRegistry::new();
        let gate = Arc::new(Notify::new());
        let lifecycle = Arc::new(CountingLifecycle {
            gate: Some(Arc::clone(&gate)),
            ..CountingLifecycle::default()
        });
        registry.register(module_with("crm", &[], lifecycle));
        registry.mark_initialized();

        let observe = async {
            let observed = (registry.is_loading(), registry.is_ready());
            gate.notify_one();
            observed
        };
        let (loaded, (loading, ready)) =
            futures_util::future::join(registry.load_module("crm", None), observe).await;

        assert!(loaded);
        assert!(loading);
        assert!(!ready);
        assert!(!registry.is_loading());
        assert!(registry.is_ready());
    }

    #[actix_web::test]
    async fn test_unload_runs_destroy_and_hides_routes() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle::default());
        registry.register(module_with("cases", &["/admin/cases"], Arc::clone(&lifecycle)));
        registry.set_module_access("cases", true);
        assert!(registry.load_module("cases", None).await);

        assert!(registry.unload_module("cases").await);

        assert_eq!(lifecycle.destroy_calls.load(Ordering::SeqCst), 1);
        assert!(!registry.is_module_loaded("cases"));
        assert!(registry.get_all_routes().is_empty());
        assert!(registry.get_module("cases").is_some());
    }

    #[actix_web::test]
    async fn test_failed_destroy_keeps_module_loaded() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle::default());
        lifecycle.fail_destroy.store(true, Ordering::SeqCst);
        registry.register(module_with("ach", &[], Arc::clone(&lifecycle)));
        assert!(registry.load_module("ach", None).await);

        assert!(!registry.unload_module("ach").await);
        assert!(registry.is_module_loaded("ach"));
    }

    #[actix_web::test]
    async fn test_unload_of_unloaded_module_is_rejected() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle::default());
        registry.register(module_with("crm", &[], Arc::clone(&lifecycle)));

        assert!(!registry.unload_module("crm").await);
        assert_eq!(lifecycle.destroy_calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_cancelled_caller_does_not_leave_load_pending() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle {
            delay: Some(Duration::from_millis(20)),
            ..CountingLifecycle::default()
        });
        registry.register(module_with("payroll", &[], Arc::clone(&lifecycle)));
        registry.mark_initialized();

        let abandoned =
            tokio::time::timeout(Duration::from_millis(1), registry.load_module("payroll", None)).await;
        assert!(abandoned.is_err());
        assert!(registry.is_loading());

        assert!(registry.wait_until_ready(Duration::from_secs(1)).await);
        assert!(!registry.is_loading());
        assert!(registry.is_module_loaded("payroll"));
        assert_eq!(lifecycle.init_calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_concurrent_unloads_share_one_destroy() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle {
            destroy_delay: Some(Duration::from_millis(20)),
            ..CountingLifecycle::default()
        });
        registry.register(module_with("payroll", &[], Arc::clone(&lifecycle)));
        assert!(registry.load_module("payroll", None).await);

        let (first, second) = futures_util::future::join(
            registry.unload_module("payroll"),
            registry.unload_module("payroll"),
        )
        .await;

        assert!(first && second);
        assert_eq!(lifecycle.destroy_calls.load(Ordering::SeqCst), 1);
        assert!(!registry.is_module_loaded("payroll"));
    }

    #[actix_web::test]
    async fn test_load_during_unload_reloads_after_destroy() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle {
            destroy_delay: Some(Duration::from_millis(20)),
            ..CountingLifecycle::default()
        });
        registry.register(module_with("payroll", &[], Arc::clone(&lifecycle)));
        assert!(registry.load_module("payroll", None).await);

        let (first, second, reloaded) = futures_util::future::join3(
            registry.unload_module("payroll"),
            registry.unload_module("payroll"),
            registry.load_module("payroll", None),
        )
        .await;

        assert!(first && second && reloaded);
        assert_eq!(lifecycle.destroy_calls.load(Ordering::SeqCst), 1);
        assert_eq!(lifecycle.init_calls.load(Ordering::SeqCst), 2);
        assert!(registry.is_module_loaded("payroll"));
    }

    #[actix_web::test]
    async fn test_unload_during_load_waits_for_initialize() {
        let registry = ModuleRegistry::new();
        let lifecycle = Arc::new(CountingLifecycle {
            delay: Some(Duration::from_millis(20)),
            ..CountingLifecycle::default()
        });
        registry.register(module_with("crm", &[], Arc::clone(&lifecycle)));

        let (loaded, unloaded) = futures_util::future::join(
            registry.load_module("crm", None),
            registry.unload_module("crm"),
        )
        .await;

        assert!(loaded && unloaded);
        assert_eq!(lifecycle.destroy_calls.load(Ordering::SeqCst), 1);
        assert!(!registry.is_module_loaded("crm"));
    }

    #[actix_web::test]
    async fn test_ready_requires_mark_initialized() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(module("crm", &[])));
        assert!(registry.load_module("crm", None).await);
        assert!(!registry.is_ready());

        registry.mark_initialized();
        registry.mark_initialized();
        assert!(registry.is_ready());
        assert!(registry.status().initialized);
    }

    #[actix_web::test]
    async fn test_wait_until_ready_signal_and_timeout() {
        let registry = ModuleRegistry::new();
        assert!(!registry.wait_until_ready(Duration::from_millis(10)).await);

        let waiter = registry.wait_until_ready(Duration::from_secs(1));
        let trigger = async { registry.mark_initialized() };
        let (ready, ()) = futures_util::future::join(waiter, trigger).await;
        assert!(ready);
    }

    #[actix_web::test]
    async fn test_subscribers_see_revision_changes() {
        let registry = ModuleRegistry::new();
        let rx = registry.subscribe();
        let start = rx.borrow().revision;

        registry.register(Arc::new(module("crm", &[])));
        registry.set_module_access("crm", true);

        assert_eq!(rx.borrow().revision, start + 2);
        assert_eq!(rx.borrow().registered, 1);
    }

    #[actix_web::test]
    async fn test_missing_dependencies_are_reported_not_enforced() {
        let registry = ModuleRegistry::new();
        let mut ach = module("ach", &[]);
        ach.metadata.dependencies = vec!["payroll".to_string()];
        registry.register(Arc::new(ach));
        registry.register(Arc::new(module("payroll", &[])));

        assert_eq!(registry.missing_dependencies("ach"), vec!["payroll".to_string()]);
        assert!(registry.load_module("ach", None).await);

        assert!(registry.load_module("payroll", None).await);
        assert!(registry.missing_dependencies("ach").is_empty());
        assert!(registry.missing_dependencies("ghost").is_empty());
    }
}
