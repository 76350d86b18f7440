//! 레지스트리 준비 신호와 동적 렌더러 사이의 브리지

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::core::registry::ModuleRegistry;

const PENDING: u8 = 0;
const READY: u8 = 1;
const FORCED: u8 = 2;

/// 렌더러 준비 게이트
///
/// 레지스트리가 `ready`를 발행하면 열리고, 제한 시간이 지나면 강제로 열립니다.
/// 한 번 열린 게이트는 다시 닫히지 않습니다.
#[derive(Debug, Default)]
pub struct ReadinessGate {
    phase: AtomicU8,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.phase.load(Ordering::Acquire) != PENDING
    }

    /// 제한 시간 초과로 열렸는지 여부
    pub fn was_forced(&self) -> bool {
        self.phase.load(Ordering::Acquire) == FORCED
    }

    /// 레지스트리가 준비될 때까지 기다린 뒤 게이트를 엽니다.
    pub async fn watch(&self, registry: &ModuleRegistry, timeout: Duration) {
        if registry.wait_until_ready(timeout).await {
            self.open(READY);
            info!("🚦 모듈 레지스트리 준비 완료, 동적 라우트 제공 시작");
        } else {
            self.open(FORCED);
            warn!(
                "⏰ 레지스트리 준비 대기 시간 초과 ({}ms). 현재 상태로 라우트를 제공합니다: {:?}",
                timeout.as_millis(),
                registry.status()
            );
        }
    }

    /// 백그라운드 작업으로 [`watch`](Self::watch)를 실행합니다.
    pub fn spawn(self: Arc<Self>, registry: Arc<ModuleRegistry>, timeout: Duration) {
        actix_web::rt::spawn(async move {
            self.watch(&registry, timeout).await;
        });
    }

    fn open(&self, phase: u8) {
        let _ = self
            .phase
            .compare_exchange(PENDING, phase, Ordering::AcqRel, Ordering::Acquire);
    }
}
