//! # Lazy Component Handles
//!
//! 라우트와 카탈로그가 참조하는 렌더링 단위입니다. 컴포넌트는 직접 저장하지 않고
//! [`LazyComponent`] 핸들 뒤에 둡니다. 핸들은 두 가지 능력을 제공합니다:
//!
//! - `try_get()`: 이미 해석된 경우 동기적으로 반환
//! - `resolve().await`: 팩토리를 한 번 실행하고 결과를 캐시
//!
//! 팩토리가 실패하면 캐시되지 않으므로 다음 `resolve()`가 다시 시도합니다.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt};
use log::debug;
use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::core::errors::AppResult;
use crate::domain::models::auth::principal::Principal;

/// 렌더링 시점의 요청 컨텍스트
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderContext {
    /// 라우트를 소유한 모듈 ID
    pub module_id: String,
    /// 선언된 라우트 경로 (예: `/admin/payroll/batches/:batch_id`)
    pub route_path: String,
    /// `:name` 세그먼트에서 추출된 경로 파라미터
    pub params: HashMap<String, String>,
    /// 와일드카드 마운트 아래의 나머지 경로 (하위 라우팅용)
    pub tail: Option<String>,
    /// 현재 주체 (익명이면 None)
    pub principal: Option<Principal>,
}

/// 모듈이 제공하는 렌더링 단위
///
/// 렌더 결과는 JSON 뷰 모델이며, HTTP 응답으로의 변환은 렌더러가 담당합니다.
#[async_trait]
pub trait ModuleComponent: Send + Sync {
    /// 로그와 디버그 출력용 이름
    fn name(&self) -> &str;

    /// 컨텍스트를 받아 뷰 모델을 생성합니다.
    async fn render(&self, ctx: &RenderContext) -> AppResult<serde_json::Value>;
}

type ComponentFactory =
    Arc<dyn Fn() -> BoxFuture<'static, AppResult<Arc<dyn ModuleComponent>>> + Send + Sync>;

/// 지연 해석되는 컴포넌트 핸들
///
/// 복제본끼리 캐시를 공유합니다.
#[derive(Clone)]
pub struct LazyComponent {
    name: Arc<str>,
    cell: Arc<OnceCell<Arc<dyn ModuleComponent>>>,
    factory: ComponentFactory,
}

impl LazyComponent {
    /// 비동기 팩토리로 핸들을 생성합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let component = LazyComponent::new("payroll.dashboard", || async {
    ///     Ok(Arc::new(PayrollDashboard::default()) as Arc<dyn ModuleComponent>)
    /// });
    /// ```
    pub fn new<F, Fut>(name: &str, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Arc<dyn ModuleComponent>>> + Send + 'static,
    {
        Self {
            name: Arc::from(name),
            cell: Arc::new(OnceCell::new()),
            factory: Arc::new(move || factory().boxed()),
        }
    }

    /// 이미 생성된 컴포넌트로 해석 완료 상태의 핸들을 만듭니다.
    pub fn ready(component: Arc<dyn ModuleComponent>) -> Self {
        let name = component.name().to_string();
        let cell = OnceCell::new();
        let cached = Arc::clone(&component);
        let _ = cell.set(component);

        Self {
            name: Arc::from(name.as_str()),
            cell: Arc::new(cell),
            factory: Arc::new(move || {
                let component = Arc::clone(&cached);
                async move { Ok(component) }.boxed()
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }

    /// 해석이 끝났다면 동기적으로 반환합니다.
    pub fn try_get(&self) -> Option<Arc<dyn ModuleComponent>> {
        self.cell.get().cloned()
    }

    /// 컴포넌트를 해석합니다. 동시에 해석되면 먼저 저장된 인스턴스가 이깁니다.
    pub async fn resolve(&self) -> AppResult<Arc<dyn ModuleComponent>> {
        if let Some(component) = self.cell.get() {
            return Ok(Arc::clone(component));
        }

        debug!("컴포넌트 해석 중: {}", self.name);
        let component = (self.factory)().await?;
        Ok(Arc::clone(self.cell.get_or_init(|| component)))
    }
}

impl fmt::Debug for LazyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyComponent")
            .field("name", &self.name)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
impl LazyComponent {
    /// 빈 뷰를 렌더링하는 테스트용 핸들
    pub(crate) fn empty(name: &str) -> Self {
        struct Empty(String);

        #[async_trait]
        impl ModuleComponent for Empty {
            fn name(&self) -> &str {
                &self.0
            }

            async fn render(&self, _ctx: &RenderContext) -> AppResult<serde_json::Value> {
                Ok(serde_json::Value::Null)
            }
        }

        Self::ready(Arc::new(Empty(name.to_string())))
    }
}
