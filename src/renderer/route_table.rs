//! # Dynamic Route Renderer
//!
//! 경로 접두사(`/admin`, `/superadmin`, `/portal` ...) 하나를 담당하며, 레지스트리가
//! 노출하는 라우트 중 그 접두사 아래의 것들을 요청 시점에 매칭합니다.
//!
//! ## 마운트 규칙
//!
//! ```text
//! prefix = "/admin"
//!
//! /admin/crm                 (exact=false) → /crm/*
//! /admin/payroll/batches/:id (exact=true)  → /payroll/batches/:id
//! /admin                                   → ""        (접두사 자체)
//! /superadmin/tenants                      → 제외 (접두사 불일치)
//! ```
//!
//! 와일드카드 마운트는 자기 경로와 그 아래 모든 경로에 매칭되며, 나머지 경로는
//! `tail`로 컴포넌트에 전달되어 하위 라우팅에 사용됩니다.
//!
//! 마운트 테이블은 레지스트리 `revision`이 바뀔 때만 다시 계산됩니다.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use serde::Serialize;

use crate::core::descriptor::RouteDefinition;
use crate::core::registry::ModuleRegistry;
use crate::renderer::readiness::ReadinessGate;

/// 렌더러에 마운트된 라우트
#[derive(Debug, Clone, Serialize)]
pub struct MountedRoute {
    pub module_id: String,
    pub mount_path: String,
    #[serde(skip)]
    pub route: RouteDefinition,
    #[serde(skip)]
    segments: Vec<String>,
    #[serde(skip)]
    wildcard: bool,
}

impl MountedRoute {
    fn new(module_id: String, prefix: &str, route: RouteDefinition) -> Self {
        let mount_path = mount_path(prefix, &route.path, route.exact);
        let wildcard = mount_path.ends_with("/*");
        let segments = split_segments(mount_path.trim_end_matches("/*"))
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            module_id,
            mount_path,
            route,
            segments,
            wildcard,
        }
    }

    /// 접두사 기준 상대 경로 세그먼트와 매칭합니다.
    fn matches(&self, path: &[&str]) -> Option<(HashMap<String, String>, Option<String>)> {
        let fits = if self.wildcard {
            path.len() >= self.segments.len()
        } else {
            path.len() == self.segments.len()
        };
        if !fits {
            return None;
        }

        let mut params = HashMap::new();
        for (pattern, actual) in self.segments.iter().zip(path.iter()) {
            if let Some(name) = pattern.strip_prefix(':') {
                params.insert(name.to_string(), actual.to_string());
            } else if pattern.as_str() != *actual {
                return None;
            }
        }

        let rest = &path[self.segments.len()..];
        let tail = (!rest.is_empty()).then(|| rest.join("/"));
        Some((params, tail))
    }
}

/// 요청 경로 매칭 결과
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub module_id: String,
    pub route: RouteDefinition,
    pub params: HashMap<String, String>,
    pub tail: Option<String>,
}

/// 접두사 하나를 담당하는 동적 라우트 렌더러
pub struct DynamicRouteRenderer {
    prefix: String,
    registry: Arc<ModuleRegistry>,
    gate: Arc<ReadinessGate>,
    cache: RwLock<Option<(u64, Arc<Vec<MountedRoute>>)>>,
}

impl DynamicRouteRenderer {
    pub fn new(prefix: &str, registry: Arc<ModuleRegistry>, gate: Arc<ReadinessGate>) -> Self {
        Self {
            prefix: prefix.to_string(),
            registry,
            gate,
            cache: RwLock::new(None),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_open()
    }

    /// 현재 레지스트리 상태 기준으로 이 접두사 아래에 마운트된 라우트 (집계 순서)
    pub fn mounted_routes(&self) -> Arc<Vec<MountedRoute>> {
        let revision = self.registry.status().revision;

        if let Some((cached_revision, routes)) = self.cache.read().as_ref() {
            if *cached_revision == revision {
                return Arc::clone(routes);
            }
        }

        let routes: Vec<MountedRoute> = self
            .registry
            .get_all_routes()
            .into_iter()
            .filter(|entry| entry.route.path.starts_with(&self.prefix))
            .map(|entry| MountedRoute::new(entry.module_id, &self.prefix, entry.route))
            .collect();
        debug!(
            "🧭 {} 라우트 테이블 갱신 (revision {}, {}개)",
            self.prefix,
            revision,
            routes.len()
        );

        let routes = Arc::new(routes);
        *self.cache.write() = Some((revision, Arc::clone(&routes)));
        routes
    }

    /// 접두사 기준 상대 경로(`""`, `/crm/deals` ...)를 첫 번째로 매칭되는 라우트로 해석합니다.
    pub fn resolve(&self, relative_path: &str) -> Option<RouteMatch> {
        let segments = split_segments(relative_path);

        self.mounted_routes().iter().find_map(|mounted| {
            mounted.matches(&segments).map(|(params, tail)| RouteMatch {
                module_id: mounted.module_id.clone(),
                route: mounted.route.clone(),
                params,
                tail,
            })
        })
    }
}

/// 선언된 라우트 경로를 접두사 기준 마운트 경로로 바꿉니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(mount_path("/admin", "/admin/crm", false), "/crm/*");
/// assert_eq!(mount_path("/admin", "/admin/crm", true), "/crm");
/// assert_eq!(mount_path("/admin", "/admin", false), "");
/// ```
pub fn mount_path(prefix: &str, route_path: &str, exact: bool) -> String {
    let remainder = route_path
        .strip_prefix(prefix)
        .unwrap_or(route_path)
        .trim_end_matches('/');

    if !exact && !remainder.is_empty() {
        format!("{}/*", remainder)
    } else {
        remainder.to_string()
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
