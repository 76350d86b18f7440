//! 내장 모듈이 공유하는 기본 화면 컴포넌트

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::core::component::{LazyComponent, ModuleComponent, RenderContext};
use crate::core::errors::AppResult;

/// 제목과 섹션 목록으로 구성된 단순한 모듈 화면
#[derive(Debug, Clone)]
pub struct ModuleView {
    name: String,
    title: String,
    sections: Vec<String>,
}

impl ModuleView {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, section: &str) -> Self {
        self.sections.push(section.to_string());
        self
    }

    /// 첫 요청 시 해석되는 지연 핸들로 감쌉니다.
    pub fn lazy(self) -> LazyComponent {
        let name = self.name.clone();
        lazy_component(&name, Arc::new(self))
    }
}

#[async_trait]
impl ModuleComponent for ModuleView {
    fn name(&self) -> &str {
        &self.name
    }

    async fn render(&self, ctx: &RenderContext) -> AppResult<serde_json::Value> {
        Ok(json!({
            "title": self.title,
            "module": ctx.module_id,
            "path": ctx.route_path,
            "params": ctx.params,
            "tail": ctx.tail,
            "sections": self.sections,
            "viewer": ctx.principal.as_ref().map(|p| p.user_id.as_str()),
        }))
    }
}

/// 이미 만들어진 컴포넌트를 팩토리 뒤에 둡니다.
pub fn lazy_component(name: &str, component: Arc<dyn ModuleComponent>) -> LazyComponent {
    LazyComponent::new(name, move || {
        let component = Arc::clone(&component);
        async move { Ok(component) }
    })
}
