//! 모듈 등록 헬퍼

use std::sync::Arc;

use crate::core::descriptor::ModuleDescriptor;
use crate::core::registry::ModuleRegistry;

/// 디스크립터를 등록하고 공유 핸들을 그대로 돌려줍니다.
///
/// 부트스트랩의 명시적 등록 목록에서 선언과 등록을 한 표현식으로 처리할 때 사용합니다.
///
/// # Examples
///
/// ```rust,ignore
/// let payroll = register_module(&registry, modules::payroll::descriptor());
/// assert_eq!(payroll.id, "payroll");
/// ```
pub fn register_module(registry: &ModuleRegistry, descriptor: ModuleDescriptor) -> Arc<ModuleDescriptor> {
    let descriptor = Arc::new(descriptor);
    registry.register(Arc::clone(&descriptor));
    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_module_returns_registered_descriptor() {
        let registry = ModuleRegistry::new();
        let descriptor = ModuleDescriptor::builder("onboarding", "Onboarding").build();

        let registered = register_module(&registry, descriptor);

        let stored = registry.get_module("onboarding");
        assert!(stored.is_some_and(|stored| Arc::ptr_eq(&stored, &registered)));
    }
}
