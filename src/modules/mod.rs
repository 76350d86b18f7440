//! # Built-in Feature Modules
//!
//! 서비스와 함께 배포되는 기능 모듈 디스크립터입니다. 모듈은 가져오기 부작용으로
//! 스스로 등록하지 않으며, [`builtin_modules`]가 반환하는 명시적 목록을 부트스트랩이
//! 레지스트리에 등록합니다.
//!
//! | id | 카테고리 | 라우트 | 비고 |
//! |----|----------|--------|------|
//! | `onboarding` | hr | `/admin/onboarding`, `/portal/onboarding/:code` | 포털 초대 코드 |
//! | `connect_iq` | crm | `/admin/crm`, `/admin/crm/deals` | beta |
//! | `payroll` | payroll | `/admin/payroll`, `/admin/payroll/batches/:batch_id` | setup required |
//! | `ach` | finance | `/admin/ach` | `payroll` 의존 |
//! | `case_management` | compliance | `/admin/cases` | protected |
//! | `reporting` | analytics | `/admin/reports` | premium, locked |
//! | `tenant_admin` | operations | `/superadmin/tenants` | super_admin |

pub mod ach;
pub mod case_management;
pub mod connect_iq;
pub mod onboarding;
pub mod payroll;
pub mod reporting;
pub mod tenant_admin;
pub mod views;

use crate::core::descriptor::ModuleDescriptor;

/// 내장 모듈 ID (부트스트랩 기본 순서)
pub const BUILTIN_MODULE_IDS: [&str; 7] = [
    onboarding::MODULE_ID,
    connect_iq::MODULE_ID,
    payroll::MODULE_ID,
    ach::MODULE_ID,
    case_management::MODULE_ID,
    reporting::MODULE_ID,
    tenant_admin::MODULE_ID,
];

/// 내장 모듈 디스크립터 ([`BUILTIN_MODULE_IDS`]와 같은 순서)
pub fn builtin_modules() -> Vec<ModuleDescriptor> {
    vec![
        onboarding::descriptor(),
        connect_iq::descriptor(),
        payroll::descriptor(),
        ach::descriptor(),
        case_management::descriptor(),
        reporting::descriptor(),
        tenant_admin::descriptor(),
    ]
}
