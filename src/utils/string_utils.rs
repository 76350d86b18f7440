//! # 문자열 유틸리티
//!
//! 모듈 ID, 경로 접두사, 쉼표 구분 목록 등 문자열 처리와 관련된 공통 함수들입니다.

use serde::Deserialize;

use crate::core::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 인자
/// * `value` - 검증할 문자열
/// * `field_name` - 필드명 (에러 메시지용)
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  payroll  ", "module id").unwrap(), "payroll");
/// assert!(validate_required_string("   ", "module id").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 쿼리 스트링 `?category=` 처럼 빈 값이 들어오면 None으로 취급합니다.
///
/// # 예제
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct ModuleListQuery {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     category: Option<String>,
/// }
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 쉼표로 구분된 목록을 분리합니다. 빈 항목은 버립니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(split_list(" payroll, ach ,,"), vec!["payroll", "ach"]);
/// ```
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// 라우트 경로 접두사를 정규화합니다.
///
/// 선행 `/`를 보장하고 후행 `/`를 제거합니다. 루트는 `/` 그대로 둡니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(normalize_prefix("admin/"), "/admin");
/// assert_eq!(normalize_prefix("/"), "/");
/// ```
pub fn normalize_prefix(value: &str) -> String {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("payroll", "module id").unwrap(), "payroll");
        assert_eq!(validate_required_string("  ach  ", "module id").unwrap(), "ach");

        assert!(validate_required_string("", "module id").is_err());
        assert!(validate_required_string("\t\n", "module id").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  crm  ".to_string())), Some("crm".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            category: Option<String>,
        }

        let filled: TestStruct = serde_json::from_str(r#"{"category": " hr "}"#).unwrap();
        let blank: TestStruct = serde_json::from_str(r#"{"category": ""}"#).unwrap();
        let missing: TestStruct = serde_json::from_str("{}").unwrap();

        assert_eq!(filled.category, Some("hr".to_string()));
        assert_eq!(blank.category, None);
        assert_eq!(missing.category, None);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("payroll, ach ,,crm"), vec!["payroll", "ach", "crm"]);
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/admin"), "/admin");
        assert_eq!(normalize_prefix("admin/"), "/admin");
        assert_eq!(normalize_prefix(" /superadmin// "), "/superadmin");
        assert_eq!(normalize_prefix(""), "/");
        assert_eq!(normalize_prefix("/"), "/");
    }
}
