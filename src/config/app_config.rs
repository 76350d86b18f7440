//! 서버 및 모듈 레지스트리 설정 관리 모듈
//!
//! 서버 바인딩, 요청 제한, 레지스트리 준비 대기, 부트스트랩 모듈 목록을 관리합니다.
//! 각 설정은 환경 변수에서 읽고, 파싱 로직은 테스트를 위해 순수 함수로 분리합니다.

use std::collections::HashSet;
use std::env;
use std::time::Duration;

use log::error;

use crate::core::descriptor::ModuleConfig;
use crate::core::errors::AppError;
use crate::utils::string_utils::{normalize_prefix, split_list};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        let name = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string()));
        Self::from_str(&name)
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_WORKERS: usize = 4;

    /// 서버가 바인딩할 포트. 기본값: 8080 (`PORT`)
    pub fn port() -> u16 {
        Self::parse_port(env::var("PORT").ok().as_deref())
    }

    pub fn parse_port(raw: Option<&str>) -> u16 {
        let Some(value) = raw else {
            return Self::DEFAULT_PORT;
        };
        value.trim().parse::<u16>().unwrap_or_else(|e| {
            error!("PORT 파싱 실패: {}. 기본값 {} 사용", e, Self::DEFAULT_PORT);
            Self::DEFAULT_PORT
        })
    }

    /// 서버가 바인딩할 호스트. 기본값: "0.0.0.0" (`HOST`)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 워커 스레드 수. 기본값: 4 (`WORKERS`)
    pub fn workers() -> usize {
        Self::parse_workers(env::var("WORKERS").ok().as_deref())
    }

    /// 0 이나 숫자가 아닌 값은 기본값으로 대체합니다.
    pub fn parse_workers(raw: Option<&str>) -> usize {
        let Some(value) = raw else {
            return Self::DEFAULT_WORKERS;
        };
        match value.trim().parse::<usize>() {
            Ok(workers) if workers > 0 => workers,
            _ => {
                error!(
                    "WORKERS 값이 올바르지 않습니다: {:?}. 기본값 {} 사용",
                    value,
                    Self::DEFAULT_WORKERS
                );
                Self::DEFAULT_WORKERS
            }
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self {
            per_second,
            burst_size,
        }
    }
}

/// 모듈 레지스트리와 동적 라우트 렌더러 설정
pub struct RegistryConfig;

impl RegistryConfig {
    pub const DEFAULT_READINESS_TIMEOUT_MS: u64 = 5_000;
    pub const DEFAULT_ROUTE_PREFIXES: &'static str = "/admin,/superadmin,/portal";

    /// 준비 대기 최대 시간 (`READINESS_TIMEOUT_MS`, 기본값 5초)
    ///
    /// 이 시간이 지나면 렌더러는 부트스트랩 완료 여부와 무관하게 라우트를 제공합니다.
    pub fn readiness_timeout() -> Duration {
        Self::parse_readiness_timeout(env::var("READINESS_TIMEOUT_MS").ok().as_deref())
    }

    pub fn parse_readiness_timeout(raw: Option<&str>) -> Duration {
        let Some(value) = raw else {
            return Duration::from_millis(Self::DEFAULT_READINESS_TIMEOUT_MS);
        };
        let millis = value.trim().parse::<u64>().unwrap_or_else(|e| {
            error!(
                "READINESS_TIMEOUT_MS 파싱 실패: {}. 기본값 {}ms 사용",
                e,
                Self::DEFAULT_READINESS_TIMEOUT_MS
            );
            Self::DEFAULT_READINESS_TIMEOUT_MS
        });
        Duration::from_millis(millis)
    }

    /// 동적 라우트 렌더러를 마운트할 경로 접두사 (`ROUTE_PREFIXES`)
    pub fn route_prefixes() -> Vec<String> {
        Self::parse_route_prefixes(env::var("ROUTE_PREFIXES").ok().as_deref())
    }

    /// 접두사를 정규화하고, 첫 등장 순서를 유지하며 중복을 제거합니다.
    pub fn parse_route_prefixes(raw: Option<&str>) -> Vec<String> {
        let mut seen = HashSet::new();
        let prefixes: Vec<String> = split_list(raw.unwrap_or(Self::DEFAULT_ROUTE_PREFIXES))
            .iter()
            .map(|prefix| normalize_prefix(prefix))
            .filter(|prefix| seen.insert(prefix.clone()))
            .collect();

        if prefixes.is_empty() {
            return Self::parse_route_prefixes(Some(Self::DEFAULT_ROUTE_PREFIXES));
        }
        prefixes
    }
}

/// 부트스트랩 대상 모듈 설정
///
/// 값이 없으면 `None`을 반환하며, 이 경우 부트스트랩은 모든 내장 모듈을 사용합니다.
pub struct BootstrapConfig;

impl BootstrapConfig {
    /// 순서대로 로드할 모듈 ID (`BOOTSTRAP_MODULES`)
    pub fn module_ids() -> Option<Vec<String>> {
        Self::parse_ids(env::var("BOOTSTRAP_MODULES").ok().as_deref())
    }

    /// 접근 권한을 부여할 모듈 ID (`GRANTED_MODULES`)
    pub fn granted_ids() -> Option<Vec<String>> {
        Self::parse_ids(env::var("GRANTED_MODULES").ok().as_deref())
    }

    pub fn parse_ids(raw: Option<&str>) -> Option<Vec<String>> {
        raw.map(split_list)
    }

    /// 모듈별 초기화 설정 (`MODULE_CONFIG_<ID>`, JSON 객체)
    ///
    /// 없으면 디스크립터의 기본 설정이 사용됩니다.
    ///
    /// ```bash
    /// export MODULE_CONFIG_ACH='{"odfi_routing_number": "011000015"}'
    /// ```
    pub fn module_config(module_id: &str) -> Option<ModuleConfig> {
        let key = format!("MODULE_CONFIG_{}", module_id.to_uppercase());
        let raw = env::var(&key).ok()?;

        match Self::parse_module_config(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                error!("{} 파싱 실패: {}. 기본 설정 사용", key, e);
                None
            }
        }
    }

    pub fn parse_module_config(raw: &str) -> Result<ModuleConfig, AppError> {
        serde_json::from_str::<ModuleConfig>(raw)
            .map_err(|e| AppError::ConfigError(format!("모듈 설정은 JSON 객체여야 합니다: {}", e)))
    }
}

/// CORS 설정
pub struct CorsConfig;

impl CorsConfig {
    /// 허용할 Origin 목록 (`CORS_ALLOWED_ORIGINS`, 기본값: 로컬 관리 콘솔)
    pub fn allowed_origins() -> Vec<String> {
        let raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| {
            "http://localhost:3000,http://127.0.0.1:3000,http://localhost:8080,http://127.0.0.1:8080"
                .to_string()
        });
        split_list(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }

    #[test]
    fn test_server_values_fall_back_on_invalid_input() {
        assert_eq!(ServerConfig::parse_port(None), 8080);
        assert_eq!(ServerConfig::parse_port(Some(" 9090 ")), 9090);
        assert_eq!(ServerConfig::parse_port(Some("http")), 8080);
        assert_eq!(ServerConfig::parse_port(Some("70000")), 8080);

        assert_eq!(ServerConfig::parse_workers(None), 4);
        assert_eq!(ServerConfig::parse_workers(Some("8")), 8);
        assert_eq!(ServerConfig::parse_workers(Some("0")), 4);
        assert_eq!(ServerConfig::parse_workers(Some("many")), 4);
    }

    #[test]
    fn test_readiness_timeout_parsing() {
        assert_eq!(RegistryConfig::parse_readiness_timeout(None), Duration::from_secs(5));
        assert_eq!(
            RegistryConfig::parse_readiness_timeout(Some(" 250 ")),
            Duration::from_millis(250)
        );
        assert_eq!(
            RegistryConfig::parse_readiness_timeout(Some("soon")),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_route_prefix_parsing() {
        assert_eq!(
            RegistryConfig::parse_route_prefixes(None),
            vec!["/admin", "/superadmin", "/portal"]
        );
        assert_eq!(
            RegistryConfig::parse_route_prefixes(Some("admin/, /crm")),
            vec!["/admin", "/crm"]
        );
        assert_eq!(
            RegistryConfig::parse_route_prefixes(Some("/admin,/crm,/admin/,portal,/crm")),
            vec!["/admin", "/crm", "/portal"]
        );
        assert_eq!(
            RegistryConfig::parse_route_prefixes(Some(" , ")),
            vec!["/admin", "/superadmin", "/portal"]
        );
    }

    #[test]
    fn test_bootstrap_id_parsing() {
        assert_eq!(BootstrapConfig::parse_ids(None), None);
        assert_eq!(
            BootstrapConfig::parse_ids(Some("payroll, ach")),
            Some(vec!["payroll".to_string(), "ach".to_string()])
        );
        assert_eq!(BootstrapConfig::parse_ids(Some("")), Some(Vec::new()));
    }

    #[test]
    fn test_module_config_parsing() {
        let config = BootstrapConfig::parse_module_config(r#"{"pay_schedule": "weekly"}"#);
        assert_eq!(
            config.ok().and_then(|c| c.get("pay_schedule").cloned()),
            Some(serde_json::json!("weekly"))
        );

        assert!(matches!(
            BootstrapConfig::parse_module_config("[1, 2]"),
            Err(AppError::ConfigError(_))
        ));
    }
}
